//! NEXTRA daemon — entry point for the security backend.

mod config;
mod error;
mod shutdown;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use nextra_api::{router, ApiServer, AppState, UploadDir};
use nextra_store::{LogStore, UserStore};
use nextra_store_json::JsonEnvironment;
use nextra_types::SystemClock;
use nextra_utils::LogFormat;
use tracing::{info, warn};

use config::{ConfigOverrides, DaemonConfig};
use error::DaemonError;
use shutdown::ShutdownController;

#[derive(Parser)]
#[command(name = "nextra", about = "NEXTRA smart security backend")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "NEXTRA_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Interface to bind (default 0.0.0.0).
    #[arg(long, env = "NEXTRA_HOST", global = true)]
    host: Option<String>,

    /// HTTP port (default 3000).
    #[arg(long, env = "NEXTRA_PORT", global = true)]
    port: Option<u16>,

    /// Directory holding the log and verified-user collections.
    #[arg(long, env = "NEXTRA_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Directory uploaded photos are written to.
    #[arg(long, env = "NEXTRA_UPLOADS_DIR", global = true)]
    uploads_dir: Option<PathBuf>,

    /// Static frontend bundle to serve.
    #[arg(long, env = "NEXTRA_FRONTEND_DIR", global = true)]
    frontend_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "NEXTRA_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "NEXTRA_LOG_FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// Subcommand (defaults to `serve`).
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand, Clone, Copy)]
enum Command {
    /// Serve the API and frontend.
    Serve,
    /// Create the data and uploads directories, then exit.
    Init,
}

impl Cli {
    fn resolve_config(&self) -> Result<DaemonConfig, DaemonError> {
        let base = match &self.config {
            Some(path) => DaemonConfig::from_toml_file(path)?,
            None => DaemonConfig::default(),
        };
        let overrides = ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            data_dir: self.data_dir.clone(),
            uploads_dir: self.uploads_dir.clone(),
            frontend_dir: self.frontend_dir.clone(),
            log_format: self.log_format,
            log_level: self.log_level.clone(),
        };
        Ok(overrides.apply(base))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    nextra_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        info!("Loaded config from {}", path.display());
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Init => {
            let env = prepare(&config)?;
            info!(
                data_dir = %env.data_dir().display(),
                uploads_dir = %config.uploads_dir.display(),
                "NEXTRA data initialised"
            );
        }
        Command::Serve => serve(config).await?,
    }

    Ok(())
}

/// Create the uploads directory and open (creating if needed) both
/// collection files.
fn prepare(config: &DaemonConfig) -> Result<JsonEnvironment, DaemonError> {
    std::fs::create_dir_all(&config.uploads_dir)?;
    Ok(JsonEnvironment::open(&config.data_dir)?)
}

async fn serve(config: DaemonConfig) -> Result<(), DaemonError> {
    let env = prepare(&config)?;
    let logs = env.log_store();
    let users = env.user_store();
    let log_count = logs.log_count()?;
    let user_count = users.list_users()?.len();
    info!(logs = log_count, verified_users = user_count, "storage ready");

    if !config.frontend_dir.join("index.html").is_file() {
        warn!(
            "no index.html in {}; unmatched routes will return empty 404s",
            config.frontend_dir.display()
        );
    }

    let uploads = UploadDir::new(&config.uploads_dir, Arc::new(SystemClock));
    let state = AppState::new(logs, users, uploads);
    let app = router(state, &config.api_config());

    let shutdown = Arc::new(ShutdownController::new());
    let signalled = shutdown.signalled();
    let signal_task = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move { shutdown.wait_for_signal().await })
    };

    info!(
        "Starting NEXTRA on {}:{} (data: {}, uploads: {}, frontend: {})",
        config.host,
        config.port,
        config.data_dir.display(),
        config.uploads_dir.display(),
        config.frontend_dir.display(),
    );
    let result = ApiServer::new(config.host.clone(), config.port)
        .start(app, signalled)
        .await;
    signal_task.abort();
    result?;

    info!("NEXTRA exited cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextra_store_json::{LOGS_FILE, VERIFIED_FILE};
    use nextra_types::LogEntry;

    fn config_in(dir: &std::path::Path) -> DaemonConfig {
        ConfigOverrides {
            data_dir: Some(dir.join("data")),
            uploads_dir: Some(dir.join("uploads")),
            ..Default::default()
        }
        .apply(DaemonConfig::default())
    }

    #[test]
    fn prepare_creates_directories_and_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let env = prepare(&config).unwrap();
        assert!(config.uploads_dir.is_dir());
        assert_eq!(env.data_dir(), config.data_dir.as_path());
        for file in [LOGS_FILE, VERIFIED_FILE] {
            let content = std::fs::read_to_string(config.data_dir.join(file)).unwrap();
            assert_eq!(content.trim(), "[]", "{file}");
        }
    }

    #[test]
    fn prepare_keeps_existing_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        prepare(&config)
            .unwrap()
            .log_store()
            .append_log(LogEntry::new("Known User", "t0"))
            .unwrap();

        let env = prepare(&config).unwrap();
        assert_eq!(env.log_store().log_count().unwrap(), 1);
    }

    #[test]
    fn corrupt_collection_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::create_dir_all(&config.data_dir).unwrap();
        std::fs::write(config.data_dir.join(LOGS_FILE), "{\"not\": \"an array\"}").unwrap();

        assert!(matches!(prepare(&config), Err(DaemonError::Storage(_))));
    }
}
