//! Daemon configuration with TOML file support.

use std::path::{Path, PathBuf};

use nextra_api::{server::DEFAULT_MAX_UPLOAD_BYTES, ApiConfig};
use nextra_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::error::DaemonError;

/// Configuration for the NEXTRA daemon.
///
/// Loaded from a TOML file via [`DaemonConfig::from_toml_file`] or built
/// from defaults; CLI flags are layered on top with [`ConfigOverrides`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `logs.json` and `verified.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory uploaded photos are stored in and served from.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Static frontend bundle (must contain `index.html`).
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("../frontend")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, DaemonError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DaemonError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, DaemonError> {
        toml::from_str(s).map_err(|e| DaemonError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, DaemonError> {
        toml::to_string_pretty(self).map_err(|e| DaemonError::Config(e.to_string()))
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            frontend_dir: self.frontend_dir.clone(),
            uploads_dir: self.uploads_dir.clone(),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            uploads_dir: default_uploads_dir(),
            frontend_dir: default_frontend_dir(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Values given on the command line or via environment variables.
/// Every `Some` replaces the corresponding file/default value.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub uploads_dir: Option<PathBuf>,
    pub frontend_dir: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: DaemonConfig) -> DaemonConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(uploads_dir) = self.uploads_dir {
            config.uploads_dir = uploads_dir;
        }
        if let Some(frontend_dir) = self.frontend_dir {
            config.frontend_dir = frontend_dir;
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = DaemonConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = DaemonConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.log_format, config.log_format);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = DaemonConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            port = 8080
            log_format = "json"
            uploads_dir = "/srv/nextra/uploads"
        "#;
        let config = DaemonConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.uploads_dir, PathBuf::from("/srv/nextra/uploads"));
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn unknown_log_format_is_a_config_error() {
        let err = DaemonConfig::from_toml_str(r#"log_format = "xml""#).unwrap_err();
        assert!(matches!(err, DaemonError::Config(_)));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = DaemonConfig::from_toml_file(Path::new("/nonexistent/nextra.toml"));
        assert!(matches!(result, Err(DaemonError::Config(_))));
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let base = DaemonConfig::from_toml_str("port = 8080\nlog_level = \"debug\"").unwrap();
        let config = ConfigOverrides {
            port: Some(4000),
            data_dir: Some(PathBuf::from("/var/lib/nextra")),
            ..Default::default()
        }
        .apply(base);

        assert_eq!(config.port, 4000);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/nextra"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn api_config_carries_paths_and_limit() {
        let config = DaemonConfig::default();
        let api = config.api_config();
        assert_eq!(api.frontend_dir, config.frontend_dir);
        assert_eq!(api.uploads_dir, config.uploads_dir);
        assert_eq!(api.max_upload_bytes, config.max_upload_bytes);
    }
}
