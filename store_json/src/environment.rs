//! Data directory setup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::{JsonLogStore, JsonStoreError, JsonUserStore};

/// File name of the detection log collection.
pub const LOGS_FILE: &str = "logs.json";

/// File name of the verified-user collection.
pub const VERIFIED_FILE: &str = "verified.json";

/// Owns the data directory and the one store instance per collection file.
///
/// Hand out the stores from here rather than opening a collection twice:
/// each store serializes writes to its own file only.
pub struct JsonEnvironment {
    data_dir: PathBuf,
    logs: Arc<JsonLogStore>,
    users: Arc<JsonUserStore>,
}

impl JsonEnvironment {
    /// Open or create the data directory and both collection files.
    pub fn open(data_dir: &Path) -> Result<Self, JsonStoreError> {
        fs::create_dir_all(data_dir).map_err(|source| JsonStoreError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let logs = JsonLogStore::open(data_dir.join(LOGS_FILE))?;
        let users = JsonUserStore::open(data_dir.join(VERIFIED_FILE))?;
        info!(data_dir = %data_dir.display(), "storage environment opened");

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            logs: Arc::new(logs),
            users: Arc::new(users),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_store(&self) -> Arc<JsonLogStore> {
        self.logs.clone()
    }

    pub fn user_store(&self) -> Arc<JsonUserStore> {
        self.users.clone()
    }
}
