//! Photo upload storage.
//!
//! Uploaded files are written to the uploads directory as
//! `<upload-millis>-<original-name>` and referenced publicly as
//! `/uploads/<stored-name>`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nextra_types::Clock;
use tracing::{error, info};

use crate::ApiError;

/// Route prefix under which the uploads directory is served.
pub const UPLOADS_ROUTE: &str = "/uploads";

pub struct UploadDir {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl UploadDir {
    pub fn new(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The name a file uploaded as `original` is stored under, or `None`
    /// if the client sent no usable filename.
    ///
    /// Only the final path component of `original` is kept.
    pub fn stored_name(&self, original: &str) -> Option<String> {
        let base = original
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default()
            .trim();
        if base.is_empty() || base == "." || base == ".." {
            return None;
        }
        Some(format!("{}-{}", self.clock.now_millis(), base))
    }

    /// Write `bytes` under `stored_name` and return its public path.
    pub async fn save(&self, stored_name: &str, bytes: &[u8]) -> Result<String, ApiError> {
        let target = self.dir.join(stored_name);
        let write = async {
            tokio::fs::create_dir_all(&self.dir).await?;
            tokio::fs::write(&target, bytes).await
        };
        if let Err(e) = write.await {
            error!(path = %target.display(), error = %e, "failed to store upload");
            return Err(ApiError::Upload("Error saving photo".into()));
        }

        info!(file = stored_name, bytes = bytes.len(), "photo uploaded");
        Ok(public_path(stored_name))
    }
}

pub fn public_path(stored_name: &str) -> String {
    format!("{UPLOADS_ROUTE}/{stored_name}")
}
