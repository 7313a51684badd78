use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a JSON array: {reason}", path.display())]
    NotAnArray { path: PathBuf, reason: String },
}

impl From<JsonStoreError> for nextra_store::StoreError {
    fn from(e: JsonStoreError) -> Self {
        nextra_store::StoreError::Backend(e.to_string())
    }
}
