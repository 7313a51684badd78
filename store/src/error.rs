use nextra_types::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to read collection: {0}")]
    Read(String),

    #[error("failed to write collection: {0}")]
    Write(String),

    #[error("collection is corrupted: {0}")]
    Corruption(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether the failure happened while loading the collection.
    pub fn is_read(&self) -> bool {
        matches!(self, StoreError::Read(_) | StoreError::Corruption(_))
    }
}
