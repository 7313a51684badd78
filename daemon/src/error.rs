use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(#[from] nextra_store_json::JsonStoreError),

    #[error("store error: {0}")]
    Store(#[from] nextra_store::StoreError),

    #[error("API server error: {0}")]
    Api(#[from] nextra_api::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
