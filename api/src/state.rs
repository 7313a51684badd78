use std::sync::Arc;

use nextra_store::{LogStore, UserStore};

use crate::UploadDir;

/// Shared handler state: one store per collection plus the upload target.
#[derive(Clone)]
pub struct AppState {
    pub logs: Arc<dyn LogStore>,
    pub users: Arc<dyn UserStore>,
    pub uploads: Arc<UploadDir>,
}

impl AppState {
    pub fn new(logs: Arc<dyn LogStore>, users: Arc<dyn UserStore>, uploads: UploadDir) -> Self {
        Self {
            logs,
            users,
            uploads: Arc::new(uploads),
        }
    }
}
