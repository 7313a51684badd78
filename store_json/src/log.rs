//! JSON file implementation of LogStore.

use std::path::PathBuf;

use nextra_store::{LogStore, StoreError};
use nextra_types::LogEntry;
use tracing::debug;

use crate::{JsonCollection, JsonStoreError};

pub struct JsonLogStore {
    collection: JsonCollection<LogEntry>,
}

impl JsonLogStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JsonStoreError> {
        Ok(Self {
            collection: JsonCollection::open(path)?,
        })
    }
}

impl LogStore for JsonLogStore {
    fn list_logs(&self) -> Result<Vec<LogEntry>, StoreError> {
        self.collection.load()
    }

    fn push_log(&self, entry: &LogEntry) -> Result<(), StoreError> {
        let total = self.collection.update(|logs| {
            logs.push(entry.clone());
            logs.len()
        })?;
        debug!(name = %entry.name, total, "log appended");
        Ok(())
    }
}
