//! Detection log storage trait.

use crate::StoreError;
use nextra_types::LogEntry;

/// Append-only, insertion-ordered log of detection events.
pub trait LogStore: Send + Sync {
    /// All stored entries in insertion order.
    fn list_logs(&self) -> Result<Vec<LogEntry>, StoreError>;

    /// Append an already validated entry at the end of the collection.
    fn push_log(&self, entry: &LogEntry) -> Result<(), StoreError>;

    /// Validate and append `entry`, returning the stored record.
    ///
    /// An invalid entry leaves the collection untouched.
    fn append_log(&self, entry: LogEntry) -> Result<LogEntry, StoreError> {
        entry.validate()?;
        self.push_log(&entry)?;
        Ok(entry)
    }

    fn log_count(&self) -> Result<u64, StoreError> {
        self.list_logs().map(|logs| logs.len() as u64)
    }
}
