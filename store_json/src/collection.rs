//! A single JSON-array file holding one collection.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use nextra_store::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::JsonStoreError;

/// An ordered collection of `T` persisted as a pretty-printed JSON array.
///
/// All reads and read-modify-write cycles go through one mutex, so a single
/// `JsonCollection` is the only writer of its file within the process.
/// Writes land in a sibling `.tmp` file that is renamed over the target,
/// so readers never observe a partially written array.
pub struct JsonCollection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open the collection at `path`, creating it as `[]` if absent.
    ///
    /// An existing file must be empty or hold a JSON array of `T`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JsonStoreError> {
        let path = path.into();
        match fs::read_to_string(&path) {
            Ok(content) => {
                parse_array::<T>(&content).map_err(|reason| JsonStoreError::NotAnArray {
                    path: path.clone(),
                    reason,
                })?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&path, "[]").map_err(|source| JsonStoreError::Io {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path.display(), "created empty collection");
            }
            Err(source) => return Err(JsonStoreError::Io { path, source }),
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
            _record: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in stored order.
    pub fn load(&self) -> Result<Vec<T>, StoreError> {
        let _guard = self.guard();
        self.read_unlocked()
    }

    /// Run one read-modify-write cycle: load the array, let `f` change it,
    /// and write the full array back.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R, StoreError> {
        let _guard = self.guard();
        let mut records = self.read_unlocked()?;
        let out = f(&mut records);
        self.write_unlocked(&records)?;
        Ok(out)
    }

    // The mutex guards no data, so a poisoned lock is still usable.
    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_unlocked(&self) -> Result<Vec<T>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Read(format!("{}: {e}", self.path.display())));
            }
        };
        parse_array(&content)
            .map_err(|reason| StoreError::Corruption(format!("{}: {reason}", self.path.display())))
    }

    fn write_unlocked(&self, records: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Write(format!("{}: {e}", self.path.display())))?;

        let tmp = self.temp_path();
        fs::write(&tmp, json)
            .map_err(|e| StoreError::Write(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::Write(format!("{}: {e}", self.path.display())))?;

        debug!(path = %self.path.display(), records = records.len(), "collection written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Empty (or whitespace-only) content is an empty collection.
fn parse_array<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, String> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content).map_err(|e| e.to_string())
}
