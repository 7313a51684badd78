//! Nullable stores — thread-safe in-memory storage for testing.

use nextra_store::{LogStore, StoreError, UserStore};
use nextra_types::{LogEntry, VerifiedUser};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// An in-memory log store for testing.
#[derive(Default)]
pub struct NullLogStore {
    logs: Mutex<Vec<LogEntry>>,
}

impl NullLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given entries already stored.
    pub fn with_logs(logs: Vec<LogEntry>) -> Self {
        Self {
            logs: Mutex::new(logs),
        }
    }
}

impl LogStore for NullLogStore {
    fn list_logs(&self) -> Result<Vec<LogEntry>, StoreError> {
        Ok(self.logs.lock().unwrap().clone())
    }

    fn push_log(&self, entry: &LogEntry) -> Result<(), StoreError> {
        self.logs.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// An in-memory verified-user store for testing.
#[derive(Default)]
pub struct NullUserStore {
    users: Mutex<Vec<VerifiedUser>>,
}

impl NullUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given users already stored.
    pub fn with_users(users: Vec<VerifiedUser>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

impl UserStore for NullUserStore {
    fn list_users(&self) -> Result<Vec<VerifiedUser>, StoreError> {
        Ok(self.users.lock().unwrap().clone())
    }

    fn push_user(&self, user: &VerifiedUser) -> Result<(), StoreError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    fn remove_matching(&self, name: &str) -> Result<usize, StoreError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|user| !user.matches_name(name));
        Ok(before - users.len())
    }
}

/// A store whose reads and writes can be made to fail on demand.
///
/// Implements both [`LogStore`] and [`UserStore`] over in-memory data so
/// the error paths of callers can be exercised without breaking a disk.
#[derive(Default)]
pub struct FailingStore {
    logs: NullLogStore,
    users: NullUserStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that fails every read (and therefore every mutation).
    pub fn unreadable() -> Self {
        let store = Self::new();
        store.set_fail_reads(true);
        store
    }

    /// A store that reads fine but fails every write.
    pub fn unwritable() -> Self {
        let store = Self::new();
        store.set_fail_writes(true);
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("injected read failure".into()));
        }
        Ok(())
    }

    // A mutation is a full read-modify-write, so it reads first.
    fn check_write(&self) -> Result<(), StoreError> {
        self.check_read()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("injected write failure".into()));
        }
        Ok(())
    }
}

impl LogStore for FailingStore {
    fn list_logs(&self) -> Result<Vec<LogEntry>, StoreError> {
        self.check_read()?;
        self.logs.list_logs()
    }

    fn push_log(&self, entry: &LogEntry) -> Result<(), StoreError> {
        self.check_write()?;
        self.logs.push_log(entry)
    }
}

impl UserStore for FailingStore {
    fn list_users(&self) -> Result<Vec<VerifiedUser>, StoreError> {
        self.check_read()?;
        self.users.list_users()
    }

    fn push_user(&self, user: &VerifiedUser) -> Result<(), StoreError> {
        self.check_write()?;
        self.users.push_user(user)
    }

    fn remove_matching(&self, name: &str) -> Result<usize, StoreError> {
        self.check_write()?;
        self.users.remove_matching(name)
    }
}
