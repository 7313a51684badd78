//! JSON-array file backend for NEXTRA.
//!
//! Implements the storage traits from `nextra-store` on top of plain JSON
//! files. Each collection is a single file holding a JSON array; every
//! mutation reads the whole array, changes it in memory, and atomically
//! replaces the file.

pub mod collection;
pub mod environment;
pub mod error;
pub mod log;
pub mod user;

pub use collection::JsonCollection;
pub use environment::{JsonEnvironment, LOGS_FILE, VERIFIED_FILE};
pub use error::JsonStoreError;
pub use log::JsonLogStore;
pub use user::JsonUserStore;
