//! Abstract storage traits for NEXTRA.
//!
//! Every backend (JSON files on disk, in-memory for testing) implements
//! these traits. The API layer depends only on the traits.

pub mod error;
pub mod log;
pub mod user;

pub use error::StoreError;
pub use log::LogStore;
pub use user::{Removal, UserStore};
