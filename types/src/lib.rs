//! Fundamental types for the NEXTRA security backend.
//!
//! This crate defines the records shared across every other crate in the
//! workspace: detection log entries, verified users, the validation error
//! raised when a record is missing a required field, and the clock used to
//! stamp uploads.

pub mod error;
pub mod log_entry;
pub mod time;
pub mod user;

pub use error::ValidationError;
pub use log_entry::LogEntry;
pub use time::{Clock, SystemClock};
pub use user::{names_match, VerifiedUser};
