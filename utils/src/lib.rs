//! Shared utilities for NEXTRA.

pub mod logging;

pub use logging::{init_logging, LogFormat};
