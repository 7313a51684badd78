//! Validation error shared across crates.

use thiserror::Error;

/// A record failed its required-field checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// A required field counts as present when it is a non-empty string.
/// Whitespace is content.
pub(crate) fn is_present(value: &str) -> bool {
    !value.is_empty()
}
