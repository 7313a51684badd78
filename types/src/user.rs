//! Verified user record and case-insensitive name matching.

use serde::{Deserialize, Serialize};

use crate::error::{is_present, ValidationError};

/// A person pre-registered as recognized.
///
/// `name` is the identity key and is always compared case-insensitively
/// (see [`names_match`]). `photo` is the public path of the uploaded
/// picture, e.g. `/uploads/1760600000000-bob.png`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub name: String,
    pub role: String,
    pub photo: String,
}

impl VerifiedUser {
    /// Build a user, requiring all three fields to be non-empty.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        photo: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let user = Self {
            name: name.into(),
            role: role.into(),
            photo: photo.into(),
        };
        user.validate()?;
        Ok(user)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_present(&self.name) {
            return Err(ValidationError::MissingField("name"));
        }
        if !is_present(&self.role) {
            return Err(ValidationError::MissingField("role"));
        }
        if !is_present(&self.photo) {
            return Err(ValidationError::MissingField("photo"));
        }
        Ok(())
    }

    /// Whether this user is identified by `name`, ignoring case.
    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Case-insensitive name equality used by every name-based lookup.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
