//! Verified-user storage trait.

use crate::StoreError;
use nextra_types::VerifiedUser;

/// Outcome of a remove-by-name. Removing a name with no match is a
/// successful no-op (`removed == 0`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Removal {
    pub name: String,
    pub removed: usize,
}

impl Removal {
    /// Human-readable confirmation shown to the operator.
    pub fn message(&self) -> String {
        format!("{} removed successfully.", self.name)
    }
}

/// Insertion-ordered set of verified users keyed by case-insensitive name.
///
/// Duplicate names are accepted; lookups return the first match and
/// removals drop every match.
pub trait UserStore: Send + Sync {
    /// All stored users in insertion order.
    fn list_users(&self) -> Result<Vec<VerifiedUser>, StoreError>;

    /// Append an already validated user.
    fn push_user(&self, user: &VerifiedUser) -> Result<(), StoreError>;

    /// Remove every user whose name matches `name` case-insensitively,
    /// returning how many were dropped.
    fn remove_matching(&self, name: &str) -> Result<usize, StoreError>;

    /// Validate and append `user`, returning the stored record.
    fn add_user(&self, user: VerifiedUser) -> Result<VerifiedUser, StoreError> {
        user.validate()?;
        self.push_user(&user)?;
        Ok(user)
    }

    fn remove_user(&self, name: &str) -> Result<Removal, StoreError> {
        let removed = self.remove_matching(name)?;
        Ok(Removal {
            name: name.to_string(),
            removed,
        })
    }

    /// First user whose name matches `name` case-insensitively.
    fn find_user(&self, name: &str) -> Result<Option<VerifiedUser>, StoreError> {
        Ok(self
            .list_users()?
            .into_iter()
            .find(|user| user.matches_name(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_message_echoes_requested_name() {
        let removal = Removal {
            name: "bob".into(),
            removed: 0,
        };
        assert_eq!(removal.message(), "bob removed successfully.");
    }
}
