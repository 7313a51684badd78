//! JSON file implementation of UserStore.

use std::path::PathBuf;

use nextra_store::{StoreError, UserStore};
use nextra_types::VerifiedUser;
use tracing::debug;

use crate::{JsonCollection, JsonStoreError};

pub struct JsonUserStore {
    collection: JsonCollection<VerifiedUser>,
}

impl JsonUserStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JsonStoreError> {
        Ok(Self {
            collection: JsonCollection::open(path)?,
        })
    }
}

impl UserStore for JsonUserStore {
    fn list_users(&self) -> Result<Vec<VerifiedUser>, StoreError> {
        self.collection.load()
    }

    fn push_user(&self, user: &VerifiedUser) -> Result<(), StoreError> {
        self.collection.update(|users| users.push(user.clone()))?;
        debug!(name = %user.name, "verified user appended");
        Ok(())
    }

    fn remove_matching(&self, name: &str) -> Result<usize, StoreError> {
        let removed = self.collection.update(|users| {
            let before = users.len();
            users.retain(|user| !user.matches_name(name));
            before - users.len()
        })?;
        debug!(name, removed, "verified users removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, JsonUserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonUserStore::open(dir.path().join("verified.json")).unwrap();
        (dir, store)
    }

    fn user(name: &str, role: &str) -> VerifiedUser {
        VerifiedUser::new(name, role, format!("/uploads/1-{name}.png")).unwrap()
    }

    #[test]
    fn find_user_ignores_case() {
        let (_dir, store) = open_store();
        store.add_user(user("ALICE", "admin")).unwrap();

        let found = store.find_user("Alice").unwrap().expect("alice is verified");
        assert_eq!(found.name, "ALICE");
        assert!(store.find_user("bob").unwrap().is_none());
    }

    #[test]
    fn find_user_returns_first_duplicate() {
        let (_dir, store) = open_store();
        store.add_user(user("Bob", "guest")).unwrap();
        store.add_user(user("BOB", "staff")).unwrap();

        assert_eq!(store.find_user("bob").unwrap().unwrap().role, "guest");
    }

    #[test]
    fn remove_drops_every_case_insensitive_match() {
        let (_dir, store) = open_store();
        store.add_user(user("Bob", "guest")).unwrap();
        store.add_user(user("Carol", "staff")).unwrap();
        store.add_user(user("bob", "staff")).unwrap();

        let removal = store.remove_user("BOB").unwrap();
        assert_eq!(removal.removed, 2);
        assert_eq!(removal.message(), "BOB removed successfully.");
        assert_eq!(store.list_users().unwrap(), vec![user("Carol", "staff")]);
    }

    #[test]
    fn removing_unknown_name_is_a_no_op() {
        let (_dir, store) = open_store();
        store.add_user(user("Carol", "staff")).unwrap();

        let removal = store.remove_user("Mallory").unwrap();
        assert_eq!(removal.removed, 0);
        assert_eq!(store.list_users().unwrap(), vec![user("Carol", "staff")]);
    }

    #[test]
    fn user_without_photo_is_rejected_and_store_unchanged() {
        let (_dir, store) = open_store();
        let invalid = VerifiedUser {
            name: "Bob".into(),
            role: "guest".into(),
            photo: String::new(),
        };

        assert!(matches!(store.add_user(invalid), Err(StoreError::Validation(_))));
        assert!(store.list_users().unwrap().is_empty());
    }
}
