//! The persisted "is a user logged in" flag used by the UI.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{Error, session::storage::Storage};

/// The storage key the session flag is persisted under.
pub const SESSION_STORAGE_KEY: &str = "fundilink-logged-in-user";

/// The persisted form of the session flag.
///
/// Only these fields are ever written to storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSession {
    /// Whether a user is currently authenticated.
    pub logged_in_user: bool,
}

/// Holds the logged-in flag and writes every change through to `S`.
///
/// The flag reads `false` until [SessionStore::hydrate] restores the
/// persisted value. Mutation takes `&mut self`; callers are expected to drive
/// the store from a single UI task, so the last write wins.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    logged_in_user: bool,
    hydrated: bool,
    changes: watch::Sender<bool>,
}

impl<S> SessionStore<S>
where
    S: Storage,
{
    /// Create a store backed by `storage`. Nothing is read until [SessionStore::hydrate].
    pub fn new(storage: S) -> Self {
        let (changes, _) = watch::channel(false);

        Self {
            storage,
            logged_in_user: false,
            hydrated: false,
            changes,
        }
    }

    /// Restore the flag from storage and return it.
    ///
    /// A missing entry yields `false`. So does an entry that cannot be parsed,
    /// which is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Storage] if the storage cannot be read. The store
    /// then stays unhydrated.
    pub fn hydrate(&mut self) -> Result<bool, Error> {
        let persisted = match self.storage.get_item(SESSION_STORAGE_KEY)? {
            Some(raw) => serde_json::from_str::<PersistedSession>(&raw).unwrap_or_else(|error| {
                tracing::warn!("Ignoring malformed session state {raw:?}: {error}");
                PersistedSession::default()
            }),
            None => PersistedSession::default(),
        };

        self.hydrated = true;
        self.update(persisted.logged_in_user);

        Ok(self.logged_in_user)
    }

    /// Whether [SessionStore::hydrate] has completed.
    pub fn has_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Whether a user is currently logged in.
    pub fn logged_in_user(&self) -> bool {
        self.logged_in_user
    }

    /// Set the flag and persist it.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Storage] if the value could not be persisted, in
    /// which case the in-memory flag is left unchanged.
    pub fn set_logged_in_user(&mut self, logged_in_user: bool) -> Result<(), Error> {
        let raw = serde_json::to_string(&PersistedSession { logged_in_user })?;
        self.storage.set_item(SESSION_STORAGE_KEY, &raw)?;

        tracing::debug!("Persisted session state {raw}");
        self.update(logged_in_user);

        Ok(())
    }

    /// Get notified whenever the flag changes value.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.changes.subscribe()
    }

    /// Delete the persisted entry. The in-memory flag is not changed.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Storage] if the entry could not be deleted.
    pub fn clear_storage(&self) -> Result<(), Error> {
        self.storage.remove_item(SESSION_STORAGE_KEY)
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn update(&mut self, logged_in_user: bool) {
        self.logged_in_user = logged_in_user;
        self.changes.send_if_modified(|current| {
            let changed = *current != logged_in_user;
            *current = logged_in_user;
            changed
        });
    }
}

#[cfg(test)]
mod session_store_tests {
    use serde_json::{Value, json};

    use crate::{
        Error,
        session::{
            storage::{MemoryStorage, Storage},
            store::{SESSION_STORAGE_KEY, SessionStore},
        },
    };

    /// Storage that can be read but never written.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, Error> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::Storage("storage is read-only".to_owned()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), Error> {
            Err(Error::Storage("storage is read-only".to_owned()))
        }
    }

    fn persisted(storage: &MemoryStorage) -> Option<Value> {
        storage
            .get_item(SESSION_STORAGE_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn reads_false_before_hydration() {
        let storage = MemoryStorage::new();
        storage
            .set_item(SESSION_STORAGE_KEY, "{\"loggedInUser\":true}")
            .unwrap();

        let store = SessionStore::new(storage);

        assert!(!store.has_hydrated());
        assert!(!store.logged_in_user());
    }

    #[test]
    fn hydrate_without_persisted_state_reads_false() {
        let mut store = SessionStore::new(MemoryStorage::new());

        assert!(!store.hydrate().unwrap());
        assert!(store.has_hydrated());
        assert!(!store.logged_in_user());
    }

    #[test]
    fn set_is_readable_and_persisted() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());

        store.set_logged_in_user(true).unwrap();

        assert!(store.logged_in_user());
        assert_eq!(persisted(&storage), Some(json!({ "loggedInUser": true })));
    }

    #[test]
    fn every_mutation_is_written_through() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());

        store.set_logged_in_user(true).unwrap();
        store.set_logged_in_user(false).unwrap();

        assert!(!store.logged_in_user());
        assert_eq!(persisted(&storage), Some(json!({ "loggedInUser": false })));
    }

    #[test]
    fn hydrate_restores_persisted_state() {
        let storage = MemoryStorage::new();
        SessionStore::new(storage.clone())
            .set_logged_in_user(true)
            .unwrap();

        let mut store = SessionStore::new(storage);

        assert!(store.hydrate().unwrap());
        assert!(store.logged_in_user());
    }

    #[test]
    fn hydrate_ignores_malformed_state() {
        let storage = MemoryStorage::new();
        storage.set_item(SESSION_STORAGE_KEY, "not json").unwrap();

        let mut store = SessionStore::new(storage);

        assert!(!store.hydrate().unwrap());
        assert!(store.has_hydrated());
    }

    #[test]
    fn hydrate_ignores_unknown_fields() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                SESSION_STORAGE_KEY,
                "{\"loggedInUser\":true,\"isMenuOpen\":true}",
            )
            .unwrap();

        let mut store = SessionStore::new(storage);

        assert!(store.hydrate().unwrap());
    }

    #[test]
    fn failed_write_leaves_flag_unchanged() {
        let mut store = SessionStore::new(ReadOnlyStorage);

        let result = store.set_logged_in_user(true);

        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(!store.logged_in_user());
    }

    #[test]
    fn subscribers_see_changes() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let mut changes = store.subscribe();

        store.set_logged_in_user(true).unwrap();

        assert!(changes.has_changed().unwrap());
        assert!(*changes.borrow_and_update());

        store.set_logged_in_user(true).unwrap();

        assert!(!changes.has_changed().unwrap());
    }

    #[test]
    fn clear_storage_keeps_in_memory_flag() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.set_logged_in_user(true).unwrap();

        store.clear_storage().unwrap();

        assert!(store.logged_in_user());
        assert_eq!(persisted(&storage), None);
    }
}
