//! Key-value storage backends for persisted client state.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::Error;

/// A string key-value store that outlives the process, or pretends to.
///
/// Mirrors the browser's `localStorage`: values are opaque strings and a
/// missing key is not an error.
pub trait Storage {
    /// Get the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    /// Returns an [Error::Storage] if the backend could not be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an [Error::Storage] if the backend could not be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Delete the value stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    /// Returns an [Error::Storage] if the backend could not be written.
    fn remove_item(&self, key: &str) -> Result<(), Error>;
}

/// Storage that lives in memory. Clones share the same items.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, Error> {
        self.items.lock().map_err(|error| {
            tracing::error!("could not acquire the storage lock: {error}");
            Error::Storage("could not acquire the storage lock".to_owned())
        })
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Durable storage that keeps each item in its own JSON file under a directory.
///
/// Writes go to a temporary file that is then renamed over the old one, so a
/// crash mid-write never leaves a half-written item behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store that keeps its files in `dir`.
    ///
    /// The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the item files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so only allow characters that cannot escape `dir`.
    fn path_for(&self, key: &str) -> Result<PathBuf, Error> {
        let is_safe = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if is_safe {
            Ok(self.dir.join(format!("{key}.json")))
        } else {
            Err(Error::Storage(format!("invalid storage key {key:?}")))
        }
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir)?;
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("wrote storage item {key:?} to {path:?}");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
