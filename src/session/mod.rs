//! Client-side session state persisted through a pluggable storage backend.
//!
//! The store is not tied to the sign-out endpoint: application code updates
//! it on log-in and log-out.

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{PersistedSession, SESSION_STORAGE_KEY, SessionStore};
