//! Local key-value store for client state.
//!
//! Holds the same three entries a browser would keep in local storage:
//! the bearer `token`, the serialized `user`, and the `cart`. Values are
//! plain strings, unencrypted, and trusted at face value when read back.
//!
//! Two backends:
//! - [`MemoryStore`] - process lifetime only, used by tests and one-shot runs
//! - [`FileStore`] - one file per key under a state directory, so the cart
//!   and login survive restarts of the CLI

mod file;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

pub use file::FileStore;

/// Well-known keys.
pub mod keys {
    /// Opaque bearer token from the last successful login.
    pub const TOKEN: &str = "token";

    /// JSON-serialized user record from the last successful login.
    pub const USER: &str = "user";

    /// JSON-serialized cart lines.
    pub const CART: &str = "cart";
}

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters that are not allowed.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A string-to-string store with local-storage semantics.
///
/// Keys are short ASCII identifiers (`[a-z0-9_-]`). Removing a missing key
/// is not an error.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reject keys that could escape a directory or collide on
/// case-insensitive filesystems.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 64
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

/// In-memory store. Cheap to create, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave a HashMap half-written
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries().remove(key);
        Ok(())
    }
}
