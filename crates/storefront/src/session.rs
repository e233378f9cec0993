//! Persisted login session.
//!
//! The session is the bearer token plus the user record returned by
//! `POST /login`. It is stored under the `token` and `user` keys and is
//! never validated or refreshed locally: the backend alone decides whether
//! a token is still good, and a revoked token only shows up as a rejected
//! request.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::models::User;
use crate::storage::{KeyValueStore, StorageError, keys};

/// A logged-in session.
#[derive(Clone)]
pub struct Session {
    token: SecretString,
    user: User,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    pub(crate) const fn new(token: SecretString, user: User) -> Self {
        Self { token, user }
    }

    /// Bearer token for authenticated requests.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    /// The logged-in user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }
}

/// Reads and writes the session in a [`KeyValueStore`].
///
/// Cheap to clone; clones share the underlying store.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a session store backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist a freshly issued session.
    ///
    /// # Errors
    ///
    /// Returns an error if either key cannot be written. A partially written
    /// session is rolled back.
    pub fn save(&self, token: &SecretString, user: &User) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user).map_err(std::io::Error::other)?;

        self.store.set(keys::TOKEN, token.expose_secret())?;
        if let Err(e) = self.store.set(keys::USER, &user_json) {
            let _ = self.store.remove(keys::TOKEN);
            return Err(e);
        }
        Ok(())
    }

    /// The stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        match self.store.get(keys::TOKEN) {
            Ok(token) => token
                .filter(|t| !t.is_empty())
                .map(SecretString::from),
            Err(e) => {
                warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    /// The stored user, if any. A corrupt record reads as logged out.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        let raw = match self.store.get(keys::USER) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read session user");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user record is corrupt, ignoring");
                None
            }
        }
    }

    /// The full session, when both the token and the user are present.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        Some(Session::new(self.token()?, self.current_user()?))
    }

    /// Forget the session. Failures are logged; logout always succeeds.
    pub fn clear(&self) {
        for key in [keys::TOKEN, keys::USER] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to remove session entry");
            }
        }
    }
}
