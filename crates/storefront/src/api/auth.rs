//! Registration, login and logout.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{info, instrument};

use bazaar_core::{Email, Role};

use super::{ApiClient, ApiError};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::{AuthResponse, User};
use crate::session::{Session, SessionStore};

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Authentication adapter.
///
/// Owns the session lifecycle: a successful login writes the session,
/// logout deletes it.
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
    sessions: SessionStore,
}

impl AuthClient {
    /// Create an authentication adapter.
    #[must_use]
    pub const fn new(api: ApiClient, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    /// Create an account. The user still has to log in afterwards.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` or `Validation` carrying the backend's message
    /// (or "Registration failed" if it sent none), or `Transport`.
    #[instrument(skip(self, password), fields(email = %email, role = %role))]
    pub async fn register(
        &self,
        name: &str,
        email: &Email,
        password: &SecretString,
        role: Role,
    ) -> Result<(), ApiError> {
        let body = RegisterRequest {
            name,
            email: email.as_str(),
            password: password.expose_secret(),
            role,
        };

        self.api
            .send(self.api.post("register").json(&body), "Registration failed")
            .await?;

        info!("Account registered");
        Ok(())
    }

    /// Log in and persist the resulting session.
    ///
    /// On failure nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for any rejected login, `Server` or
    /// `Transport` for backend faults, and `Storage` if the session could
    /// not be saved.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Session, ApiError> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };

        let response: AuthResponse = self
            .api
            .send_json(self.api.post("login").json(&body), "Invalid credentials")
            .await
            .map_err(|e| match e {
                ApiError::Validation(message) | ApiError::Conflict(message) => {
                    ApiError::Unauthorized(message)
                }
                other => other,
            })?;

        let token = SecretString::from(response.token);
        self.sessions.save(&token, &response.user)?;
        set_sentry_user(&response.user.id, Some(response.user.email.as_str()));

        info!(user_id = %response.user.id, role = %response.user.role, "Logged in");
        Ok(Session::new(token, response.user))
    }

    /// Forget the session. Always succeeds.
    pub fn logout(&self) {
        self.sessions.clear();
        clear_sentry_user();
        info!("Logged out");
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.sessions.current_user()
    }

    /// The session store this adapter writes to.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
