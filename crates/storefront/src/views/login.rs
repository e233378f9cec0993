//! Login page.

use secrecy::SecretString;
use tracing::instrument;

use super::Route;
use crate::api::AuthClient;
use crate::error::{add_breadcrumb, report};

/// Shown for every failed login, whatever the cause.
pub const LOGIN_FAILED: &str = "Invalid email or password";

/// Login form state.
#[derive(Debug)]
pub struct LoginView {
    pub email: String,
    pub password: SecretString,
    error: Option<String>,
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginView {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: SecretString::from(String::new()),
            error: None,
        }
    }

    /// Inline error from the last submit.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Log in with the form's credentials.
    ///
    /// Returns the page to navigate to, chosen by the user's role, or `None`
    /// if the login failed and the inline error is set.
    #[instrument(skip_all, fields(email = %self.email))]
    pub async fn submit(&mut self, auth: &AuthClient) -> Option<Route> {
        self.error = None;
        add_breadcrumb("auth", "Login submitted", None);

        match auth.login(self.email.trim(), &self.password).await {
            Ok(session) => Some(Route::landing_for(session.user().role)),
            Err(e) => {
                report("Login", &e);
                self.error = Some(LOGIN_FAILED.to_owned());
                None
            }
        }
    }
}
