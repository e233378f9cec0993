//! Registration page.

use secrecy::SecretString;
use tracing::instrument;

use bazaar_core::{Email, Role};

use super::{Notice, Route};
use crate::api::{ApiError, AuthClient};
use crate::error::{add_breadcrumb, report};

/// Shown when the backend gives no reason.
pub const REGISTER_FAILED: &str = "Something went wrong";

/// Shown after a successful registration.
pub const REGISTERED: &str = "Account created! Please login.";

/// Registration form state.
#[derive(Debug)]
pub struct RegisterView {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
    notice: Option<Notice>,
}

impl Default for RegisterView {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterView {
    /// An empty form with the customer role preselected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: SecretString::from(String::new()),
            role: Role::Customer,
            notice: None,
        }
    }

    /// Result of the last submit.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Create the account.
    ///
    /// Returns [`Route::Login`] on success. On failure the error notice is
    /// set and `None` is returned. A malformed email is rejected before
    /// any request is made.
    #[instrument(skip_all, fields(role = %self.role))]
    pub async fn submit(&mut self, auth: &AuthClient) -> Option<Route> {
        self.notice = None;

        let email = match Email::parse(&self.email) {
            Ok(email) => email,
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                return None;
            }
        };

        add_breadcrumb("auth", "Registration submitted", Some(&[("role", self.role.as_str())]));

        let result = auth
            .register(self.name.trim(), &email, &self.password, self.role)
            .await;

        match result {
            Ok(()) => {
                self.notice = Some(Notice::success(REGISTERED));
                Some(Route::Login)
            }
            Err(e) => {
                report("Registration", &e);
                self.notice = Some(Notice::error(failure_message(&e)));
                None
            }
        }
    }
}

/// The backend's own text for HTTP rejections, a generic message otherwise.
fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized(message)
        | ApiError::Conflict(message)
        | ApiError::Validation(message)
        | ApiError::Server { message, .. }
            if !message.trim().is_empty() =>
        {
            message.clone()
        }
        _ => REGISTER_FAILED.to_owned(),
    }
}
