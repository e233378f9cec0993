//! Adapters for the Bazaar backend HTTP API.
//!
//! # Architecture
//!
//! - One shared [`ApiClient`] owns the `reqwest` connection pool and the
//!   base URL; the per-area clients wrap it.
//! - Every adapter method issues exactly one request. Nothing is retried
//!   and nothing is cached.
//! - Non-success statuses become an [`ApiError`] carrying the backend's
//!   plain-text message verbatim, so views can show it as-is.
//!
//! # Endpoints
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | POST | /register | none |
//! | POST | /login | none |
//! | GET | /products | none |
//! | POST | /products | bearer |
//! | PUT | /products/{id} | bearer |
//! | DELETE | /products/{id} | bearer |
//! | POST | /orders | bearer |

mod auth;
mod orders;
mod products;

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use thiserror::Error;

use crate::storage::StorageError;

pub use auth::AuthClient;
pub use orders::OrderClient;
pub use products::ProductClient;

/// Longest backend body excerpt written to logs.
const LOG_BODY_LIMIT: usize = 500;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network unreachable, connection reset, or body could not be read.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Credentials rejected (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request rejected by backend validation (other 4xx).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend failure (5xx).
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status returned.
        status: StatusCode,
        /// Body text returned.
        message: String,
    },

    /// Success response did not have the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A bearer call was attempted with no stored session token.
    #[error("You are not logged in.")]
    NotLoggedIn,

    /// The session could not be written to the local store.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Classify a non-success response.
    ///
    /// `body` is the backend's plain-text error. It is trimmed (the backend
    /// terminates error bodies with a newline); when empty, `fallback` is
    /// used instead.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str, fallback: &str) -> Self {
        let trimmed = body.trim();
        let message = if trimmed.is_empty() {
            fallback.to_owned()
        } else {
            trimmed.to_owned()
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            s if s.is_client_error() => Self::Validation(message),
            s => Self::Server { status: s, message },
        }
    }

    /// User-facing message: the backend's text for HTTP failures.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized(message)
            | Self::Conflict(message)
            | Self::Validation(message)
            | Self::Server { message, .. } => message.clone(),
            Self::Transport(_) => "Could not reach the server".to_owned(),
            Self::Parse(_) => "Unexpected response from the server".to_owned(),
            Self::NotLoggedIn => self.to_string(),
            Self::Storage(_) => "Could not save your session locally".to_owned(),
        }
    }

    /// Whether this error indicates a fault outside the user's control.
    #[must_use]
    pub const fn is_server_side(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Server { .. } | Self::Parse(_) | Self::Storage(_)
        )
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Shared HTTP client for the backend API.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:8080/api`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_owned(),
            }),
        }
    }

    /// API base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Absolute URL for an endpoint path such as `products/7`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.inner.client.get(self.endpoint(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.inner.client.post(self.endpoint(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.inner.client.put(self.endpoint(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.inner.client.delete(self.endpoint(path))
    }

    /// Send a request and turn a non-success status into an [`ApiError`].
    ///
    /// `fallback` is the message used when the backend sends an empty
    /// error body.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let excerpt: String = body.chars().take(LOG_BODY_LIMIT).collect();
        if status.is_server_error() {
            tracing::error!(status = %status, body = %excerpt, "Backend returned server error");
        } else {
            tracing::debug!(status = %status, body = %excerpt, "Backend rejected request");
        }

        Err(ApiError::from_status(status, &body, fallback))
    }

    /// Send a request and decode a JSON success body.
    pub(crate) async fn send_json<T>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(request, fallback).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text.chars().take(LOG_BODY_LIMIT).collect::<String>(),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, "bad token", "x"),
            ApiError::Unauthorized(m) if m == "bad token"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "sellers only", "x"),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT, "email taken", "x"),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, "bad", "x"),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "down", "x"),
            ApiError::Server { status, .. } if status == StatusCode::BAD_GATEWAY
        ));
    }

    #[test]
    fn test_from_status_trims_and_falls_back() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            "insufficient stock for product ID 1 (Only 2 left)\n",
            "Checkout failed",
        );
        assert_eq!(
            err.message(),
            "insufficient stock for product ID 1 (Only 2 left)"
        );

        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "  \n", "Registration failed");
        assert_eq!(err.message(), "Registration failed");
    }

    #[test]
    fn test_not_logged_in_message() {
        assert_eq!(ApiError::NotLoggedIn.message(), "You are not logged in.");
        assert!(!ApiError::NotLoggedIn.is_server_side());
    }

    #[test]
    fn test_endpoint_joining() {
        let client = ApiClient::new("http://localhost:8080/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(
            client.endpoint("products/7"),
            "http://localhost:8080/api/products/7"
        );
        assert_eq!(
            client.endpoint("/login"),
            "http://localhost:8080/api/login"
        );
    }
}
