//! Account types returned by the authentication endpoints.

use serde::{Deserialize, Serialize};

use bazaar_core::{Email, Role, UserId};

/// A logged-in user as reported by the backend.
///
/// The backend's user record also carries a password field; it is never
/// read or stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}

impl User {
    /// Whether the seller dashboard should be shown to this user.
    #[must_use]
    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }
}

/// Successful response of `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
