//! Headless view controllers.
//!
//! Each controller holds one page's state and makes its decisions: which
//! message to show, where to navigate next. Rendering is left to the front
//! end. Controllers never call each other; they return a [`Route`] and let
//! the front end switch pages.

pub mod cart;
pub mod login;
pub mod navbar;
pub mod register;
pub mod seller;
pub mod storefront;

use bazaar_core::Role;

pub use cart::CartPage;
pub use login::LoginView;
pub use navbar::Navbar;
pub use register::RegisterView;
pub use seller::{FormError, ProductForm, SellerDashboard};
pub use storefront::ProductGrid;

/// Pages of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Product grid.
    Home,
    Login,
    Register,
    Cart,
    /// Seller dashboard.
    Seller,
    /// Admin area (served elsewhere).
    Admin,
}

impl Route {
    /// URL path of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Cart => "/cart",
            Self::Seller => "/seller",
            Self::Admin => "/admin",
        }
    }

    /// Where a user lands after logging in.
    #[must_use]
    pub const fn landing_for(role: Role) -> Self {
        match role {
            Role::Seller => Self::Seller,
            Role::Admin => Self::Admin,
            Role::Customer => Self::Home,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Tone of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message for the user: an inline form error or a transient toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// A success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// An error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Whether this is an error message.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_routes_by_role() {
        assert_eq!(Route::landing_for(Role::Seller).path(), "/seller");
        assert_eq!(Route::landing_for(Role::Admin).path(), "/admin");
        assert_eq!(Route::landing_for(Role::Customer).path(), "/");
    }

    #[test]
    fn test_notice_kinds() {
        assert!(Notice::error("nope").is_error());
        assert!(!Notice::success("yay").is_error());
        assert_eq!(Notice::success("yay").to_string(), "yay");
    }
}
