//! Navigation bar.

use tokio::sync::watch;

use super::Route;
use crate::cart::CartSummary;
use crate::error::add_breadcrumb;
use crate::models::User;
use crate::state::AppState;

/// Navigation bar state: who is logged in and the cart badge.
///
/// The badge follows the cart through a subscription, so it stays current
/// without the page re-reading the cart.
#[derive(Debug)]
pub struct Navbar {
    user: Option<User>,
    cart: watch::Receiver<CartSummary>,
}

impl Navbar {
    /// Build the navbar from the current state.
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            user: state.sessions.current_user(),
            cart: state.cart.subscribe(),
        }
    }

    /// Logged-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart.borrow().count
    }

    /// Whether the navbar is drawn on `route`. The login and register
    /// pages have none.
    #[must_use]
    pub const fn visible_on(route: Route) -> bool {
        !matches!(route, Route::Login | Route::Register)
    }

    /// Pages linked from the navbar, in display order.
    ///
    /// The seller dashboard is only linked for sellers. Logged-out visitors
    /// get login and register instead.
    #[must_use]
    pub fn links(&self) -> Vec<Route> {
        let mut links = vec![Route::Home, Route::Cart];
        match &self.user {
            Some(user) if user.is_seller() => links.push(Route::Seller),
            Some(_) => {}
            None => links.extend([Route::Login, Route::Register]),
        }
        links
    }

    /// Log out and go to the login page.
    pub fn logout(&mut self, state: &AppState) -> Route {
        add_breadcrumb("auth", "Logout clicked", None);
        state.auth.logout();
        self.user = None;
        Route::Login
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use secrecy::SecretString;

    use bazaar_core::{Email, ProductId, Role, UserId};

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::models::Product;
    use crate::storage::MemoryStore;

    #[test]
    fn test_badge_follows_cart_and_logout_clears_user() {
        let mut state = AppState::with_store(
            &StorefrontConfig::default(),
            Arc::new(MemoryStore::new()),
        );
        state
            .sessions
            .save(
                &SecretString::from("tok".to_owned()),
                &User {
                    id: UserId::new(1),
                    name: "Ana".to_owned(),
                    email: Email::parse("ana@shop.test").unwrap(),
                    role: Role::Customer,
                },
            )
            .unwrap();

        let mut navbar = Navbar::new(&state);
        assert_eq!(navbar.user().unwrap().name, "Ana");
        assert_eq!(navbar.cart_count(), 0);

        state.cart.add_item(
            &Product {
                id: ProductId::new(5),
                seller_id: UserId::new(2),
                name: "Pen".to_owned(),
                description: String::new(),
                price: Decimal::ONE,
                stock: 1,
                image_url: String::new(),
            },
            3,
        );
        assert_eq!(navbar.cart_count(), 3);

        assert_eq!(navbar.logout(&state), Route::Login);
        assert!(navbar.user().is_none());
        assert!(state.sessions.load().is_none());
    }

    fn state_as(role: Option<Role>) -> AppState {
        let state = AppState::with_store(
            &StorefrontConfig::default(),
            Arc::new(MemoryStore::new()),
        );
        if let Some(role) = role {
            state
                .sessions
                .save(
                    &SecretString::from("tok".to_owned()),
                    &User {
                        id: UserId::new(1),
                        name: "Ana".to_owned(),
                        email: Email::parse("ana@shop.test").unwrap(),
                        role,
                    },
                )
                .unwrap();
        }
        state
    }

    #[test]
    fn test_hidden_on_auth_pages() {
        assert!(!Navbar::visible_on(Route::Login));
        assert!(!Navbar::visible_on(Route::Register));
        assert!(Navbar::visible_on(Route::Home));
        assert!(Navbar::visible_on(Route::Cart));
        assert!(Navbar::visible_on(Route::Seller));
    }

    #[test]
    fn test_dashboard_link_only_for_sellers() {
        let seller = Navbar::new(&state_as(Some(Role::Seller)));
        assert_eq!(seller.links(), vec![Route::Home, Route::Cart, Route::Seller]);

        let customer = Navbar::new(&state_as(Some(Role::Customer)));
        assert_eq!(customer.links(), vec![Route::Home, Route::Cart]);

        let admin = Navbar::new(&state_as(Some(Role::Admin)));
        assert!(!admin.links().contains(&Route::Seller));

        let visitor = Navbar::new(&state_as(None));
        assert_eq!(
            visitor.links(),
            vec![Route::Home, Route::Cart, Route::Login, Route::Register]
        );
    }
}
