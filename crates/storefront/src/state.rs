//! Application state shared by every view.

use std::sync::Arc;

use crate::api::{ApiClient, AuthClient, OrderClient, ProductClient};
use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::session::SessionStore;
use crate::storage::{FileStore, KeyValueStore};

/// Everything a view needs, created once at startup and passed explicitly.
///
/// The cart is owned here and mutated through `&mut AppState`, so a single
/// front end has exactly one writer. Separate processes sharing a state
/// directory do not see each other's changes until they reload.
#[derive(Debug)]
pub struct AppState {
    /// Session persisted in the key-value store.
    pub sessions: SessionStore,
    /// The shopping cart.
    pub cart: CartStore,
    /// Authentication adapter.
    pub auth: AuthClient,
    /// Product adapter.
    pub products: ProductClient,
    /// Order adapter.
    pub orders: OrderClient,
}

impl AppState {
    /// Build state backed by a [`FileStore`] in the configured state
    /// directory.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let store = Arc::new(FileStore::new(config.state_dir.clone()));
        Self::with_store(config, store)
    }

    /// Build state backed by an arbitrary key-value store.
    #[must_use]
    pub fn with_store(config: &StorefrontConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let api = ApiClient::new(&config.api_url);
        let sessions = SessionStore::new(Arc::clone(&store));
        let cart = CartStore::load(store);

        tracing::debug!(
            api_url = %config.api_url,
            cart_lines = cart.lines().len(),
            "Application state initialized"
        );

        Self {
            sessions: sessions.clone(),
            cart,
            auth: AuthClient::new(api.clone(), sessions.clone()),
            products: ProductClient::new(api.clone(), sessions),
            orders: OrderClient::new(api),
        }
    }
}
