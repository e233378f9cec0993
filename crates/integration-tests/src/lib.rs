//! Integration tests for the Bazaar storefront.
//!
//! Tests drive the real library against a `wiremock` backend and keep the
//! session and cart in a throwaway state directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use rust_decimal::Decimal;
use secrecy::SecretString;
use tempfile::TempDir;
use wiremock::MockServer;

use bazaar_core::{Email, ProductId, Role, UserId};
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::models::{Product, User};
use bazaar_storefront::state::AppState;

/// A mock backend plus a state directory.
pub struct TestContext {
    pub server: MockServer,
    pub state_dir: TempDir,
}

impl TestContext {
    /// Start a fresh mock backend with an empty state directory.
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            state_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Configuration pointing at the mock backend and the state directory.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            state_dir: self.state_dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        }
        .with_api_url(&format!("{}/api", self.server.uri()))
        .unwrap()
    }

    /// Application state backed by files in the state directory. Calling
    /// this twice simulates a restart.
    #[must_use]
    pub fn state(&self) -> AppState {
        AppState::new(&self.config())
    }
}

/// Store a session as if the user had logged in.
pub fn log_in(state: &AppState, role: Role) -> User {
    let user = user(role);
    state
        .sessions
        .save(&SecretString::from("test-token".to_owned()), &user)
        .unwrap();
    user
}

/// A user with the given role.
#[must_use]
pub fn user(role: Role) -> User {
    User {
        id: UserId::new(7),
        name: "Robin".to_owned(),
        email: Email::parse("robin@shop.test").unwrap(),
        role,
    }
}

/// A product priced `cents / 100`.
#[must_use]
pub fn product(id: i64, name: &str, cents: i64, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        seller_id: UserId::new(2),
        name: name.to_owned(),
        description: String::new(),
        price: Decimal::new(cents, 2),
        stock,
        image_url: String::new(),
    }
}

/// The JSON the backend sends for `product`.
#[must_use]
pub fn product_json(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id.get(),
        "seller_id": product.seller_id.get(),
        "name": product.name,
        "description": product.description,
        "price": product.price.to_string().parse::<f64>().unwrap(),
        "stock": product.stock,
        "image_url": product.image_url,
    })
}
