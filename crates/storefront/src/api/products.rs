//! Product listing and seller CRUD.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};

use bazaar_core::ProductId;

use super::{ApiClient, ApiError};
use crate::models::{NewProduct, Product, ProductPatch};
use crate::session::SessionStore;

/// Product adapter.
///
/// Mutating calls attach the stored bearer token. Whether the caller may
/// touch a given product is decided by the backend only.
#[derive(Debug, Clone)]
pub struct ProductClient {
    api: ApiClient,
    sessions: SessionStore,
}

impl ProductClient {
    /// Create a product adapter.
    #[must_use]
    pub const fn new(api: ApiClient, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    fn bearer(&self) -> Result<SecretString, ApiError> {
        self.sessions.token().ok_or(ApiError::NotLoggedIn)
    }

    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product
    /// list.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        // An empty catalog is sent as `null`
        let products: Option<Vec<Product>> = self
            .api
            .send_json(self.api.get("products"), "Failed to fetch products")
            .await?;
        let products = products.unwrap_or_default();

        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Create a product owned by the logged-in seller.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` without making a request when no token is
    /// stored; otherwise the backend's rejection.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let token = self.bearer()?;

        let created: Product = self
            .api
            .send_json(
                self.api
                    .post("products")
                    .bearer_auth(token.expose_secret())
                    .json(product),
                "Failed to create product",
            )
            .await?;

        info!(product_id = %created.id, "Product created");
        Ok(created)
    }

    /// Update some fields of a product.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` without making a request when no token is
    /// stored; otherwise the backend's rejection.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update(&self, id: ProductId, patch: &ProductPatch) -> Result<(), ApiError> {
        let token = self.bearer()?;

        self.api
            .send(
                self.api
                    .put(&format!("products/{id}"))
                    .bearer_auth(token.expose_secret())
                    .json(patch),
                "Failed to update product",
            )
            .await?;

        info!("Product updated");
        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` without making a request when no token is
    /// stored; otherwise the backend's rejection.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        let token = self.bearer()?;

        self.api
            .send(
                self.api
                    .delete(&format!("products/{id}"))
                    .bearer_auth(token.expose_secret()),
                "Failed to delete product",
            )
            .await?;

        info!("Product deleted");
        Ok(())
    }
}
