//! Order placement.

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument};

use super::{ApiClient, ApiError};
use crate::models::OrderRequest;

/// Order adapter.
///
/// The backend checks and deducts stock in a single transaction, so an
/// order either goes through whole or fails with a message such as
/// `insufficient stock for product ID 3 (Only 1 left)`.
#[derive(Debug, Clone)]
pub struct OrderClient {
    api: ApiClient,
}

impl OrderClient {
    /// Create an order adapter.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection with its message verbatim, or a
    /// transport error.
    #[instrument(skip(self, token, order), fields(lines = order.items.len()))]
    pub async fn place(&self, token: &SecretString, order: &OrderRequest) -> Result<(), ApiError> {
        self.api
            .send(
                self.api
                    .post("orders")
                    .bearer_auth(token.expose_secret())
                    .json(order),
                "Checkout failed",
            )
            .await?;

        info!("Order placed");
        Ok(())
    }
}
