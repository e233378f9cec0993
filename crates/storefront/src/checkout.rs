//! Checkout: turn the cart into an order.
//!
//! The rules:
//! - no session: ask the user to log in, touch nothing, send nothing
//! - empty cart: nothing to order, send nothing
//! - backend accepts: clear the cart
//! - backend rejects (e.g. insufficient stock): keep the cart exactly as it
//!   was so the user can adjust and retry

use tracing::{info, instrument};

use crate::api::{ApiError, OrderClient};
use crate::cart::CartStore;
use crate::models::OrderRequest;
use crate::session::SessionStore;

/// Result of a checkout attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// No session; the user must log in first.
    RedirectToLogin,
    /// The cart has no lines.
    EmptyCart,
    /// The order was accepted and the cart cleared.
    Placed,
}

/// Submit the cart as an order.
///
/// # Errors
///
/// Returns the backend's rejection (message verbatim) or a transport
/// error. The cart is unchanged in that case.
#[instrument(skip_all, fields(lines = cart.lines().len()))]
pub async fn checkout(
    cart: &mut CartStore,
    sessions: &SessionStore,
    orders: &OrderClient,
) -> Result<CheckoutOutcome, ApiError> {
    let Some(token) = sessions.token() else {
        info!("Checkout without session, redirecting to login");
        return Ok(CheckoutOutcome::RedirectToLogin);
    };

    if cart.is_empty() {
        return Ok(CheckoutOutcome::EmptyCart);
    }

    let order = OrderRequest {
        items: cart.order_items(),
    };
    orders.place(&token, &order).await?;

    cart.clear();
    Ok(CheckoutOutcome::Placed)
}
