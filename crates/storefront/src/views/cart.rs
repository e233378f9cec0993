//! Cart page.

use tracing::instrument;

use bazaar_core::{Price, ProductId};

use super::{Notice, Route};
use crate::cart::CartLine;
use crate::checkout::{CheckoutOutcome, checkout};
use crate::error::report;
use crate::state::AppState;

/// Shown instead of the line list when the cart has no lines.
pub const EMPTY_CART: &str = "Your cart is empty.";

/// Shown when checkout needs a session.
pub const LOGIN_REQUIRED: &str = "Please login to checkout";

/// Shown after the order was accepted.
pub const ORDER_PLACED: &str = "Order Placed Successfully! Inventory updated.";

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image_url: Option<String>,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            quantity: line.quantity,
            price: Price::usd(line.unit_price).to_string(),
            line_price: Price::usd(line.line_total()).to_string(),
            image_url: line.image_url.clone(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

/// Cart page state.
///
/// [`CartPage::checkout`] holds the page mutably until the order call
/// returns, so no second checkout can start while one is pending.
#[derive(Debug, Default)]
pub struct CartPage {
    notice: Option<Notice>,
}

impl CartPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message from the last checkout.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Current cart contents, or `None` when the cart is empty and
    /// [`EMPTY_CART`] should be shown.
    #[must_use]
    pub fn view(state: &AppState) -> Option<CartView> {
        if state.cart.is_empty() {
            return None;
        }
        Some(CartView {
            items: state.cart.lines().iter().map(CartItemView::from).collect(),
            total: Price::usd(state.cart.total()).to_string(),
            item_count: state.cart.count(),
        })
    }

    /// Change a line's quantity; 0 removes it.
    pub fn set_quantity(state: &mut AppState, product_id: ProductId, quantity: u32) {
        state.cart.set_quantity(product_id, quantity);
    }

    /// Remove a line.
    pub fn remove(state: &mut AppState, product_id: ProductId) {
        state.cart.remove_item(product_id);
    }

    /// Place the order.
    ///
    /// Returns where to navigate next: the login page when there is no
    /// session, home after a successful order. On failure the cart is
    /// left as it was and `None` is returned with the backend's reason in
    /// the notice.
    #[instrument(skip_all)]
    pub async fn checkout(&mut self, state: &mut AppState) -> Option<Route> {
        self.notice = None;
        let result = checkout(&mut state.cart, &state.sessions, &state.orders).await;

        match result {
            Ok(CheckoutOutcome::RedirectToLogin) => {
                self.notice = Some(Notice::error(LOGIN_REQUIRED));
                Some(Route::Login)
            }
            Ok(CheckoutOutcome::EmptyCart) => {
                self.notice = Some(Notice::error(EMPTY_CART));
                None
            }
            Ok(CheckoutOutcome::Placed) => {
                self.notice = Some(Notice::success(ORDER_PLACED));
                Some(Route::Home)
            }
            Err(e) => {
                report("Checkout", &e);
                self.notice = Some(Notice::error(format!("Checkout Failed: {}", e.message())));
                None
            }
        }
    }
}
