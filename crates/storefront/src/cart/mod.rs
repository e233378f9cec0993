//! Client-side shopping cart.
//!
//! The cart is an ordered list of lines keyed by product id. It is kept in
//! memory, written through to the key-value store after every change, and
//! restored from it on startup.
//!
//! Invariants:
//! - at most one line per product id
//! - every line has a quantity of at least 1
//! - count and total are computed from the lines on every call
//!
//! None of the operations can fail. A failed write to the store is logged
//! and the in-memory cart stays authoritative.

mod line;

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, warn};

use bazaar_core::ProductId;

use crate::error::add_breadcrumb;
use crate::models::{OrderItem, Product};
use crate::storage::{KeyValueStore, keys};

pub use line::{CartLine, CartSummary};

/// The shopping cart.
pub struct CartStore {
    lines: Vec<CartLine>,
    store: Arc<dyn KeyValueStore>,
    changes: watch::Sender<CartSummary>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Restore the cart persisted in `store`, or start empty.
    ///
    /// A corrupt persisted cart is logged and discarded. Duplicate lines
    /// (which this type never writes) are merged on the way in.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let lines = match store.get(keys::CART) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => normalize(lines),
                Err(e) => {
                    warn!(error = %e, "Persisted cart is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                Vec::new()
            }
        };

        let (changes, _) = watch::channel(summarize(&lines));
        debug!(lines = lines.len(), "Cart loaded");
        Self {
            lines,
            store,
            changes,
        }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of `product`.
    ///
    /// Adds to the existing line for the product, or appends a new line.
    /// Stock is not checked here; the backend checks it at checkout. A
    /// quantity of 0 does nothing. A product with a negative price, or an
    /// add that would push the cart total past what a `Decimal` holds, is
    /// refused and logged.
    ///
    /// Returns whether the cart changed.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        if product.price.is_sign_negative() {
            warn!(product_id = %product.id, price = %product.price, "Refusing to add product with negative price");
            return false;
        }

        let mut next = self.lines.clone();
        match next.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => next.push(CartLine::from_product(product, quantity)),
        }
        if checked_total(&next).is_none() {
            warn!(product_id = %product.id, quantity, "Refusing add, cart total would overflow");
            return false;
        }
        self.lines = next;

        let id = product.id.to_string();
        let qty = quantity.to_string();
        add_breadcrumb(
            "cart",
            "Added item",
            Some(&[("product_id", &id), ("quantity", &qty)]),
        );
        self.changed();
        true
    }

    /// Remove the line for `product_id`. Missing ids are ignored.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() == before {
            return;
        }

        let id = product_id.to_string();
        add_breadcrumb("cart", "Removed item", Some(&[("product_id", &id)]));
        self.changed();
    }

    /// Replace the quantity of an existing line; 0 removes it. Missing ids
    /// are ignored, as is a quantity whose total would overflow.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }

        let mut next = self.lines.clone();
        let Some(line) = next.iter_mut().find(|l| l.product_id == product_id) else {
            return;
        };
        if line.quantity == quantity {
            return;
        }
        line.quantity = quantity;
        if checked_total(&next).is_none() {
            warn!(product_id = %product_id, quantity, "Refusing quantity, cart total would overflow");
            return;
        }
        self.lines = next;
        self.changed();
    }

    /// Empty the cart and delete the persisted copy.
    pub fn clear(&mut self) {
        self.lines.clear();
        if let Err(e) = self.store.remove(keys::CART) {
            warn!(error = %e, "Failed to remove persisted cart");
        }
        add_breadcrumb("cart", "Cleared cart", None);
        self.notify();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` across all lines.
    ///
    /// Saturates at [`Decimal::MAX`], which only a cart built outside
    /// [`CartStore`] can reach.
    #[must_use]
    pub fn total(&self) -> Decimal {
        checked_total(&self.lines).unwrap_or(Decimal::MAX)
    }

    /// `(product_id, quantity)` pairs for an order, in cart order.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|l| OrderItem {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect()
    }

    /// Receive a fresh [`CartSummary`] after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSummary> {
        self.changes.subscribe()
    }

    fn changed(&self) {
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.lines)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.store
                    .set(keys::CART, &json)
                    .map_err(|e| e.to_string())
            });

        if let Err(error) = result {
            warn!(%error, "Failed to persist cart");
        }
    }

    fn notify(&self) {
        self.changes.send_replace(summarize(&self.lines));
    }
}

fn summarize(lines: &[CartLine]) -> CartSummary {
    CartSummary {
        count: lines.iter().map(|l| u64::from(l.quantity)).sum(),
        total: checked_total(lines).unwrap_or(Decimal::MAX),
    }
}

/// Sum of line totals, or `None` if any step overflows.
fn checked_total(lines: &[CartLine]) -> Option<Decimal> {
    lines.iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line.checked_line_total()?)
    })
}

/// Merge duplicate product ids (keeping the first line's position) and drop
/// lines that are empty, have a negative price, or would overflow the total.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            continue;
        }
        if line.unit_price.is_sign_negative() {
            warn!(product_id = %line.product_id, "Dropping persisted cart line with negative price");
            continue;
        }

        let mut next = merged.clone();
        match next.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => next.push(line),
        }
        match checked_total(&next) {
            Some(_) => merged = next,
            None => warn!("Dropping persisted cart line, total would overflow"),
        }
    }
    merged
}
