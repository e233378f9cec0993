//! Home page: the product grid.

use tracing::instrument;

use bazaar_core::{Price, ProductId};

use super::Notice;
use crate::api::ProductClient;
use crate::cart::CartStore;
use crate::error::report;
use crate::models::Product;

/// Shown when the product list could not be loaded.
pub const FETCH_FAILED: &str = "Failed to fetch products";

/// Shown when the cart refuses an add.
pub const ADD_FAILED: &str = "Could not add product to cart";

/// One product card, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Formatted price, e.g. `$9.99`.
    pub price: String,
    pub stock: u32,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: Price::usd(product.price).to_string(),
            stock: product.stock,
            image_url: product.image().map(str::to_owned),
        }
    }
}

/// Product grid state.
#[derive(Debug, Default)]
pub struct ProductGrid {
    products: Vec<Product>,
    notice: Option<Notice>,
}

impl ProductGrid {
    /// An empty grid; call [`ProductGrid::load`] to fill it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the product list. On failure the grid is emptied and an error
    /// notice set.
    #[instrument(skip_all)]
    pub async fn load(&mut self, products: &ProductClient) {
        match products.list().await {
            Ok(list) => {
                self.products = list;
                self.notice = None;
            }
            Err(e) => {
                report("Fetch products", &e);
                self.products.clear();
                self.notice = Some(Notice::error(FETCH_FAILED));
            }
        }
    }

    /// Products currently shown.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Display cards for the current products.
    #[must_use]
    pub fn cards(&self) -> Vec<ProductCard> {
        self.products.iter().map(ProductCard::from).collect()
    }

    /// Message from the last action.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Put `quantity` units of a listed product in the cart.
    ///
    /// Returns `None` if the product is not in the grid.
    pub fn add_to_cart(
        &mut self,
        cart: &mut CartStore,
        id: ProductId,
        quantity: u32,
    ) -> Option<&Notice> {
        let product = self.products.iter().find(|p| p.id == id)?;
        self.notice = Some(if cart.add_item(product, quantity) {
            Notice::success(format!("Added {} to cart", product.name))
        } else {
            Notice::error(ADD_FAILED)
        });
        self.notice.as_ref()
    }
}
