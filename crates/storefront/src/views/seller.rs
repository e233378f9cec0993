//! Seller dashboard: list, create, edit and delete products.
//!
//! The role check here only decides which page to show. The backend
//! enforces ownership on every mutating request.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use bazaar_core::ProductId;

use super::{Notice, Route};
use crate::api::ProductClient;
use crate::error::{add_breadcrumb, report};
use crate::models::{NewProduct, Product, ProductPatch};
use crate::session::SessionStore;

pub const PRODUCT_CREATED: &str = "Product created successfully!";
pub const PRODUCT_UPDATED: &str = "Product updated successfully!";
pub const OPERATION_FAILED: &str = "Operation failed. Please try again.";
pub const PRODUCT_DELETED: &str = "Product deleted.";
pub const DELETE_FAILED: &str = "Could not delete product.";

// =============================================================================
// Product Form
// =============================================================================

/// Errors from parsing the product form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("name is required")]
    MissingName,
    #[error("price must be a non-negative number")]
    InvalidPrice,
    #[error("stock must be a non-negative whole number")]
    InvalidStock,
}

/// The product form, with every field as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub image_url: String,
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.normalize().to_string(),
            stock: product.stock.to_string(),
            image_url: product.image_url.clone(),
        }
    }
}

impl ProductForm {
    /// Parse the form into a product body.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the price is not a decimal
    /// `>= 0`, or the stock is not an integer `>= 0`.
    pub fn parse(&self) -> Result<NewProduct, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let price = Decimal::from_str(self.price.trim()).map_err(|_| FormError::InvalidPrice)?;
        if price.is_sign_negative() {
            return Err(FormError::InvalidPrice);
        }

        let stock = self
            .stock
            .trim()
            .parse::<u32>()
            .map_err(|_| FormError::InvalidStock)?;

        Ok(NewProduct {
            name: name.to_owned(),
            description: self.description.trim().to_owned(),
            price,
            stock,
            image_url: self.image_url.trim().to_owned(),
        })
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Seller dashboard state.
#[derive(Debug, Default)]
pub struct SellerDashboard {
    products: Vec<Product>,
    form: Option<ProductForm>,
    editing: Option<ProductId>,
    pending_delete: Option<ProductId>,
    toast: Option<Notice>,
}

impl SellerDashboard {
    /// Open the dashboard for the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns [`Route::Login`] if nobody is logged in or the user is not
    /// a seller.
    pub fn enter(sessions: &SessionStore) -> Result<Self, Route> {
        match sessions.current_user() {
            Some(user) if user.is_seller() => Ok(Self::default()),
            _ => {
                debug!("Seller dashboard denied, redirecting to login");
                Err(Route::Login)
            }
        }
    }

    /// Reload the product list. Failures are logged and leave the list
    /// empty.
    #[instrument(skip_all)]
    pub async fn load(&mut self, products: &ProductClient) {
        match products.list().await {
            Ok(list) => self.products = list,
            Err(e) => {
                report("Load seller products", &e);
                self.products.clear();
            }
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    /// The open form, for editing its fields.
    pub const fn form_mut(&mut self) -> Option<&mut ProductForm> {
        self.form.as_mut()
    }

    /// Product being edited, `None` when the form creates a new one.
    #[must_use]
    pub const fn editing(&self) -> Option<ProductId> {
        self.editing
    }

    /// Product awaiting delete confirmation.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<ProductId> {
        self.pending_delete
    }

    /// Toast from the last operation.
    #[must_use]
    pub const fn toast(&self) -> Option<&Notice> {
        self.toast.as_ref()
    }

    /// Open an empty form for a new product.
    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = Some(ProductForm::default());
    }

    /// Open the form prefilled with a listed product. Returns `false` if
    /// the product is not listed.
    pub fn open_edit(&mut self, id: ProductId) -> bool {
        let Some(product) = self.products.iter().find(|p| p.id == id) else {
            return false;
        };
        self.form = Some(ProductForm::from(product));
        self.editing = Some(id);
        true
    }

    /// Close the form, discarding its contents.
    pub fn close_form(&mut self) {
        self.form = None;
        self.editing = None;
    }

    /// Create or update the product from the open form.
    ///
    /// A form that does not parse produces the failure toast without a
    /// request. On success the form closes and the list reloads. Returns
    /// whether the product was saved.
    #[instrument(skip_all, fields(editing = ?self.editing))]
    pub async fn submit(&mut self, products: &ProductClient) -> bool {
        let Some(form) = &self.form else {
            return false;
        };

        let product = match form.parse() {
            Ok(product) => product,
            Err(e) => {
                debug!(error = %e, "Product form rejected");
                self.toast = Some(Notice::error(OPERATION_FAILED));
                return false;
            }
        };

        let result = match self.editing {
            Some(id) => products
                .update(id, &ProductPatch::from(product))
                .await
                .map(|()| PRODUCT_UPDATED),
            None => products.create(&product).await.map(|_| PRODUCT_CREATED),
        };

        match result {
            Ok(message) => {
                add_breadcrumb("seller", message, None);
                self.toast = Some(Notice::success(message));
                self.close_form();
                self.load(products).await;
                true
            }
            Err(e) => {
                report("Save product", &e);
                self.toast = Some(Notice::error(OPERATION_FAILED));
                false
            }
        }
    }

    /// Ask for confirmation before deleting a product.
    pub fn request_delete(&mut self, id: ProductId) {
        self.pending_delete = Some(id);
    }

    /// Drop a pending delete.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the product awaiting confirmation. Returns whether it was
    /// deleted; `false` with no request when nothing is pending.
    #[instrument(skip_all, fields(product_id = ?self.pending_delete))]
    pub async fn confirm_delete(&mut self, products: &ProductClient) -> bool {
        let Some(id) = self.pending_delete else {
            return false;
        };

        match products.delete(id).await {
            Ok(()) => {
                let id = id.to_string();
                add_breadcrumb("seller", "Deleted product", Some(&[("product_id", &id)]));
                self.toast = Some(Notice::success(PRODUCT_DELETED));
                self.pending_delete = None;
                self.load(products).await;
                true
            }
            Err(e) => {
                report("Delete product", &e);
                self.toast = Some(Notice::error(DELETE_FAILED));
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use secrecy::SecretString;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use bazaar_core::{Email, Role, UserId};

    use super::*;
    use crate::api::ApiClient;
    use crate::models::User;
    use crate::storage::MemoryStore;

    fn sessions(role: Option<Role>) -> SessionStore {
        let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
        if let Some(role) = role {
            sessions
                .save(
                    &SecretString::from("tok-s".to_owned()),
                    &User {
                        id: UserId::new(2),
                        name: "Sam".to_owned(),
                        email: Email::parse("sam@shop.test").unwrap(),
                        role,
                    },
                )
                .unwrap();
        }
        sessions
    }

    fn client(server: &MockServer) -> ProductClient {
        ProductClient::new(
            ApiClient::new(&format!("{}/api", server.uri())),
            sessions(Some(Role::Seller)),
        )
    }

    async fn mount_listing(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 4, "seller_id": 2, "name": "Lamp", "description": "Brass",
                 "price": 45.5, "stock": 2, "image_url": ""}
            ])))
            .mount(server)
            .await;
    }

    #[test]
    fn test_gate_admits_only_sellers() {
        assert!(SellerDashboard::enter(&sessions(Some(Role::Seller))).is_ok());
        assert_eq!(
            SellerDashboard::enter(&sessions(Some(Role::Customer))).unwrap_err(),
            Route::Login
        );
        assert_eq!(SellerDashboard::enter(&sessions(None)).unwrap_err(), Route::Login);
    }

    #[test]
    fn test_form_parsing() {
        let form = ProductForm {
            name: " Lamp ".to_owned(),
            price: "45.50".to_owned(),
            stock: "2".to_owned(),
            ..ProductForm::default()
        };
        let product = form.parse().unwrap();
        assert_eq!(product.name, "Lamp");
        assert_eq!(product.price, Decimal::new(4550, 2));
        assert_eq!(product.stock, 2);

        let bad_price = ProductForm {
            price: "-1".to_owned(),
            ..form.clone()
        };
        assert_eq!(bad_price.parse().unwrap_err(), FormError::InvalidPrice);

        let bad_stock = ProductForm {
            stock: "1.5".to_owned(),
            ..form
        };
        assert_eq!(bad_stock.parse().unwrap_err(), FormError::InvalidStock);
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut dashboard = SellerDashboard::default();
        dashboard.open_create();
        dashboard.form_mut().unwrap().name = "Lamp".to_owned();
        dashboard.form_mut().unwrap().price = "abc".to_owned();

        assert!(!dashboard.submit(&client(&server)).await);
        assert_eq!(dashboard.toast(), Some(&Notice::error(OPERATION_FAILED)));
        assert!(dashboard.form().is_some());
    }

    #[tokio::test]
    async fn test_edit_sends_update_and_reloads() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        Mock::given(method("PUT"))
            .and(path("/api/products/4"))
            .and(body_json(serde_json::json!({
                "name": "Lamp",
                "description": "Brass",
                "price": 40.0,
                "stock": 2,
                "image_url": ""
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let products = client(&server);
        let mut dashboard = SellerDashboard::default();
        dashboard.load(&products).await;
        assert!(dashboard.open_edit(ProductId::new(4)));
        assert_eq!(dashboard.form().unwrap().price, "45.5");

        dashboard.form_mut().unwrap().price = "40".to_owned();
        assert!(dashboard.submit(&products).await);
        assert_eq!(dashboard.toast(), Some(&Notice::success(PRODUCT_UPDATED)));
        assert!(dashboard.form().is_none());
        assert_eq!(dashboard.products().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/api/products/4"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .expect(1)
            .mount(&server)
            .await;

        let products = client(&server);
        let mut dashboard = SellerDashboard::default();
        assert!(!dashboard.confirm_delete(&products).await);

        dashboard.request_delete(ProductId::new(4));
        dashboard.cancel_delete();
        assert!(dashboard.pending_delete().is_none());

        dashboard.request_delete(ProductId::new(4));
        assert!(!dashboard.confirm_delete(&products).await);
        assert_eq!(dashboard.toast(), Some(&Notice::error(DELETE_FAILED)));
        assert_eq!(dashboard.pending_delete(), Some(ProductId::new(4)));
    }
}
