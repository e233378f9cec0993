//! Wire types shared with the backend.
//!
//! Field names follow the backend's snake_case JSON. Unknown fields are
//! ignored so that backend additions do not break the client.

pub mod order;
pub mod product;
pub mod user;

pub use order::{OrderItem, OrderRequest};
pub use product::{NewProduct, Product, ProductPatch};
pub use user::{AuthResponse, User};
