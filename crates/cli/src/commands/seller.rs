//! Seller product management.

use clap::Args;

use bazaar_core::{Price, ProductId};
use bazaar_storefront::state::AppState;
use bazaar_storefront::views::{ProductForm, SellerDashboard};

use super::{CommandError, print_notice};

/// Product fields. On update, omitted fields keep their current value.
#[derive(Debug, Clone, Default, Args)]
pub struct ProductFields {
    /// Product name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Unit price, e.g. 12.50
    #[arg(short, long)]
    pub price: Option<String>,

    /// Units in stock
    #[arg(short, long)]
    pub stock: Option<String>,

    /// Image URL
    #[arg(short, long)]
    pub image_url: Option<String>,
}

impl ProductFields {
    fn apply(self, form: &mut ProductForm) {
        let Self {
            name,
            description,
            price,
            stock,
            image_url,
        } = self;
        let fields = [
            (&mut form.name, name),
            (&mut form.description, description),
            (&mut form.price, price),
            (&mut form.stock, stock),
            (&mut form.image_url, image_url),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Enter the dashboard and load the product list.
pub async fn open(state: &AppState) -> Result<SellerDashboard, CommandError> {
    let mut dashboard = SellerDashboard::enter(&state.sessions).map_err(|route| {
        CommandError::redirect("Log in with a seller account first", route)
    })?;
    dashboard.load(&state.products).await;
    Ok(dashboard)
}

pub fn list(dashboard: &SellerDashboard) {
    if dashboard.products().is_empty() {
        println!("Your inventory is empty.");
        return;
    }
    for product in dashboard.products() {
        println!(
            "{:>5}  {:<32} {:>10}  {} units",
            product.id.get(),
            product.name,
            Price::usd(product.price).to_string(),
            product.stock
        );
    }
}

pub async fn create(
    dashboard: &mut SellerDashboard,
    state: &AppState,
    fields: ProductFields,
) -> Result<(), CommandError> {
    dashboard.open_create();
    if let Some(form) = dashboard.form_mut() {
        fields.apply(form);
    }
    dashboard.submit(&state.products).await;
    print_notice(dashboard.toast())
}

pub async fn update(
    dashboard: &mut SellerDashboard,
    state: &AppState,
    product_id: ProductId,
    fields: ProductFields,
) -> Result<(), CommandError> {
    if !dashboard.open_edit(product_id) {
        return Err(CommandError::Rejected(format!(
            "No product with id {product_id}"
        )));
    }
    if let Some(form) = dashboard.form_mut() {
        fields.apply(form);
    }
    dashboard.submit(&state.products).await;
    print_notice(dashboard.toast())
}

pub async fn delete(
    dashboard: &mut SellerDashboard,
    state: &AppState,
    product_id: ProductId,
    confirmed: bool,
) -> Result<(), CommandError> {
    dashboard.request_delete(product_id);
    if !confirmed {
        dashboard.cancel_delete();
        println!("Pass --yes to delete product {product_id}");
        return Ok(());
    }
    dashboard.confirm_delete(&state.products).await;
    print_notice(dashboard.toast())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_omitted_fields() {
        let mut form = ProductForm {
            name: "Lamp".to_owned(),
            price: "45.5".to_owned(),
            stock: "2".to_owned(),
            ..ProductForm::default()
        };
        ProductFields {
            price: Some("40".to_owned()),
            ..ProductFields::default()
        }
        .apply(&mut form);

        assert_eq!(form.name, "Lamp");
        assert_eq!(form.price, "40");
        assert_eq!(form.stock, "2");
    }
}
