//! Cart and checkout commands.

use bazaar_core::ProductId;
use bazaar_storefront::state::AppState;
use bazaar_storefront::views::cart::EMPTY_CART;
use bazaar_storefront::views::{CartPage, ProductGrid, Route};

use super::{CommandError, print_notice};

/// Print the cart's lines and total.
pub fn show(state: &AppState) {
    let Some(view) = CartPage::view(state) else {
        println!("{EMPTY_CART}");
        return;
    };

    for item in &view.items {
        println!(
            "{:>5}  {:<32} {:>4} x {:>10} = {:>10}",
            item.product_id.get(),
            item.name,
            item.quantity,
            item.price,
            item.line_price
        );
    }
    println!("{} item(s), total {}", view.item_count, view.total);
}

/// Look the product up in the catalog and add it to the cart.
pub async fn add(
    state: &mut AppState,
    product_id: ProductId,
    quantity: u32,
) -> Result<(), CommandError> {
    let mut grid = ProductGrid::new();
    grid.load(&state.products).await;
    print_notice(grid.notice())?;

    let Some(notice) = grid.add_to_cart(&mut state.cart, product_id, quantity) else {
        return Err(CommandError::Rejected(format!(
            "No product with id {product_id}"
        )));
    };
    print_notice(Some(notice))
}

pub fn remove(state: &mut AppState, product_id: ProductId) {
    CartPage::remove(state, product_id);
    show(state);
}

pub fn set(state: &mut AppState, product_id: ProductId, quantity: u32) {
    CartPage::set_quantity(state, product_id, quantity);
    show(state);
}

pub fn clear(state: &mut AppState) {
    state.cart.clear();
    println!("{EMPTY_CART}");
}

/// Place the order for the whole cart.
pub async fn checkout(state: &mut AppState) -> Result<(), CommandError> {
    let mut page = CartPage::new();
    let route = page.checkout(state).await;

    match (route, page.notice()) {
        (Some(Route::Login), Some(notice)) => {
            Err(CommandError::redirect(notice.message.clone(), Route::Login))
        }
        (_, notice) => print_notice(notice),
    }
}
