//! Catalog listing.

use bazaar_storefront::state::AppState;
use bazaar_storefront::views::ProductGrid;

use super::{CommandError, print_notice};

/// Print every product as one line.
pub async fn list(state: &AppState) -> Result<(), CommandError> {
    let mut grid = ProductGrid::new();
    grid.load(&state.products).await;
    print_notice(grid.notice())?;

    let cards = grid.cards();
    if cards.is_empty() {
        println!("No products yet.");
        return Ok(());
    }

    for card in cards {
        let stock = if card.stock == 0 {
            "out of stock".to_owned()
        } else {
            format!("{} in stock", card.stock)
        };
        println!("{:>5}  {:<32} {:>10}  {stock}", card.id.get(), card.name, card.price);
    }
    Ok(())
}
