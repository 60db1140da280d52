//! Cart inspection and reset.

use std::sync::Arc;

use pharmacart_core::{KeyValueStore, Price};
use pharmacart_storefront::services::CartStore;

/// Cart lines followed by subtotal, delivery, and total.
#[must_use]
pub fn show(storage: Arc<dyn KeyValueStore>) -> String {
    let store = CartStore::load(storage);
    let cart = store.cart();
    if cart.is_empty() {
        return "Cart is empty.\n".to_string();
    }

    let mut out: String = cart
        .lines()
        .iter()
        .map(|line| {
            format!(
                "{:>3}  {:<20} x{:<3} {:>10}\n",
                line.id(),
                line.item.name,
                line.quantity,
                line.line_price().display()
            )
        })
        .collect();
    let totals = store.totals();
    out.push_str(&format!(
        "Subtotal: {}\nDelivery: {}\nTotal:    {}\n",
        Price::inr(totals.subtotal),
        Price::inr(totals.delivery),
        Price::inr(totals.total)
    ));
    out
}

/// Empty the cart.
#[must_use]
pub fn clear(storage: Arc<dyn KeyValueStore>) -> String {
    let mut store = CartStore::load(storage);
    let count = store.item_count();
    store.clear();
    tracing::info!(items = count, "Cart cleared");
    format!("Removed {count} item(s) from the cart.\n")
}
