//! Cart store synchronized to the `cart` record.

use std::sync::Arc;

use pharmacart_core::storage::CART_KEY;
use pharmacart_core::{Cart, CartError, CatalogItem, KeyValueStore, OrderTotals, ProductId};

use super::{delete_record, load_record, save_record};

/// The shopper's cart, rewritten to storage after every mutation.
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    cart: Cart,
}

impl CartStore {
    /// Load the persisted cart. A malformed record yields an empty cart.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let cart = load_record(storage.as_ref(), CART_KEY).unwrap_or_default();
        Self { storage, cart }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Units across all lines, for the header badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        self.cart.totals()
    }

    /// Add one unit of `item`.
    pub fn add_item(&mut self, item: &CatalogItem) {
        self.cart.add(item);
        tracing::debug!(product_id = %item.id, "Added to cart");
        self.save();
    }

    /// Set the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns the [`CartError`] from the cart; nothing is written then.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Result<(), CartError> {
        self.cart.set_quantity(id, quantity)?;
        self.save();
        Ok(())
    }

    /// Remove the line for `id`, if present.
    pub fn remove_item(&mut self, id: ProductId) {
        self.cart.remove(id);
        self.save();
    }

    /// Empty the cart and delete the `cart` record.
    pub fn clear(&mut self) {
        self.cart.clear();
        delete_record(self.storage.as_ref(), CART_KEY);
    }

    fn save(&self) {
        save_record(self.storage.as_ref(), CART_KEY, &self.cart);
    }
}
