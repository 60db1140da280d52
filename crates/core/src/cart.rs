//! Cart line items and the deduplicated line collection.
//!
//! [`Cart`] owns the invariants: at most one line per product id, and every
//! line has a quantity of at least one. Persistence is layered on top by the
//! storefront's cart store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogItem;
use crate::order::OrderTotals;
use crate::types::{Price, ProductId};

/// Errors reported by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Requested quantity is below one or does not fit a line quantity.
    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(i64),

    /// No line for the product is in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Persisted lines repeat a product id.
    #[error("product {0} appears in more than one cart line")]
    DuplicateLine(ProductId),

    /// Persisted line has a zero quantity.
    #[error("product {0} has a zero quantity")]
    ZeroQuantity(ProductId),
}

/// A catalog item in the cart, with the quantity the shopper wants.
///
/// Serializes as the catalog item's fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub quantity: u32,
}

impl CartLineItem {
    /// Product id of the line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.item.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }

    /// Line total with currency.
    #[must_use]
    pub fn line_price(&self) -> Price {
        Price::inr(self.line_total())
    }
}

/// Ordered, deduplicated collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from persisted lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines break the cart invariants, which means
    /// the persisted record was not written by a [`Cart`].
    pub fn from_lines(lines: Vec<CartLineItem>) -> Result<Self, CartError> {
        for (index, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.id()));
            }
            if lines.iter().skip(index + 1).any(|other| other.id() == line.id()) {
                return Err(CartError::DuplicateLine(line.id()));
            }
        }
        Ok(Self { lines })
    }

    /// Add one unit of a catalog item.
    ///
    /// Increments the existing line for the item, or appends a new line
    /// with quantity one.
    pub fn add(&mut self, item: &CatalogItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == item.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLineItem {
                item: item.clone(),
                quantity: 1,
            });
        }
    }

    /// Replace the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for quantities below one and
    /// [`CartError::NotInCart`] if no line matches. The cart is unchanged in
    /// both cases.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Result<(), CartError> {
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity >= 1)
            .ok_or(CartError::InvalidQuantity(quantity))?;
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id() == id)
            .ok_or(CartError::NotInCart(id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Line for a product, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.id() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    /// Subtotal, delivery fee, and total for the current lines.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::from_subtotal(self.subtotal())
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<CartLineItem>::deserialize(deserializer)?;
        Self::from_lines(lines).map_err(serde::de::Error::custom)
    }
}
