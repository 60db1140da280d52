//! Append-only order history in the `orders` record.

use std::sync::Arc;

use pharmacart_core::storage::ORDERS_KEY;
use pharmacart_core::{KeyValueStore, Order};

use super::{load_record, save_record};

/// Orders placed from this device, oldest first.
pub struct OrderHistory {
    storage: Arc<dyn KeyValueStore>,
    orders: Vec<Order>,
}

impl OrderHistory {
    /// Load the persisted history. A malformed record yields an empty list.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let orders = load_record(storage.as_ref(), ORDERS_KEY).unwrap_or_default();
        Self { storage, orders }
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Append an order and rewrite the record.
    pub fn append(&mut self, order: Order) {
        tracing::info!(payment_id = %order.payment_details.id, total = %order.total, "Order recorded");
        self.orders.push(order);
        save_record(self.storage.as_ref(), ORDERS_KEY, &self.orders);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use pharmacart_core::{
        Cart, CustomerInfo, Email, PaymentDetails, PaymentMethod, PaymentStatus, ProductId, catalog,
    };

    use super::*;
    use crate::storage::MemoryStorage;

    fn order(payment_id: &str) -> Order {
        let mut cart = Cart::new();
        cart.add(catalog::find(ProductId::new(6)).unwrap());
        Order::from_cart(
            CustomerInfo {
                first_name: "Ravi".to_string(),
                last_name: "Kumar".to_string(),
                email: Email::parse("ravi@example.com").unwrap(),
                phone: "9123456780".to_string(),
                address: "4 Park Street, Kolkata".to_string(),
            },
            &cart,
            PaymentDetails {
                id: payment_id.to_string(),
                status: PaymentStatus::Completed,
                payer_id: "MOCK_PAYER_000000000".to_string(),
                payment_method: PaymentMethod::Card,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_append_keeps_order_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut history = OrderHistory::load(storage.clone());
        history.append(order("MOCK_first0000"));
        history.append(order("MOCK_second000"));

        let reloaded = OrderHistory::load(storage);
        let ids: Vec<_> = reloaded
            .orders()
            .iter()
            .map(|order| order.payment_details.id.as_str())
            .collect();
        assert_eq!(ids, ["MOCK_first0000", "MOCK_second000"]);
    }

    #[test]
    fn test_malformed_history_starts_empty() {
        let storage = Arc::new(MemoryStorage::with_entries([(ORDERS_KEY, "{}")]));
        assert!(OrderHistory::load(storage).orders().is_empty());
    }
}
