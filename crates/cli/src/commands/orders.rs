//! Order history listing.

use std::sync::Arc;

use chrono::Utc;
use pharmacart_core::KeyValueStore;
use pharmacart_storefront::services::OrderHistory;

/// One block per order with payment id, date, tracking stage, and lines.
#[must_use]
pub fn list(storage: Arc<dyn KeyValueStore>) -> String {
    let history = OrderHistory::load(storage);
    if history.orders().is_empty() {
        return "No orders recorded.\n".to_string();
    }

    let now = Utc::now();
    let mut out = String::new();
    for order in history.orders() {
        out.push_str(&format!(
            "{}  {}  {}  {}  ({})\n",
            order.payment_details.id,
            order.date.format("%Y-%m-%d %H:%M"),
            order.customer_info.full_name(),
            order.total_price(),
            order.tracking_stage(now).label()
        ));
        for line in &order.items {
            out.push_str(&format!("    {} x {}\n", line.item.name, line.quantity));
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pharmacart_core::storage::ORDERS_KEY;
    use pharmacart_storefront::storage::MemoryStorage;

    use super::*;

    const ORDERS: &str = r#"[{
        "customerInfo": {"firstName": "Asha", "lastName": "Rao", "email": "asha@example.com",
                         "phone": "9876543210", "address": "12 MG Road"},
        "items": [{"id": 1, "name": "Paracetamol", "description": "Pain relief",
                   "price": "449.25", "image": "/static/images/paracetamol.svg",
                   "category": "Pain Relief", "dosage": "500mg",
                   "quantity_available": 100, "quantity": 2}],
        "total": "948.50",
        "date": "2026-01-05T10:00:00Z",
        "paymentDetails": {"id": "MOCK_abc123xyz", "status": "COMPLETED",
                           "payerId": "MOCK_PAYER_def456uvw", "paymentMethod": "Card"}
    }]"#;

    #[test]
    fn test_lists_orders() {
        let storage = Arc::new(MemoryStorage::with_entries([(ORDERS_KEY, ORDERS)]));
        let out = list(storage);
        assert!(out.starts_with("MOCK_abc123xyz  2026-01-05 10:00  Asha Rao  ₹948.50"));
        assert!(out.contains("Out for Delivery"));
        assert!(out.contains("    Paracetamol x 2"));
    }

    #[test]
    fn test_no_orders() {
        assert_eq!(list(Arc::new(MemoryStorage::new())), "No orders recorded.\n");
    }
}
