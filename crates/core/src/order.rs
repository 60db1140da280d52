//! Order records, totals, and delivery tracking.
//!
//! Orders are snapshots: the cart lines are copied at checkout time and an
//! order is never edited once it has been appended to the history.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLineItem};
use crate::types::{Email, PaymentMethod, PaymentStatus, Price};

/// Days between placing an order and its estimated delivery.
pub const DELIVERY_DAYS: i64 = 5;

/// Flat delivery fee added to every order, in rupees.
#[must_use]
pub fn delivery_fee() -> Decimal {
    Decimal::new(5000, 2)
}

/// Subtotal, delivery fee, and grand total of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub delivery: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Totals for a subtotal with the flat delivery fee applied.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let delivery = delivery_fee();
        Self {
            subtotal,
            delivery,
            total: subtotal + delivery,
        }
    }
}

/// Delivery details collected by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// Ten-digit phone number.
    pub phone: String,
    pub address: String,
}

impl CustomerInfo {
    /// First and last name joined for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payment confirmation recorded with an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// Opaque confirmation id issued by the gateway.
    pub id: String,
    pub status: PaymentStatus,
    pub payer_id: String,
    pub payment_method: PaymentMethod,
}

/// A completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub customer_info: CustomerInfo,
    /// Cart lines as they were when the shopper checked out.
    pub items: Vec<CartLineItem>,
    /// Grand total including delivery.
    pub total: Decimal,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    pub payment_details: PaymentDetails,
}

impl Order {
    /// Snapshot a cart into an order.
    #[must_use]
    pub fn from_cart(
        customer_info: CustomerInfo,
        cart: &Cart,
        payment_details: PaymentDetails,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            customer_info,
            items: cart.lines().to_vec(),
            total: cart.totals().total,
            date,
            payment_details,
        }
    }

    /// Grand total with currency.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::inr(self.total)
    }

    /// Date the order is expected to arrive.
    #[must_use]
    pub fn estimated_delivery(&self) -> DateTime<Utc> {
        self.date + Duration::days(DELIVERY_DAYS)
    }

    /// Where the order is in the delivery pipeline at `now`.
    #[must_use]
    pub fn tracking_stage(&self, now: DateTime<Utc>) -> TrackingStage {
        TrackingStage::after_hours((now - self.date).num_hours())
    }
}

/// Delivery pipeline stage, derived from the time since the order was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingStage {
    /// First 24 hours.
    Processing,
    /// 24 to 48 hours.
    Dispatched,
    /// 48 to 72 hours.
    InTransit,
    /// After 72 hours.
    OutForDelivery,
}

impl TrackingStage {
    /// Stage reached `hours` after the order was placed.
    #[must_use]
    pub const fn after_hours(hours: i64) -> Self {
        match hours {
            ..24 => Self::Processing,
            24..48 => Self::Dispatched,
            48..72 => Self::InTransit,
            _ => Self::OutForDelivery,
        }
    }

    /// Tracking line shown on the order.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Processing => "Order Confirmed & Processing",
            Self::Dispatched => "Dispatched from Warehouse",
            Self::InTransit => "In Transit",
            Self::OutForDelivery => "Out for Delivery",
        }
    }

    /// Short badge text: processing for the first day, dispatched afterwards.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Dispatched | Self::InTransit | Self::OutForDelivery => "Dispatched",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::ProductId;

    fn sample_order(date: DateTime<Utc>) -> Order {
        let mut cart = Cart::new();
        cart.add(catalog::find(ProductId::new(1)).unwrap());
        cart.add(catalog::find(ProductId::new(2)).unwrap());
        cart.add(catalog::find(ProductId::new(2)).unwrap());

        Order::from_cart(
            CustomerInfo {
                first_name: "Asha".to_owned(),
                last_name: "Rao".to_owned(),
                email: Email::parse("asha@example.com").unwrap(),
                phone: "9876543210".to_owned(),
                address: "12 MG Road, Bengaluru".to_owned(),
            },
            &cart,
            PaymentDetails {
                id: "MOCK_abc123xyz".to_owned(),
                status: PaymentStatus::Completed,
                payer_id: "MOCK_PAYER_def456uvw".to_owned(),
                payment_method: PaymentMethod::Card,
            },
            date,
        )
    }

    #[test]
    fn test_order_total_includes_delivery() {
        let order = sample_order(Utc::now());
        assert_eq!(order.total, Decimal::new(244_875, 2));
        assert_eq!(order.total_price().display(), "₹2,448.75");
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn test_order_json_uses_camel_case() {
        let date = DateTime::parse_from_rfc3339("2026-10-17T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let value = serde_json::to_value(sample_order(date)).unwrap();

        assert_eq!(value["customerInfo"]["firstName"], "Asha");
        assert_eq!(value["paymentDetails"]["payerId"], "MOCK_PAYER_def456uvw");
        assert_eq!(value["paymentDetails"]["status"], "COMPLETED");
        assert_eq!(value["paymentDetails"]["paymentMethod"], "Card");
        assert_eq!(value["date"], "2026-10-17T09:30:00Z");
        assert_eq!(value["items"][1]["quantity"], 2);
    }

    #[test]
    fn test_estimated_delivery_is_five_days_out() {
        let date = Utc::now();
        let order = sample_order(date);
        assert_eq!(order.estimated_delivery() - date, Duration::days(5));
    }

    #[test]
    fn test_tracking_stages() {
        assert_eq!(TrackingStage::after_hours(-3), TrackingStage::Processing);
        assert_eq!(TrackingStage::after_hours(0), TrackingStage::Processing);
        assert_eq!(TrackingStage::after_hours(23), TrackingStage::Processing);
        assert_eq!(TrackingStage::after_hours(24), TrackingStage::Dispatched);
        assert_eq!(TrackingStage::after_hours(47), TrackingStage::Dispatched);
        assert_eq!(TrackingStage::after_hours(48), TrackingStage::InTransit);
        assert_eq!(TrackingStage::after_hours(72), TrackingStage::OutForDelivery);
        assert_eq!(TrackingStage::InTransit.badge(), "Dispatched");
        assert_eq!(TrackingStage::Processing.badge(), "Processing");
    }

    #[test]
    fn test_tracking_stage_from_order_date() {
        let now = Utc::now();
        let order = sample_order(now - Duration::hours(50));
        assert_eq!(order.tracking_stage(now).label(), "In Transit");
    }
}
