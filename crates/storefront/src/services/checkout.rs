//! Order placement.
//!
//! Checkout snapshots the cart, charges the payment gateway, and on approval
//! appends the order and clears the cart. The charge and the follow-up run as
//! a spawned task, so the order is recorded even if the request that started
//! it goes away before the gateway answers.

use chrono::Utc;
use pharmacart_core::{CurrencyCode, CustomerInfo, Order};
use thiserror::Error;

use super::PaymentError;
use crate::state::AppState;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to pay for.
    #[error("cart is empty")]
    EmptyCart,

    /// Another payment for this cart is still with the gateway.
    #[error("a payment is already in progress")]
    InProgress,

    /// The gateway did not approve the charge. The cart is untouched.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// The payment task stopped before finishing.
    #[error("checkout task failed: {0}")]
    Interrupted(String),
}

/// Charge for the current cart and record the order.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart is empty,
/// [`CheckoutError::InProgress`] if an earlier payment has not finished, and
/// [`CheckoutError::Payment`] if the gateway declines. None of these changes
/// the cart or the order history.
#[tracing::instrument(skip_all, fields(customer = %customer.email))]
pub async fn place_order(state: AppState, customer: CustomerInfo) -> Result<Order, CheckoutError> {
    let (cart, total) = {
        let mut stores = state.stores();
        if stores.checkout_in_flight {
            return Err(CheckoutError::InProgress);
        }
        let cart = stores.cart.cart().clone();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        stores.checkout_in_flight = true;
        let total = cart.totals().total;
        (cart, total)
    };

    let gateway = state.payments();
    let task = tokio::spawn(async move {
        let charged = gateway.charge(total, CurrencyCode::INR).await;

        let mut stores = state.stores();
        stores.checkout_in_flight = false;
        let confirmation = charged?;
        let order = Order::from_cart(customer, &cart, confirmation.into_details(), Utc::now());
        stores.orders.append(order.clone());
        stores.cart.clear();
        Ok::<_, CheckoutError>(order)
    });

    task.await
        .map_err(|e| CheckoutError::Interrupted(e.to_string()))?
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pharmacart_core::storage::{CART_KEY, ORDERS_KEY};
    use pharmacart_core::{Email, KeyValueStore, ProductId, catalog};
    use rust_decimal::Decimal;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::services::MockPaymentGateway;
    use crate::storage::MemoryStorage;

    fn state(gateway: MockPaymentGateway) -> (Arc<MemoryStorage>, AppState) {
        let storage = Arc::new(MemoryStorage::new());
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        let state = AppState::with_gateway(&config, storage.clone(), Arc::new(gateway)).unwrap();
        (storage, state)
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: Email::parse("asha@example.com").unwrap(),
            phone: "9876543210".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
        }
    }

    fn fill_cart(state: &AppState) {
        let mut stores = state.stores();
        stores.cart.add_item(catalog::find(ProductId::new(1)).unwrap());
        stores.cart.add_item(catalog::find(ProductId::new(2)).unwrap());
        stores.cart.add_item(catalog::find(ProductId::new(2)).unwrap());
    }

    #[tokio::test]
    async fn test_successful_checkout_records_order_and_clears_cart() {
        let (storage, state) = state(MockPaymentGateway::new(Duration::ZERO));
        fill_cart(&state);

        let order = place_order(state.clone(), customer()).await.unwrap();
        assert_eq!(order.total, Decimal::new(244_875, 2));
        assert!(order.payment_details.id.starts_with("MOCK_"));

        let stores = state.stores();
        assert!(stores.cart.cart().is_empty());
        assert_eq!(stores.orders.orders(), [order]);
        assert!(storage.get(CART_KEY).is_none());
        assert!(storage.get(ORDERS_KEY).is_some());
    }

    #[tokio::test]
    async fn test_declined_payment_keeps_cart() {
        let (storage, state) = state(MockPaymentGateway::declining(Duration::ZERO));
        fill_cart(&state);

        let err = place_order(state.clone(), customer()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Payment(PaymentError::Declined(_))));

        let stores = state.stores();
        assert_eq!(stores.cart.item_count(), 3);
        assert!(stores.orders.orders().is_empty());
        assert!(storage.get(ORDERS_KEY).is_none());
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let (_, state) = state(MockPaymentGateway::new(Duration::ZERO));
        let err = place_order(state, customer()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_concurrent_checkout_records_one_order() {
        let (_, state) = state(MockPaymentGateway::new(Duration::from_millis(50)));
        fill_cart(&state);

        let first = tokio::spawn(place_order(state.clone(), customer()));
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = place_order(state.clone(), customer()).await;
        assert!(matches!(second, Err(CheckoutError::InProgress)));

        assert!(first.await.unwrap().is_ok());
        let stores = state.stores();
        assert_eq!(stores.orders.orders().len(), 1);
        assert!(!stores.checkout_in_flight);
    }

    #[tokio::test]
    async fn test_declined_payment_allows_retry() {
        let (_, state) = state(MockPaymentGateway::declining(Duration::ZERO));
        fill_cart(&state);

        place_order(state.clone(), customer()).await.unwrap_err();
        let err = place_order(state.clone(), customer()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Payment(_)));
    }

    #[tokio::test]
    async fn test_abandoned_checkout_still_records_order() {
        let (_, state) = state(MockPaymentGateway::new(Duration::from_millis(50)));
        fill_cart(&state);

        let request = tokio::spawn(place_order(state.clone(), customer()));
        tokio::time::sleep(Duration::from_millis(10)).await;
        request.abort();

        tokio::time::sleep(Duration::from_millis(200)).await;
        let stores = state.stores();
        assert_eq!(stores.orders.orders().len(), 1);
        assert!(stores.cart.cart().is_empty());
    }
}
