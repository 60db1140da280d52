//! Business logic services for storefront.
//!
//! # Services
//!
//! - `session` - The signed-in identity (demo login, registration, logout)
//! - `cart` - Cart store synchronized to the `cart` record
//! - `orders` - Append-only order history in the `orders` record
//! - `payment` - Payment gateway port and the mock gateway
//! - `checkout` - Order placement through the payment gateway
//!
//! Stores write their whole record after every change. Writes are
//! fire-and-forget: a failed write is logged and the in-memory state is kept.

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod payment;
pub mod session;

pub use cart::CartStore;
pub use checkout::{CheckoutError, place_order};
pub use orders::OrderHistory;
pub use payment::{MockPaymentGateway, PaymentConfirmation, PaymentError, PaymentGateway};
pub use session::{AuthError, SessionStore};

use pharmacart_core::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and decode the record under `key`.
///
/// A missing record is `None`. A record that fails to decode is logged and
/// also reported as `None`, so callers fall back to their empty state.
fn load_record<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed stored record");
            None
        }
    }
}

/// Encode and write the record under `key`, logging any failure.
fn save_record<T: Serialize>(storage: &dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(Into::into)
        .and_then(|json| storage.set(key, &json));
    if let Err(e) = result {
        tracing::warn!(key, error = %e, "Failed to persist record");
    }
}

/// Delete the record under `key`, logging any failure.
fn delete_record(storage: &dyn KeyValueStore, key: &str) {
    if let Err(e) = storage.delete(key) {
        tracing::warn!(key, error = %e, "Failed to delete record");
    }
}
