//! Key-value persistence port.
//!
//! The storefront persists three records, each a JSON document stored as a
//! string under a fixed key. Adapters decide where the strings live.

use thiserror::Error;

/// Key holding the signed-in [`Identity`](crate::Identity).
pub const USER_KEY: &str = "user";

/// Key holding the [`Cart`](crate::Cart) lines.
pub const CART_KEY: &str = "cart";

/// Key holding the order history, oldest first.
pub const ORDERS_KEY: &str = "orders";

/// Errors from a storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// String key-value store backing the session, cart, and order records.
///
/// Reads never fail: a missing or unreadable value is reported as absent and
/// callers fall back to their empty state.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot persist the value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot persist the removal.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}
