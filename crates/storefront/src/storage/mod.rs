//! Storage adapters for the key-value persistence port.
//!
//! - [`FileStorage`] - JSON file on disk, used by the binary and the CLI
//! - [`MemoryStorage`] - process-local map, used by tests

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use pharmacart_core::storage::{CART_KEY, KeyValueStore, ORDERS_KEY, StorageError, USER_KEY};
