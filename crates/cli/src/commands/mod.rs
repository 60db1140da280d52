//! CLI command implementations.
//!
//! Each command returns the text to print so it can be checked without a
//! terminal.

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod session;

use std::path::PathBuf;
use std::sync::Arc;

use pharmacart_core::{KeyValueStore, StorageError};
use pharmacart_storefront::config::{ConfigError, StorefrontConfig};
use pharmacart_storefront::storage::FileStorage;
use thiserror::Error;

/// Errors raised before a command runs.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Open the storage file named on the command line, or the configured one.
///
/// # Errors
///
/// Returns an error if the environment is misconfigured or the file cannot be
/// opened.
pub fn open_storage(path: Option<PathBuf>) -> Result<Arc<dyn KeyValueStore>, CommandError> {
    let path = match path {
        Some(path) => path,
        None => StorefrontConfig::from_env()?.storage_path,
    };
    tracing::debug!(path = %path.display(), "Opening storage");
    Ok(Arc::new(FileStorage::open(path)?))
}
