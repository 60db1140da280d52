//! PharmaCart Core - Shared domain types.
//!
//! This crate provides the types used across all PharmaCart components:
//! - `storefront` - The shopper-facing web application
//! - `cli` - Maintenance tool for the local storage file
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no
//! clocks it does not receive as arguments. Persistence is expressed as the
//! [`storage::KeyValueStore`] port; adapters live in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, and status tags
//! - [`catalog`] - The fixed medicine catalog
//! - [`cart`] - Cart line items and the deduplicated line collection
//! - [`identity`] - The signed-in shopper identity
//! - [`order`] - Order records, totals, and delivery tracking
//! - [`storage`] - Key-value persistence port

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod identity;
pub mod order;
pub mod storage;
pub mod types;

pub use cart::{Cart, CartError, CartLineItem};
pub use catalog::CatalogItem;
pub use identity::Identity;
pub use order::{CustomerInfo, Order, OrderTotals, PaymentDetails, TrackingStage};
pub use storage::{KeyValueStore, StorageError};
pub use types::*;
