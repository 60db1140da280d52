//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pharmacart_core::KeyValueStore;

use crate::api_client::{ApiClient, ApiError};
use crate::config::StorefrontConfig;
use crate::services::{CartStore, MockPaymentGateway, OrderHistory, PaymentGateway, SessionStore};

/// The shopper's stores, mutated one operation at a time under the state mutex.
pub struct Stores {
    pub session: SessionStore,
    pub cart: CartStore,
    pub orders: OrderHistory,
    /// Set while a payment is with the gateway; a second checkout is refused.
    pub checkout_in_flight: bool,
}

impl Stores {
    /// Load every store from `storage`.
    pub fn load(storage: &Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: SessionStore::load(Arc::clone(storage)),
            cart: CartStore::load(Arc::clone(storage)),
            orders: OrderHistory::load(Arc::clone(storage)),
            checkout_in_flight: false,
        }
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the stores, the payment gateway, and the backend API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    stores: Mutex<Stores>,
    payments: Arc<dyn PaymentGateway>,
    api: ApiClient,
}

impl AppState {
    /// Create application state with the mock payment gateway from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built.
    pub fn new(config: &StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let payments = Arc::new(MockPaymentGateway::new(config.payment_delay));
        Self::with_gateway(config, storage, payments)
    }

    /// Create application state with an explicit payment gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built.
    pub fn with_gateway(
        config: &StorefrontConfig,
        storage: Arc<dyn KeyValueStore>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Result<Self, ApiError> {
        let api = ApiClient::new(config.api_url.clone())?;
        let stores = Mutex::new(Stores::load(&storage));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                stores,
                payments,
                api,
            }),
        })
    }

    /// Lock the stores. Never hold the guard across an `.await`.
    pub fn stores(&self) -> MutexGuard<'_, Stores> {
        self.inner
            .stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The payment gateway.
    #[must_use]
    pub fn payments(&self) -> Arc<dyn PaymentGateway> {
        Arc::clone(&self.inner.payments)
    }

    /// Client for the backend HTTP API.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }
}
