//! Integration tests for `PharmaCart`.
//!
//! Each test spawns the storefront router on an ephemeral port, backed by a
//! storage file in its own temporary directory, and drives it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pharmacart-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use pharmacart_storefront::config::StorefrontConfig;
use pharmacart_storefront::services::{MockPaymentGateway, PaymentGateway};
use pharmacart_storefront::state::AppState;
use pharmacart_storefront::storage::FileStorage;
use reqwest::{Client, Response, redirect};
use tempfile::TempDir;

/// A running storefront and a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub storage_path: PathBuf,
    // Removed when the context drops.
    _dir: Option<TempDir>,
}

impl TestContext {
    /// Storefront with an approving, zero-delay gateway and fresh storage.
    pub async fn new() -> Self {
        Self::with_gateway(MockPaymentGateway::new(Duration::ZERO)).await
    }

    /// Storefront with the given gateway and fresh storage.
    pub async fn with_gateway(gateway: impl PaymentGateway + 'static) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("pharmacart.json");
        Self::start(&path, Arc::new(gateway), Some(dir)).await
    }

    /// Storefront over an existing storage file, for restart scenarios.
    pub async fn at_path(path: &Path) -> Self {
        Self::start(path, Arc::new(MockPaymentGateway::new(Duration::ZERO)), None).await
    }

    #[allow(clippy::print_stderr)]
    async fn start(path: &Path, gateway: Arc<dyn PaymentGateway>, dir: Option<TempDir>) -> Self {
        let config = StorefrontConfig::from_lookup(|_| None).expect("Failed to build test config");

        let storage = FileStorage::open(path).expect("Failed to open storage");
        let state = AppState::with_gateway(&config, Arc::new(storage), gateway)
            .expect("Failed to build app state");
        let app = pharmacart_storefront::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server stopped: {e}");
            }
        });

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            storage_path: path.to_path_buf(),
            _dir: dir,
        }
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a path.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// POST a urlencoded form to a path.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// GET a path and return the body text.
    pub async fn page(&self, path: &str) -> String {
        self.get(path).await.text().await.expect("Failed to read body")
    }

    /// Sign in with the demo account.
    pub async fn login_demo(&self) {
        let resp = self
            .post("/login", &[("email", "demo@example.com"), ("password", "password")])
            .await;
        assert_eq!(location(&resp), "/dashboard");
    }

    /// Add one unit of a catalog item to the cart.
    pub async fn add_to_cart(&self, product_id: i64) {
        let id = product_id.to_string();
        let resp = self.post("/cart/add", &[("product_id", id.as_str())]).await;
        assert!(resp.status().is_redirection());
    }
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Delivery fields accepted by the checkout form.
pub const DELIVERY: [(&str, &str); 5] = [
    ("first_name", "Asha"),
    ("last_name", "Rao"),
    ("email", "asha@example.com"),
    ("phone", "9876543210"),
    ("address", "12 MG Road, Bengaluru"),
];

/// Card fields accepted by the payment form.
pub const CARD: [(&str, &str); 3] = [
    ("card_number", "4111111111111111"),
    ("expiry", "12/29"),
    ("cvv", "123"),
];
