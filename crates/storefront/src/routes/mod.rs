//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /medicines
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /medicines              - Catalog, filtered by ?q=
//!
//! # Cart
//! GET  /cart                   - Cart page with totals
//! POST /cart/add               - Add one unit (redirects to the catalog)
//! POST /cart/update            - Set a line quantity
//! POST /cart/remove            - Remove a line
//!
//! # Checkout (requires sign-in)
//! GET  /checkout               - Delivery form and order summary
//! POST /checkout               - Validate delivery details, show payment form
//! POST /checkout/pay           - Validate card, pay, record order
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! POST /logout                 - Logout action
//!
//! # Account (requires sign-in)
//! GET  /dashboard              - Profile and order history
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod dashboard;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::{AppState, Stores};

/// Header data shown on every page.
#[derive(Debug, Clone, Default)]
pub struct NavView {
    /// Display name of the signed-in shopper.
    pub user_name: Option<String>,
    /// Units in the cart, for the badge.
    pub cart_count: u32,
}

impl NavView {
    #[must_use]
    pub fn from_stores(stores: &Stores) -> Self {
        Self {
            user_name: stores.session.current().map(|identity| identity.name.clone()),
            cart_count: stores.cart.item_count(),
        }
    }

    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        Self::from_stores(&state.stores())
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::submit_delivery))
        .route("/pay", post(checkout::pay))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(catalog::CATALOG_PATH) }))
        .route(catalog::CATALOG_PATH, get(catalog::index))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .merge(auth_routes())
        .route("/dashboard", get(dashboard::show))
}
