//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! The route guard is an extractor rather than a layer: handlers that take
//! [`RequireAuth`] are only reachable with a signed-in identity.

pub mod auth;
pub mod request_id;

pub use auth::{AuthRejection, RequireAuth};
pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
