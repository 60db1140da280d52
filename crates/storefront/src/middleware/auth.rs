//! Route guard.
//!
//! Provides an extractor that requires a signed-in identity in the session
//! store.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use pharmacart_core::Identity;

use crate::state::AppState;

/// Path shoppers are sent to when a guarded view needs a sign-in.
pub const LOGIN_PATH: &str = "/login";

/// Extractor that requires a signed-in identity.
///
/// If nobody is signed in, the request is redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(identity): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", identity.name)
/// }
/// ```
pub struct RequireAuth(pub Identity);

/// Rejection returned when a guarded view is requested without a sign-in.
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to(LOGIN_PATH).into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = state.stores().session.current().cloned();
        identity.map(Self).ok_or_else(|| {
            tracing::debug!(path = %parts.uri.path(), "Guarded view requested without sign-in");
            AuthRejection
        })
    }
}
