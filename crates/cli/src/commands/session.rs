//! Session inspection and sign-out.

use std::sync::Arc;

use pharmacart_core::KeyValueStore;
use pharmacart_storefront::services::SessionStore;

/// Describe the signed-in identity, if any.
#[must_use]
pub fn show(storage: Arc<dyn KeyValueStore>) -> String {
    let session = SessionStore::load(storage);
    session.current().map_or_else(
        || "Not signed in.\n".to_string(),
        |identity| {
            format!(
                "{} <{}> (id {}, role {})\n",
                identity.name, identity.email, identity.id, identity.role
            )
        },
    )
}

/// Sign out the current identity.
#[must_use]
pub fn logout(storage: Arc<dyn KeyValueStore>) -> String {
    let mut session = SessionStore::load(storage);
    if !session.is_authenticated() {
        return "Not signed in.\n".to_string();
    }
    session.logout();
    tracing::info!("Session ended");
    "Signed out.\n".to_string()
}
