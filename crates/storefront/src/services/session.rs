//! Session store: the single signed-in identity.
//!
//! Authentication is a demo: one hard-coded credential pair is accepted and
//! registration always succeeds. Passwords are never stored.

use std::sync::Arc;

use chrono::Utc;
use pharmacart_core::storage::USER_KEY;
use pharmacart_core::{Email, Identity, KeyValueStore, UserId};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use super::{delete_record, load_record, save_record};

/// Email of the demo account.
pub const DEMO_EMAIL: &str = "demo@example.com";
/// Password of the demo account.
pub const DEMO_PASSWORD: &str = "password";
/// Display name of the demo account.
pub const DEMO_NAME: &str = "Demo User";
/// Id of the demo account.
pub const DEMO_USER_ID: i64 = 1;

/// Errors that can occur during authentication operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email and password do not match the demo account.
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Holds at most one signed-in identity, mirrored to the `user` record.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    current: Option<Identity>,
    error: Option<AuthError>,
    last_issued_id: i64,
}

impl SessionStore {
    /// Load the persisted identity, if any.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let current: Option<Identity> = load_record(storage.as_ref(), USER_KEY);
        let last_issued_id = current.as_ref().map_or(0, |identity| identity.id.as_i64());
        Self {
            storage,
            current,
            error: None,
            last_issued_id,
        }
    }

    /// The signed-in identity.
    #[must_use]
    pub const fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Error from the most recent failed login, cleared by the next success.
    #[must_use]
    pub const fn error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    /// Sign in with the demo credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] unless the pair matches the
    /// demo account exactly. The current identity is left unchanged.
    pub fn login(&mut self, email: &str, password: &SecretString) -> Result<&Identity, AuthError> {
        let accepted = email == DEMO_EMAIL && password.expose_secret() == DEMO_PASSWORD;
        let Some(demo_email) = Email::parse(email).ok().filter(|_| accepted) else {
            tracing::info!("Login rejected");
            self.error = Some(AuthError::InvalidCredentials);
            return Err(AuthError::InvalidCredentials);
        };

        let identity = Identity::new(UserId::new(DEMO_USER_ID), demo_email, DEMO_NAME);
        Ok(self.sign_in(identity))
    }

    /// Create and sign in a new identity.
    ///
    /// The id is the current time in milliseconds, bumped past any id this
    /// store issued before. The password is accepted as-is and discarded.
    pub fn register(&mut self, name: &str, email: Email, _password: &SecretString) -> &Identity {
        let id = Utc::now().timestamp_millis().max(self.last_issued_id + 1);
        self.last_issued_id = id;
        self.sign_in(Identity::new(UserId::new(id), email, name.trim()))
    }

    /// Sign out. Always succeeds.
    pub fn logout(&mut self) {
        self.current = None;
        delete_record(self.storage.as_ref(), USER_KEY);
    }

    fn sign_in(&mut self, identity: Identity) -> &Identity {
        tracing::info!(user_id = %identity.id, "Signed in");
        save_record(self.storage.as_ref(), USER_KEY, &identity);
        self.error = None;
        self.current.insert(identity)
    }
}
