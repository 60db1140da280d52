//! The signed-in shopper identity.

use serde::{Deserialize, Serialize};

use crate::types::{Email, Role, UserId};

/// Identity of the shopper currently signed in.
///
/// At most one identity exists at a time; it is created on login or
/// registration and destroyed on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: Email,
    /// Display name.
    pub name: String,
    pub role: Role,
}

impl Identity {
    /// Create a shopper identity with the default `user` role.
    #[must_use]
    pub fn new(id: UserId, email: Email, name: impl Into<String>) -> Self {
        Self {
            id,
            email,
            name: name.into(),
            role: Role::User,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_json_shape() {
        let identity = Identity::new(
            UserId::new(1),
            Email::parse("demo@example.com").unwrap(),
            "Demo User",
        );
        let json = serde_json::to_string(&identity).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"email":"demo@example.com","name":"Demo User","role":"user"}"#
        );
        assert_eq!(serde_json::from_str::<Identity>(&json).unwrap(), identity);
    }
}
