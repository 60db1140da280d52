//! Form payloads and their validation.
//!
//! Validation collects one message per failing field so the view can render
//! every problem inline at once.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use pharmacart_core::{CustomerInfo, Email};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid regex"));
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("Invalid regex"));
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").expect("Invalid regex"));
static CVV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("Invalid regex"));

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` when `failed` holds.
    fn check(&mut self, failed: bool, field: &'static str, message: &'static str) {
        if failed {
            self.0.insert(field, message);
        }
    }

    /// Message for `field`, if it failed validation.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Err(self)` if any field failed.
    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Delivery details submitted on the checkout page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl DeliveryForm {
    /// Validate every field and build the customer record.
    ///
    /// # Errors
    ///
    /// Returns the messages for every field that failed.
    pub fn validate(&self) -> Result<CustomerInfo, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = Email::parse(&self.email);
        let phone = self.phone.trim();

        errors.check(blank(&self.first_name), "first_name", "Please provide your first name.");
        errors.check(blank(&self.last_name), "last_name", "Please provide your last name.");
        errors.check(email.is_err(), "email", "Please provide a valid email.");
        errors.check(
            !PHONE_RE.is_match(phone),
            "phone",
            "Please provide a valid 10-digit phone number.",
        );
        errors.check(blank(&self.address), "address", "Please provide your delivery address.");

        match email {
            Ok(email) if errors.is_empty() => Ok(CustomerInfo {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email,
                phone: phone.to_string(),
                address: self.address.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Card details plus the delivery details carried over from the first step.
///
/// Card fields are validated and then dropped; they are never stored.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    #[serde(flatten)]
    pub delivery: DeliveryForm,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry: String,
    pub cvv: SecretString,
}

impl PaymentForm {
    /// Validate the card fields.
    ///
    /// # Errors
    ///
    /// Returns the messages for every card field that failed.
    pub fn validate_card(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            !CARD_NUMBER_RE.is_match(self.card_number.trim()),
            "card_number",
            "Please enter a valid 16-digit card number.",
        );
        errors.check(
            !EXPIRY_RE.is_match(self.expiry.trim()),
            "expiry",
            "Please enter the expiry date as MM/YY.",
        );
        errors.check(
            !CVV_RE.is_match(self.cvv.expose_secret().trim()),
            "cvv",
            "Please enter the 3-digit CVV.",
        );
        errors.into_result()
    }
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    pub password: SecretString,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub password: SecretString,
    pub password_confirm: SecretString,
}

impl RegisterForm {
    /// Validate the fields and return the parsed email.
    ///
    /// # Errors
    ///
    /// Returns the messages for every field that failed. A confirmation
    /// mismatch is reported under `password_confirm`.
    pub fn validate(&self) -> Result<Email, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = Email::parse(&self.email);
        let password = self.password.expose_secret();

        errors.check(blank(&self.name), "name", "Please provide your name.");
        errors.check(email.is_err(), "email", "Please provide a valid email.");
        errors.check(password.is_empty(), "password", "Please provide a password.");
        errors.check(
            password != self.password_confirm.expose_secret(),
            "password_confirm",
            "Passwords do not match",
        );

        match email {
            Ok(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn delivery() -> DeliveryForm {
        DeliveryForm {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
        }
    }

    fn card(number: &str, expiry: &str, cvv: &str) -> PaymentForm {
        PaymentForm {
            delivery: delivery(),
            card_number: number.to_string(),
            expiry: expiry.to_string(),
            cvv: SecretString::from(cvv.to_string()),
        }
    }

    #[test]
    fn test_valid_delivery_form() {
        let info = delivery().validate().unwrap();
        assert_eq!(info.full_name(), "Asha Rao");
        assert_eq!(info.phone, "9876543210");
    }

    #[test]
    fn test_delivery_form_reports_every_field() {
        let errors = DeliveryForm::default().validate().unwrap_err();
        for field in ["first_name", "last_name", "email", "phone", "address"] {
            assert!(errors.get(field).is_some(), "{field} should fail");
        }
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        for phone in ["987654321", "98765432100", "98765-4321", "abcdefghij"] {
            let form = DeliveryForm {
                phone: phone.to_string(),
                ..delivery()
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(
                errors.get("phone"),
                Some("Please provide a valid 10-digit phone number.")
            );
            assert!(errors.get("email").is_none());
        }
    }

    #[test]
    fn test_card_validation() {
        assert!(card("4111111111111111", "12/29", "123").validate_card().is_ok());

        let errors = card("4111 1111 1111 1111", "13/29", "12").validate_card().unwrap_err();
        assert!(errors.get("card_number").is_some());
        assert!(errors.get("expiry").is_some());
        assert!(errors.get("cvv").is_some());

        assert!(card("4111111111111111", "00/29", "123").validate_card().is_err());
        assert!(card("4111111111111111", "1/29", "123").validate_card().is_err());
    }

    #[test]
    fn test_register_password_mismatch() {
        let form = RegisterForm {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: SecretString::from("one".to_string()),
            password_confirm: SecretString::from("two".to_string()),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password_confirm"), Some("Passwords do not match"));
        assert!(errors.get("email").is_none());
    }
}
