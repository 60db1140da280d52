//! Payment gateway port and the mock card gateway.
//!
//! No real processor is wired up. [`MockPaymentGateway`] waits a fixed delay
//! and then approves (or, when built with [`MockPaymentGateway::declining`],
//! rejects) every charge.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pharmacart_core::{CurrencyCode, PaymentDetails, PaymentMethod, PaymentStatus};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Length of the random suffix on mock ids.
const MOCK_ID_LENGTH: usize = 9;

/// Errors reported by a payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The charge was refused.
    #[error("payment declined: {0}")]
    Declined(String),
}

/// Confirmation returned for an approved charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentConfirmation {
    pub id: String,
    pub status: PaymentStatus,
    pub payer_id: String,
    pub amount: Decimal,
    pub currency: CurrencyCode,
    pub timestamp: DateTime<Utc>,
}

impl PaymentConfirmation {
    /// The subset recorded on an order.
    #[must_use]
    pub fn into_details(self) -> PaymentDetails {
        PaymentDetails {
            id: self.id,
            status: self.status,
            payer_id: self.payer_id,
            payment_method: PaymentMethod::Card,
        }
    }
}

/// Something that can take a card payment.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge `amount` and wait for the outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] if the charge is not approved.
    async fn charge(
        &self,
        amount: Decimal,
        currency: CurrencyCode,
    ) -> Result<PaymentConfirmation, PaymentError>;
}

/// Simulated gateway with a fixed processing delay.
#[derive(Debug, Clone)]
pub struct MockPaymentGateway {
    delay: Duration,
    approve: bool,
}

impl MockPaymentGateway {
    /// Gateway that approves every charge after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            approve: true,
        }
    }

    /// Gateway that declines every charge after `delay`.
    #[must_use]
    pub const fn declining(delay: Duration) -> Self {
        Self {
            delay,
            approve: false,
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn charge(
        &self,
        amount: Decimal,
        currency: CurrencyCode,
    ) -> Result<PaymentConfirmation, PaymentError> {
        tokio::time::sleep(self.delay).await;

        if !self.approve {
            tracing::warn!(%amount, %currency, "Mock payment declined");
            return Err(PaymentError::Declined("card declined".to_string()));
        }

        let confirmation = PaymentConfirmation {
            id: format!("MOCK_{}", random_base36(MOCK_ID_LENGTH)),
            status: PaymentStatus::Completed,
            payer_id: format!("MOCK_PAYER_{}", random_base36(MOCK_ID_LENGTH)),
            amount,
            currency,
            timestamp: Utc::now(),
        };
        tracing::info!(payment_id = %confirmation.id, %amount, "Mock payment approved");
        Ok(confirmation)
    }
}

/// Random lowercase base-36 string.
fn random_base36(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| std::char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn is_base36(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    }

    #[tokio::test]
    async fn test_mock_gateway_approves() {
        let gateway = MockPaymentGateway::new(Duration::ZERO);
        let amount = Decimal::new(244_875, 2);
        let confirmation = gateway.charge(amount, CurrencyCode::INR).await.unwrap();

        let suffix = confirmation.id.strip_prefix("MOCK_").unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(is_base36(suffix));

        let payer = confirmation.payer_id.strip_prefix("MOCK_PAYER_").unwrap();
        assert_eq!(payer.len(), 9);
        assert!(is_base36(payer));

        assert_eq!(confirmation.status, PaymentStatus::Completed);
        assert_eq!(confirmation.amount, amount);

        let details = confirmation.into_details();
        assert_eq!(details.payment_method, PaymentMethod::Card);
    }

    #[tokio::test]
    async fn test_mock_ids_differ() {
        let gateway = MockPaymentGateway::new(Duration::ZERO);
        let a = gateway.charge(Decimal::ONE, CurrencyCode::INR).await.unwrap();
        let b = gateway.charge(Decimal::ONE, CurrencyCode::INR).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_mock_gateway_waits_for_delay() {
        let gateway = MockPaymentGateway::new(Duration::from_millis(50));
        let started = tokio::time::Instant::now();
        gateway.charge(Decimal::ONE, CurrencyCode::INR).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_declining_gateway() {
        let gateway = MockPaymentGateway::declining(Duration::ZERO);
        let err = gateway.charge(Decimal::ONE, CurrencyCode::INR).await.unwrap_err();
        assert!(matches!(err, PaymentError::Declined(_)));
    }
}
