use crate::error::{BookingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

const SYSTEM_ACCOUNT: &str = "TUTORBOOK_SYSTEM";
const CURRENCY: &str = "USD";

// ---------------------------------------------------------------------------
// TransactionId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// PaymentProcessor
// ---------------------------------------------------------------------------

/// The payment capability the booking flow consumes. Implementations decide
/// what a charge means; the flow only cares about the transaction id.
pub trait PaymentProcessor {
    fn process_payment(&mut self, amount: f64) -> Result<TransactionId>;
    fn validate_payment(&mut self, txn: &TransactionId) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// ExternalPaymentService
// ---------------------------------------------------------------------------

/// Stand-in for the third-party gateway. Its surface (account-to-account
/// transfers with an explicit currency) does not match `PaymentProcessor`;
/// the adapter below does the translation.
#[derive(Debug, Default)]
pub struct ExternalPaymentService {
    transactions: HashMap<String, f64>,
}

impl ExternalPaymentService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_transaction(
        &mut self,
        from_account: &str,
        to_account: &str,
        amount: f64,
        currency: &str,
    ) -> Result<String> {
        if amount <= 0.0 {
            return Err(BookingError::PaymentDeclined(format!(
                "non-positive amount {amount:.2} {currency}"
            )));
        }
        let id = format!("TXN-{}", Uuid::new_v4());
        tracing::debug!(%from_account, %to_account, amount, currency, txn = %id, "transaction");
        self.transactions.insert(id.clone(), amount);
        Ok(id)
    }

    pub fn check_transaction_status(&self, transaction_id: &str) -> Result<bool> {
        if self.transactions.contains_key(transaction_id) {
            Ok(true)
        } else {
            Err(BookingError::TransactionNotFound(
                transaction_id.to_string(),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// PaymentAdapter
// ---------------------------------------------------------------------------

/// Adapts `ExternalPaymentService` to the `PaymentProcessor` the booking
/// flow expects, supplying the system account and currency and remembering
/// the last transaction.
pub struct PaymentAdapter {
    service: ExternalPaymentService,
    last_transaction: Option<TransactionId>,
}

impl PaymentAdapter {
    pub fn new(service: ExternalPaymentService) -> Self {
        Self {
            service,
            last_transaction: None,
        }
    }

    pub fn last_transaction(&self) -> Option<&TransactionId> {
        self.last_transaction.as_ref()
    }
}

impl PaymentProcessor for PaymentAdapter {
    fn process_payment(&mut self, amount: f64) -> Result<TransactionId> {
        let id = self
            .service
            .make_transaction("STUDENT_ACCOUNT", SYSTEM_ACCOUNT, amount, CURRENCY)?;
        let txn = TransactionId(id);
        self.last_transaction = Some(txn.clone());
        Ok(txn)
    }

    fn validate_payment(&mut self, txn: &TransactionId) -> Result<bool> {
        self.service.check_transaction_status(txn.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_charges_and_validates() {
        let mut adapter = PaymentAdapter::new(ExternalPaymentService::new());
        let txn = adapter.process_payment(120.0).unwrap();
        assert!(txn.as_str().starts_with("TXN-"));
        assert!(adapter.validate_payment(&txn).unwrap());
        assert_eq!(adapter.last_transaction(), Some(&txn));
    }

    #[test]
    fn zero_amount_is_declined() {
        let mut adapter = PaymentAdapter::new(ExternalPaymentService::new());
        let err = adapter.process_payment(0.0).unwrap_err();
        assert!(matches!(err, BookingError::PaymentDeclined(_)));
        assert!(adapter.last_transaction().is_none());
    }

    #[test]
    fn unknown_transaction_fails_validation() {
        let mut adapter = PaymentAdapter::new(ExternalPaymentService::new());
        let err = adapter
            .validate_payment(&TransactionId("TXN-bogus".to_string()))
            .unwrap_err();
        assert!(matches!(err, BookingError::TransactionNotFound(_)));
    }
}
