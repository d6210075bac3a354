//! Domain Error Types
//!
//! The closed set of business failures raised by the ledger services.
//! Transient storage conflicts are retried internally and never reach the
//! caller; everything here is terminal for the request that produced it.

use thiserror::Error;

use crate::store::StoreError;

/// Business failures surfaced by the account and customer services.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Amount precondition violated (negative on create, non-positive on
    /// transfer).
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Customer age precondition violated.
    #[error("Invalid age: {0}")]
    InvalidAge(String),

    /// Lookup by id or account number missed.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    /// Source balance below the requested transfer amount.
    #[error(
        "Insufficient funds in account {account_number}: requested {requested}, available {available}"
    )]
    InsufficientFunds {
        account_number: String,
        requested: f64,
        available: f64,
    },

    /// The transfer deadline elapsed without a committed attempt.
    #[error("Transfer timed out after {waited_ms} ms ({attempts} attempts)")]
    TransferTimedOut { waited_ms: u64, attempts: u32 },

    /// Storage failure that is not a business condition.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Client errors map to 4xx at the boundary.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InvalidAge(_)
                | Self::AccountNotFound(_)
                | Self::CustomerNotFound(_)
                | Self::InsufficientFunds { .. }
        )
    }
}
