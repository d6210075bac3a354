//! Domain models
//!
//! Account and Customer records as they travel between the store, the
//! service layer, and the wire (camelCase JSON).

use serde::{Deserialize, Serialize};

/// A balance-bearing account owned by a customer.
///
/// `id` and `account_number` are storage-assigned at creation and immutable
/// afterwards. The balance is serialized as `amount` on the wire.
///
/// The balance is a plain f64 for simplicity; a production ledger would
/// use a decimal type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub customer_id: i64,
    /// Current balance. Invariant: >= 0 for every committed account.
    pub amount: f64,
    pub account_number: String,
}

/// A customer record. Owned by the customer side; the ledger core only
/// reads it to validate account creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub city: String,
    pub phone_number: String,
}
