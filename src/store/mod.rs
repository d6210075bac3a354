//! Account Store
//!
//! In-memory, versioned storage for Account rows, keyed by internal id with
//! a unique index on account number. Every write bumps the row version;
//! `commit_transfer` uses those versions to detect write-write conflicts so
//! the service layer can retry instead of losing an update.

pub mod customer;

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::Account;

pub use customer::{CustomerDirectory, CustomerStore};

/// Storage-level failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The generated account number already exists. Practically impossible
    /// with random generation, but handled rather than assumed away.
    #[error("Account number already exists: {0}")]
    DuplicateAccountNumber(String),

    /// A write referenced an id that is not in the store.
    #[error("No account row with id {0}")]
    UnknownAccountId(i64),

    /// A version-checked commit found a row modified since it was read.
    /// Transient: the caller re-reads and retries.
    #[error("Version conflict on account id {id}: expected {expected}, found {found}")]
    VersionConflict { id: i64, expected: u64, found: u64 },
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// An account row together with the version observed at read time.
#[derive(Debug, Clone)]
pub struct AccountRow {
    pub account: Account,
    pub version: u64,
}

/// One side of a transfer commit: the row to write, the version it was read
/// at, and the balance it should end up with.
#[derive(Debug, Clone, Copy)]
pub struct BalanceUpdate {
    pub id: i64,
    pub expected_version: u64,
    pub new_balance: f64,
}

#[derive(Debug)]
struct StoredAccount {
    account: Account,
    version: u64,
}

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<i64, StoredAccount>,
    by_number: HashMap<String, i64>,
    next_id: i64,
}

/// In-memory account storage. Individual operations are internally
/// consistent; cross-call atomicity is the service layer's job, built on
/// `commit_transfer`.
#[derive(Debug, Default)]
pub struct AccountStore {
    inner: RwLock<Inner>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new row and return its storage-assigned id.
    pub fn add(
        &self,
        account_number: &str,
        customer_id: i64,
        initial_balance: f64,
    ) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().unwrap();

        if inner.by_number.contains_key(account_number) {
            return Err(StoreError::DuplicateAccountNumber(
                account_number.to_string(),
            ));
        }

        inner.next_id += 1;
        let id = inner.next_id;

        inner.by_number.insert(account_number.to_string(), id);
        inner.rows.insert(
            id,
            StoredAccount {
                account: Account {
                    id,
                    customer_id,
                    amount: initial_balance,
                    account_number: account_number.to_string(),
                },
                version: 1,
            },
        );

        Ok(id)
    }

    pub fn get_by_id(&self, id: i64) -> Option<AccountRow> {
        let inner = self.inner.read().unwrap();
        inner.rows.get(&id).map(|row| AccountRow {
            account: row.account.clone(),
            version: row.version,
        })
    }

    pub fn get_by_number(&self, account_number: &str) -> Option<AccountRow> {
        let inner = self.inner.read().unwrap();
        let id = inner.by_number.get(account_number)?;
        inner.rows.get(id).map(|row| AccountRow {
            account: row.account.clone(),
            version: row.version,
        })
    }

    /// Unconditional overwrite of one balance. The caller is responsible for
    /// serializing concurrent writers; transfers go through
    /// `commit_transfer` instead.
    pub fn update_balance(&self, id: i64, new_balance: f64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        let row = inner
            .rows
            .get_mut(&id)
            .ok_or(StoreError::UnknownAccountId(id))?;

        row.account.amount = new_balance;
        row.version += 1;
        Ok(())
    }

    /// Apply a debit and a credit as one atomic unit.
    ///
    /// Both rows are checked against the versions they were read at; if
    /// either has moved, nothing is written and the commit fails with
    /// `VersionConflict`. On success both balances land and both versions
    /// bump, so no interleaving can observe the debit without the credit.
    pub fn commit_transfer(
        &self,
        debit: BalanceUpdate,
        credit: BalanceUpdate,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();

        for update in [&debit, &credit] {
            let row = inner
                .rows
                .get(&update.id)
                .ok_or(StoreError::UnknownAccountId(update.id))?;
            if row.version != update.expected_version {
                return Err(StoreError::VersionConflict {
                    id: update.id,
                    expected: update.expected_version,
                    found: row.version,
                });
            }
        }

        for update in [&debit, &credit] {
            // Checked above while holding the write lock.
            let row = inner.rows.get_mut(&update.id).unwrap();
            row.account.amount = update.new_balance;
            row.version += 1;
        }

        Ok(())
    }

    /// Full scan. No snapshot guarantee across concurrent writers.
    pub fn get_all(&self) -> Vec<Account> {
        let inner = self.inner.read().unwrap();
        inner.rows.values().map(|row| row.account.clone()).collect()
    }
}
