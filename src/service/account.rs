//! Account Service
//!
//! The only caller of the account store. Enforces the amount and balance
//! invariants and owns the transfer protocol: optimistic, version-checked
//! commits retried under a wall-clock deadline.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Account, LedgerError};
use crate::store::{AccountStore, BalanceUpdate, CustomerDirectory, StoreError};

use super::retry::{AttemptError, RetryError, RetryPolicy};

/// Attempts at generating a non-colliding account number before giving up.
const ACCOUNT_NUMBER_ATTEMPTS: u32 = 3;

pub struct AccountService {
    store: Arc<AccountStore>,
    customers: Arc<dyn CustomerDirectory>,
    transfer_retry: RetryPolicy,
}

impl AccountService {
    pub fn new(
        store: Arc<AccountStore>,
        customers: Arc<dyn CustomerDirectory>,
        transfer_retry: RetryPolicy,
    ) -> Self {
        Self {
            store,
            customers,
            transfer_retry,
        }
    }

    /// Create an account for an existing customer with a starting balance.
    ///
    /// Returns the post-insert re-read so the id and account number are the
    /// storage-assigned values.
    pub fn create_account(&self, customer_id: i64, amount: f64) -> Result<Account, LedgerError> {
        tracing::info!(customer_id, amount, "creating account");

        if amount < 0.0 {
            return Err(LedgerError::InvalidAmount(format!(
                "account balance cannot be less than 0, got {amount}"
            )));
        }
        if !self.customers.customer_exists(customer_id) {
            return Err(LedgerError::CustomerNotFound(customer_id));
        }

        let id = self.insert_with_fresh_number(customer_id, amount)?;
        let row = self
            .store
            .get_by_id(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))?;

        Ok(row.account)
    }

    /// Random account numbers make a collision practically impossible, but
    /// the index can still refuse one; regenerate a bounded number of times.
    fn insert_with_fresh_number(&self, customer_id: i64, amount: f64) -> Result<i64, LedgerError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let account_number = Uuid::new_v4().to_string();
            match self.store.add(&account_number, customer_id, amount) {
                Ok(id) => return Ok(id),
                Err(StoreError::DuplicateAccountNumber(number))
                    if attempt < ACCOUNT_NUMBER_ATTEMPTS =>
                {
                    tracing::warn!(%number, "generated account number collided, regenerating");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub fn get_account(&self, account_number: &str) -> Result<Account, LedgerError> {
        self.store
            .get_by_number(account_number)
            .map(|row| row.account)
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
    }

    pub fn get_all_accounts(&self) -> Vec<Account> {
        self.store.get_all()
    }

    /// Move `amount` from one account to the other and return the
    /// post-transfer state of (source, destination).
    ///
    /// A single attempt reads both rows, validates funds, and commits both
    /// balance writes as one version-checked unit; losing a race to a
    /// concurrent transfer surfaces as a version conflict and the attempt
    /// is retried under the configured deadline. A deadline that elapses
    /// without a commit is an explicit `TransferTimedOut`, never partial
    /// state.
    pub async fn transfer_money(
        &self,
        from_account_number: &str,
        to_account_number: &str,
        amount: f64,
    ) -> Result<(Account, Account), LedgerError> {
        tracing::info!(
            from = from_account_number,
            to = to_account_number,
            amount,
            "transferring money"
        );

        if amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(format!(
                "transfer amount must be higher than 0, got {amount}"
            )));
        }

        let outcome = self
            .transfer_retry
            .run(|| async move {
                match self.try_transfer_once(from_account_number, to_account_number, amount) {
                    Ok(pair) => Ok(pair),
                    Err(LedgerError::Store(ref store_err)) if store_err.is_conflict() => {
                        Err(AttemptError::Transient)
                    }
                    Err(err) => Err(AttemptError::Fatal(err)),
                }
            })
            .await;

        match outcome {
            Ok(pair) => Ok(pair),
            Err(RetryError::Fatal(err)) => Err(err),
            Err(RetryError::DeadlineElapsed { attempts, waited })
            | Err(RetryError::AttemptsExhausted { attempts, waited }) => {
                tracing::warn!(
                    from = from_account_number,
                    to = to_account_number,
                    attempts,
                    waited_ms = waited.as_millis() as u64,
                    "transfer gave up without committing"
                );
                Err(LedgerError::TransferTimedOut {
                    waited_ms: waited.as_millis() as u64,
                    attempts,
                })
            }
        }
    }

    /// One optimistic attempt of the transfer protocol.
    fn try_transfer_once(
        &self,
        from_account_number: &str,
        to_account_number: &str,
        amount: f64,
    ) -> Result<(Account, Account), LedgerError> {
        let source = self
            .store
            .get_by_number(from_account_number)
            .ok_or_else(|| LedgerError::AccountNotFound(from_account_number.to_string()))?;

        if source.account.amount < amount {
            return Err(LedgerError::InsufficientFunds {
                account_number: from_account_number.to_string(),
                requested: amount,
                available: source.account.amount,
            });
        }

        // A transfer onto itself nets to zero; validate and return as-is.
        if from_account_number == to_account_number {
            return Ok((source.account.clone(), source.account));
        }

        let destination = self
            .store
            .get_by_number(to_account_number)
            .ok_or_else(|| LedgerError::AccountNotFound(to_account_number.to_string()))?;

        self.store.commit_transfer(
            BalanceUpdate {
                id: source.account.id,
                expected_version: source.version,
                new_balance: source.account.amount - amount,
            },
            BalanceUpdate {
                id: destination.account.id,
                expected_version: destination.version,
                new_balance: destination.account.amount + amount,
            },
        )?;

        let new_source = self
            .store
            .get_by_id(source.account.id)
            .ok_or_else(|| LedgerError::AccountNotFound(from_account_number.to_string()))?;
        let new_destination = self
            .store
            .get_by_id(destination.account.id)
            .ok_or_else(|| LedgerError::AccountNotFound(to_account_number.to_string()))?;

        tracing::info!(
            account = source.account.id,
            from = source.account.amount,
            to = new_source.account.amount,
            "source balance changed"
        );
        tracing::info!(
            account = destination.account.id,
            from = destination.account.amount,
            to = new_destination.account.amount,
            "destination balance changed"
        );

        Ok((new_source.account, new_destination.account))
    }
}
