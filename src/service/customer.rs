//! Customer Service
//!
//! CRUD over customer records. The ledger core only depends on the
//! existence check; the rest backs the customer endpoints.

use std::sync::Arc;

use crate::domain::{Customer, LedgerError};
use crate::store::CustomerStore;

pub struct CustomerService {
    store: Arc<CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<CustomerStore>) -> Self {
        Self { store }
    }

    /// Create a customer. Returns the post-insert re-read with the
    /// storage-assigned id.
    pub fn add_customer(
        &self,
        name: &str,
        age: i32,
        city: &str,
        phone_number: &str,
    ) -> Result<Customer, LedgerError> {
        tracing::info!(name, age, city, phone_number, "creating customer");

        if age <= 0 {
            return Err(LedgerError::InvalidAge(format!(
                "customer age must be greater than 0, got {age}"
            )));
        }

        let id = self.store.add(name, age, city, phone_number);
        self.store
            .get(id)
            .ok_or(LedgerError::CustomerNotFound(id))
    }

    pub fn get_customer(&self, customer_id: i64) -> Result<Customer, LedgerError> {
        self.store
            .get(customer_id)
            .ok_or(LedgerError::CustomerNotFound(customer_id))
    }

    pub fn get_all_customers(&self) -> Vec<Customer> {
        self.store.get_all()
    }
}
