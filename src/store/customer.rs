//! Customer Store
//!
//! Customer records live outside the ledger core; the core only asks
//! whether a customer exists. `CustomerDirectory` is that seam, and
//! `CustomerStore` is the in-memory implementation backing the customer
//! endpoints.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::Customer;

/// What the ledger core needs to know about customers: nothing beyond
/// existence.
pub trait CustomerDirectory: Send + Sync {
    fn customer_exists(&self, customer_id: i64) -> bool;
}

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<i64, Customer>,
    next_id: i64,
}

/// In-memory customer storage.
#[derive(Debug, Default)]
pub struct CustomerStore {
    inner: RwLock<Inner>,
}

impl CustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new customer and return its storage-assigned id.
    pub fn add(&self, name: &str, age: i32, city: &str, phone_number: &str) -> i64 {
        let mut inner = self.inner.write().unwrap();

        inner.next_id += 1;
        let id = inner.next_id;

        inner.rows.insert(
            id,
            Customer {
                id,
                name: name.to_string(),
                age,
                city: city.to_string(),
                phone_number: phone_number.to_string(),
            },
        );

        id
    }

    pub fn get(&self, customer_id: i64) -> Option<Customer> {
        let inner = self.inner.read().unwrap();
        inner.rows.get(&customer_id).cloned()
    }

    pub fn get_all(&self) -> Vec<Customer> {
        let inner = self.inner.read().unwrap();
        inner.rows.values().cloned().collect()
    }
}

impl CustomerDirectory for CustomerStore {
    fn customer_exists(&self, customer_id: i64) -> bool {
        let inner = self.inner.read().unwrap();
        inner.rows.contains_key(&customer_id)
    }
}
