//! API module
//!
//! HTTP endpoints and the shared application state they run against.

pub mod routes;

use std::sync::Arc;

use crate::service::{AccountService, CustomerService, RetryPolicy};
use crate::store::{AccountStore, CustomerStore};

pub use routes::create_router;

/// Shared state handed to every handler: the two services wired over fresh
/// in-memory stores.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub customers: Arc<CustomerService>,
}

impl AppState {
    pub fn new(transfer_retry: RetryPolicy) -> Self {
        let account_store = Arc::new(AccountStore::new());
        let customer_store = Arc::new(CustomerStore::new());

        Self {
            accounts: Arc::new(AccountService::new(
                account_store,
                customer_store.clone(),
                transfer_retry,
            )),
            customers: Arc::new(CustomerService::new(customer_store)),
        }
    }
}
