//! Service module
//!
//! Business operations over the stores. `AccountService` owns the transfer
//! protocol and its concurrency control; `CustomerService` owns customer
//! CRUD.

pub mod account;
pub mod customer;
pub mod retry;

pub use account::AccountService;
pub use customer::CustomerService;
pub use retry::{AttemptError, Backoff, RetryError, RetryPolicy};
