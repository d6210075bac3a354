//! Domain module
//!
//! Core domain types and business rules.

pub mod error;
pub mod model;

pub use error::LedgerError;
pub use model::{Account, Customer};
