//! money-transfer Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod domain;
pub mod service;
pub mod store;

mod error;

pub use config::Config;
pub use domain::{Account, Customer, LedgerError};
pub use error::{AppError, AppResult, ErrorResponse};
