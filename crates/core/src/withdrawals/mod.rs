//! Withdrawal domain module - the profit-withdrawal ("operator pays") state
//! machine. Deliberately independent of the settlement module: the two paths
//! share no guard logic.

pub mod withdrawals_errors;
pub mod withdrawals_service;

pub use withdrawals_errors::*;
pub use withdrawals_service::*;

#[cfg(test)]
mod withdrawals_service_tests;
