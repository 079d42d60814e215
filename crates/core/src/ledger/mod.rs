//! Ledger domain module - the append-only per-account event log.
//!
//! The event log is the single source of truth; every balance figure in the
//! system is derived from it.

pub mod ledger_errors;
pub mod ledger_model;
pub mod ledger_traits;

pub use ledger_errors::*;
pub use ledger_model::*;
pub use ledger_traits::*;

#[cfg(test)]
mod ledger_model_tests;
