//! Clearbook Core - Domain entities, services, and traits.
//!
//! This crate contains the settlement and reconciliation engine for
//! client-exchange capital accounts: the append-only ledger model, the pure
//! balance-derivation functions, the loss-settlement and profit-withdrawal
//! state machines, the per-account lock manager, the audit trail, and the
//! balance cache projection. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` crate.

pub mod accounts;
pub mod audit;
pub mod balances;
pub mod cache;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod locks;
pub mod settlements;
pub mod utils;
pub mod withdrawals;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
