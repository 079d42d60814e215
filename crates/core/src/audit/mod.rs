//! Audit trail module - write-once loss/profit snapshots per committed
//! mutation.

pub mod audit_model;
pub mod audit_traits;

pub use audit_model::*;
pub use audit_traits::*;
