//! Settlement domain module - the loss-settlement ("client pays") state
//! machine.

pub mod idempotency;
pub mod settlements_errors;
pub mod settlements_service;

pub use idempotency::*;
pub use settlements_errors::*;
pub use settlements_service::*;
