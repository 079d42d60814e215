//! Balance derivation module - pure functions computing old/current balance,
//! loss, profit, and pending amount from the event log, plus the read-side
//! service.

pub mod balance_calculator;
pub mod balance_model;
pub mod balances_service;

pub use balance_calculator::*;
pub use balance_model::*;
pub use balances_service::*;
