//! Account domain module - client-exchange account metadata and share split.

pub mod accounts_errors;
pub mod accounts_model;
pub mod accounts_service;
pub mod accounts_traits;

pub use accounts_errors::*;
pub use accounts_model::*;
pub use accounts_service::*;
pub use accounts_traits::*;

#[cfg(test)]
mod accounts_model_tests;
