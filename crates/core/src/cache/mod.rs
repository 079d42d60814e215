//! Balance cache module - disposable "as of now" projection of derived
//! balances.

pub mod cache_model;
pub mod cache_service;
pub mod cache_traits;

pub use cache_model::*;
pub use cache_service::*;
pub use cache_traits::*;
