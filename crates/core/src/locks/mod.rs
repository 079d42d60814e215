//! Account lock module - per-account exclusive mutation locks.

pub mod lock_manager;

pub use lock_manager::*;
