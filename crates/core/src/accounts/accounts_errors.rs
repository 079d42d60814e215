use thiserror::Error;

/// Errors for account operations.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Invalid account data: {0}")]
    InvalidData(String),

    #[error("Account is inactive: {0}")]
    Inactive(String),
}
