use thiserror::Error;

/// Errors for ledger event operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger event not found: {0}")]
    NotFound(String),

    #[error("Invalid ledger event: {0}")]
    InvalidEvent(String),

    #[error("Unknown event kind: {0}")]
    UnknownKind(String),
}
