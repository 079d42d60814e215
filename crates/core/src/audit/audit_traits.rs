use crate::audit::AuditSnapshot;
use crate::errors::Result;

/// Read-only view over the audit trail.
///
/// Writes happen exclusively through `LedgerRepositoryTrait::append` as the
/// atomic pair of a ledger event; there is deliberately no standalone insert.
pub trait AuditRepositoryTrait: Send + Sync {
    /// Returns an account's audit rows, oldest first.
    fn list_by_account(&self, account_id: &str) -> Result<Vec<AuditSnapshot>>;

    /// Returns the audit row paired with a specific ledger event, if any.
    fn get_by_event(&self, event_id: &str) -> Result<Option<AuditSnapshot>>;
}
