use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Write-once snapshot of the loss/profit figures produced by one committed
/// settlement or withdrawal.
///
/// Exists purely for traceability: the derivation engine never reads it, but
/// every historical figure stays reconstructable without replaying the full
/// event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditSnapshot {
    pub id: String,
    pub account_id: String,
    /// Ledger event this snapshot was committed with.
    pub event_id: String,
    pub old_balance: Decimal,
    pub current_balance: Decimal,
    pub loss: Decimal,
    pub profit: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input model for the audit row paired with a ledger append. The store
/// assigns the id, the event id, and the timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuditSnapshot {
    pub account_id: String,
    pub old_balance: Decimal,
    pub current_balance: Decimal,
    pub loss: Decimal,
    pub profit: Decimal,
}
