use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Denormalized "as of now" balance snapshot for one account.
///
/// Entirely derivable from the ledger: deleting an entry and recomputing is
/// always safe and produces the same values the synchronous path would.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCacheEntry {
    pub account_id: String,
    pub current_balance: Decimal,
    pub old_balance: Decimal,
    pub total_funding: Decimal,
    pub refreshed_at: DateTime<Utc>,
}
