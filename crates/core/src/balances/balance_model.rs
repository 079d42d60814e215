use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived balance figures for one account as of a date.
///
/// Everything here is recomputed from the event log; none of it is ever
/// stored as ground truth. Loss and profit are mutually exclusive by
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub account_id: String,
    pub old_balance: Decimal,
    pub current_balance: Decimal,
    pub loss: Decimal,
    pub profit: Decimal,
    /// Share-adjusted amount the client currently owes for the outstanding
    /// loss.
    pub pending: Decimal,
    pub as_of: NaiveDate,
}
