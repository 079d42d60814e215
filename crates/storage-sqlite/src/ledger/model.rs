//! Database model for ledger events.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use clearbook_core::ledger::{EventKind, LedgerEvent};

use crate::utils::{parse_decimal, parse_decimal_opt};

/// Database model for one row of the append-only event log.
///
/// Monetary columns are TEXT so decimals survive the round trip without
/// binary floating point ever touching them.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::ledger_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerEventDB {
    pub id: String,
    pub account_id: String,
    pub kind: String,
    pub amount: String,
    pub effective_date: NaiveDate,
    pub sequence: i64,
    pub total_share_pct: Option<String>,
    pub capital_closed: Option<String>,
    pub idempotency_key: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<LedgerEventDB> for LedgerEvent {
    fn from(db: LedgerEventDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            // An unknown kind in a committed row means the schema and the
            // domain enum drifted; surface it loudly in logs but keep the
            // row readable as a balance-neutral funding entry.
            kind: EventKind::from_str(&db.kind).unwrap_or_else(|e| {
                log::error!("Corrupt ledger event kind: {}", e);
                EventKind::Funding
            }),
            amount: parse_decimal(&db.amount, "amount"),
            effective_date: db.effective_date,
            sequence: db.sequence,
            total_share_pct: parse_decimal_opt(db.total_share_pct.as_deref(), "total_share_pct"),
            capital_closed: parse_decimal_opt(db.capital_closed.as_deref(), "capital_closed"),
            idempotency_key: db.idempotency_key,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
        }
    }
}
