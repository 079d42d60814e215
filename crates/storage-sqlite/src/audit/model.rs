//! Database model for audit snapshots.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use clearbook_core::audit::AuditSnapshot;

use crate::utils::parse_decimal;

/// Database model for the write-once audit trail.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::audit_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditSnapshotDB {
    pub id: String,
    pub account_id: String,
    pub event_id: String,
    pub old_balance: String,
    pub current_balance: String,
    pub loss: String,
    pub profit: String,
    pub created_at: NaiveDateTime,
}

impl From<AuditSnapshotDB> for AuditSnapshot {
    fn from(db: AuditSnapshotDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            event_id: db.event_id,
            old_balance: parse_decimal(&db.old_balance, "old_balance"),
            current_balance: parse_decimal(&db.current_balance, "current_balance"),
            loss: parse_decimal(&db.loss, "loss"),
            profit: parse_decimal(&db.profit, "profit"),
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
        }
    }
}
