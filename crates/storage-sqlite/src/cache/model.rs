//! Database model for the balance cache projection.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use clearbook_core::cache::BalanceCacheEntry;

use crate::utils::parse_decimal;

/// Database model for the per-account balance cache row.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Serialize,
    Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::balance_cache)]
#[diesel(primary_key(account_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceCacheEntryDB {
    pub account_id: String,
    pub current_balance: String,
    pub old_balance: String,
    pub total_funding: String,
    pub refreshed_at: NaiveDateTime,
}

impl From<BalanceCacheEntryDB> for BalanceCacheEntry {
    fn from(db: BalanceCacheEntryDB) -> Self {
        Self {
            account_id: db.account_id,
            current_balance: parse_decimal(&db.current_balance, "current_balance"),
            old_balance: parse_decimal(&db.old_balance, "old_balance"),
            total_funding: parse_decimal(&db.total_funding, "total_funding"),
            refreshed_at: DateTime::from_naive_utc_and_offset(db.refreshed_at, Utc),
        }
    }
}

impl From<&BalanceCacheEntry> for BalanceCacheEntryDB {
    fn from(domain: &BalanceCacheEntry) -> Self {
        Self {
            account_id: domain.account_id.clone(),
            current_balance: domain.current_balance.to_string(),
            old_balance: domain.old_balance.to_string(),
            total_funding: domain.total_funding.to_string(),
            refreshed_at: domain.refreshed_at.naive_utc(),
        }
    }
}
