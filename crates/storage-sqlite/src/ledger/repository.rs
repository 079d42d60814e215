use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use clearbook_core::audit::{AuditSnapshot, NewAuditSnapshot};
use clearbook_core::ledger::{
    AppendedEvent, LedgerEvent, LedgerRepositoryTrait, NewLedgerEvent,
};
use clearbook_core::{Error, Result};

use super::model::LedgerEventDB;
use crate::audit::model::AuditSnapshotDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::{audit_snapshots, ledger_events};

/// Repository for the append-only ledger event log.
pub struct LedgerRepository {
    pool: Arc<DbPool>,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository instance.
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn append(
        &self,
        event: NewLedgerEvent,
        audit: Option<NewAuditSnapshot>,
    ) -> Result<AppendedEvent> {
        event.validate().map_err(Error::from)?;
        let mut conn = get_connection(&self.pool)?;

        conn.immediate_transaction::<AppendedEvent, StorageError, _>(|conn| {
            let now = Utc::now().naive_utc();

            // IMMEDIATE takes the write lock up front, so the max(sequence)
            // read and the insert below see the same log tail.
            let next_sequence: i64 = ledger_events::table
                .filter(ledger_events::account_id.eq(&event.account_id))
                .select(diesel::dsl::max(ledger_events::sequence))
                .first::<Option<i64>>(conn)?
                .unwrap_or(0)
                + 1;

            let event_db = LedgerEventDB {
                id: Uuid::new_v4().to_string(),
                account_id: event.account_id.clone(),
                kind: event.kind.as_str().to_string(),
                amount: event.amount.to_string(),
                effective_date: event.effective_date,
                sequence: next_sequence,
                total_share_pct: event.total_share_pct.map(|d| d.to_string()),
                capital_closed: event.capital_closed.map(|d| d.to_string()),
                idempotency_key: event.idempotency_key.clone(),
                created_at: now,
            };

            diesel::insert_into(ledger_events::table)
                .values(&event_db)
                .execute(conn)?;

            let audit_db = match audit {
                Some(snapshot) => {
                    let row = AuditSnapshotDB {
                        id: Uuid::new_v4().to_string(),
                        account_id: snapshot.account_id,
                        event_id: event_db.id.clone(),
                        old_balance: snapshot.old_balance.to_string(),
                        current_balance: snapshot.current_balance.to_string(),
                        loss: snapshot.loss.to_string(),
                        profit: snapshot.profit.to_string(),
                        created_at: now,
                    };
                    diesel::insert_into(audit_snapshots::table)
                        .values(&row)
                        .execute(conn)?;
                    Some(row)
                }
                None => None,
            };

            Ok(AppendedEvent {
                event: event_db.into(),
                audit: audit_db.map(AuditSnapshot::from),
            })
        })
        .map_err(Error::from)
    }

    fn events_through(
        &self,
        account_id: &str,
        through_date: Option<NaiveDate>,
    ) -> Result<Vec<LedgerEvent>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = ledger_events::table
            .filter(ledger_events::account_id.eq(account_id))
            .into_boxed();
        if let Some(date) = through_date {
            query = query.filter(ledger_events::effective_date.le(date));
        }

        let rows = query
            .select(LedgerEventDB::as_select())
            .order((
                ledger_events::effective_date.asc(),
                ledger_events::sequence.asc(),
            ))
            .load::<LedgerEventDB>(&mut conn)
            .map_err(StorageError::from)?;

        let mut events: Vec<LedgerEvent> = rows.into_iter().map(LedgerEvent::from).collect();
        // Kind priority sits between date and sequence in the derivation
        // order and is a domain rule, so the final sort happens here.
        events.sort_by_key(LedgerEvent::sort_key);
        Ok(events)
    }

    fn find_by_idempotency_key(
        &self,
        account_id: &str,
        idempotency_key: &str,
    ) -> Result<Option<LedgerEvent>> {
        let mut conn = get_connection(&self.pool)?;

        let row = ledger_events::table
            .filter(ledger_events::account_id.eq(account_id))
            .filter(ledger_events::idempotency_key.eq(idempotency_key))
            .select(LedgerEventDB::as_select())
            .first::<LedgerEventDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(LedgerEvent::from))
    }
}
