use std::sync::Arc;

use diesel::prelude::*;

use clearbook_core::audit::{AuditRepositoryTrait, AuditSnapshot};
use clearbook_core::Result;

use super::model::AuditSnapshotDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::audit_snapshots;

/// Read-only repository over the audit trail. Rows are inserted exclusively
/// by `LedgerRepository::append`.
pub struct AuditRepository {
    pool: Arc<DbPool>,
}

impl AuditRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl AuditRepositoryTrait for AuditRepository {
    fn list_by_account(&self, account_id: &str) -> Result<Vec<AuditSnapshot>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = audit_snapshots::table
            .filter(audit_snapshots::account_id.eq(account_id))
            .select(AuditSnapshotDB::as_select())
            .order(audit_snapshots::created_at.asc())
            .load::<AuditSnapshotDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(AuditSnapshot::from).collect())
    }

    fn get_by_event(&self, event_id: &str) -> Result<Option<AuditSnapshot>> {
        let mut conn = get_connection(&self.pool)?;

        let row = audit_snapshots::table
            .filter(audit_snapshots::event_id.eq(event_id))
            .select(AuditSnapshotDB::as_select())
            .first::<AuditSnapshotDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(AuditSnapshot::from))
    }
}
