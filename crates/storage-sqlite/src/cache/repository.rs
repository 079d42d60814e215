use std::sync::Arc;

use diesel::prelude::*;

use clearbook_core::cache::{BalanceCacheEntry, CacheRepositoryTrait};
use clearbook_core::Result;

use super::model::BalanceCacheEntryDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::balance_cache;

/// Repository for the balance cache projection.
pub struct CacheRepository {
    pool: Arc<DbPool>,
}

impl CacheRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl CacheRepositoryTrait for CacheRepository {
    fn get(&self, account_id: &str) -> Result<Option<BalanceCacheEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let row = balance_cache::table
            .find(account_id)
            .select(BalanceCacheEntryDB::as_select())
            .first::<BalanceCacheEntryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(BalanceCacheEntry::from))
    }

    fn upsert(&self, entry: &BalanceCacheEntry) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let row = BalanceCacheEntryDB::from(entry);

        diesel::insert_into(balance_cache::table)
            .values(&row)
            .on_conflict(balance_cache::account_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .map_err(StorageError::from)?;

        Ok(())
    }

    fn delete(&self, account_id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        diesel::delete(balance_cache::table.find(account_id))
            .execute(&mut conn)
            .map_err(StorageError::from)?;

        Ok(())
    }
}
