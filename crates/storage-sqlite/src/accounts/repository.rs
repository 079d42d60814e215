use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use clearbook_core::accounts::{
    Account, AccountError, AccountRepositoryTrait, AccountUpdate, NewAccount,
};
use clearbook_core::{Error, Result};

use super::model::AccountDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::accounts;

/// Repository for managing account data in the database.
pub struct AccountRepository {
    pool: Arc<DbPool>,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance.
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let mut account_db: AccountDB = new_account.into();
        if account_db.id.is_empty() {
            account_db.id = Uuid::new_v4().to_string();
        }

        diesel::insert_into(accounts::table)
            .values(&account_db)
            .execute(&mut conn)
            .map_err(StorageError::from)?;

        Ok(account_db.into())
    }

    async fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        let account_id = account_update.id.clone();

        conn.immediate_transaction::<Account, StorageError, _>(|conn| {
            let existing = accounts::table
                .find(&account_id)
                .select(AccountDB::as_select())
                .first::<AccountDB>(conn)?;

            let mut changed = existing.clone();
            if let Some(name) = account_update.name {
                changed.name = name;
            }
            if let Some(pct) = account_update.my_share_pct {
                changed.my_share_pct = pct.to_string();
                // Individual clients settle at the operator's share; keep the
                // stored basis in step.
                if !changed.is_company_client {
                    changed.total_share_pct = pct.to_string();
                }
            }
            if let Some(pct) = account_update.company_share_pct {
                changed.company_share_pct = pct.to_string();
            }
            if let Some(active) = account_update.is_active {
                changed.is_active = active;
            }
            changed.updated_at = Utc::now().naive_utc();

            diesel::update(accounts::table.find(&account_id))
                .set(&changed)
                .execute(conn)?;

            Ok(changed.into())
        })
        .map_err(Error::from)
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let account_db = accounts::table
            .find(account_id)
            .select(AccountDB::as_select())
            .first::<AccountDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::from(AccountError::NotFound(account_id.to_string()))
                }
                other => Error::from(StorageError::from(other)),
            })?;

        Ok(account_db.into())
    }

    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table.into_boxed();
        if let Some(is_active) = is_active_filter {
            query = query.filter(accounts::is_active.eq(is_active));
        }

        let accounts_db = query
            .select(AccountDB::as_select())
            .order(accounts::name.asc())
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(accounts_db.into_iter().map(Account::from).collect())
    }
}
