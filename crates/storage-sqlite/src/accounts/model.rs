//! Database model for accounts.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use clearbook_core::accounts::{Account, NewAccount};

use crate::utils::parse_decimal;

/// Database model for accounts.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub my_share_pct: String,
    pub company_share_pct: String,
    pub total_share_pct: String,
    pub is_company_client: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            currency: db.currency,
            my_share_pct: parse_decimal(&db.my_share_pct, "my_share_pct"),
            company_share_pct: parse_decimal(&db.company_share_pct, "company_share_pct"),
            total_share_pct: parse_decimal(&db.total_share_pct, "total_share_pct"),
            is_company_client: db.is_company_client,
            is_active: db.is_active,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        let now = Utc::now().naive_utc();
        let total_share_pct = domain.total_share_pct();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            currency: domain.currency,
            my_share_pct: domain.my_share_pct.to_string(),
            company_share_pct: domain.company_share_pct.to_string(),
            total_share_pct: total_share_pct.to_string(),
            is_company_client: domain.is_company_client,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
