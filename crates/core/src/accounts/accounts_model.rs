use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountError;
use crate::constants::COMPANY_TOTAL_SHARE_PCT;

/// Domain model for one client-exchange relationship.
///
/// The share percentages describe how an outstanding loss (or profit) is
/// split between the operator and the counterpart. `total_share_pct` is the
/// configured basis for settlements on individual accounts; company-client
/// accounts override it with a fixed business-rule percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub my_share_pct: Decimal,
    pub company_share_pct: Decimal,
    pub total_share_pct: Decimal,
    pub is_company_client: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Share basis frozen at the start of a settlement transaction.
    ///
    /// Company clients always settle at the fixed company percentage, even if
    /// the account's configured split changed after onboarding.
    pub fn effective_total_share_pct(&self) -> Decimal {
        if self.is_company_client {
            COMPANY_TOTAL_SHARE_PCT
        } else {
            self.total_share_pct
        }
    }
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub id: Option<String>,
    pub name: String,
    pub currency: String,
    pub my_share_pct: Decimal,
    pub company_share_pct: Decimal,
    pub is_company_client: bool,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.name.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account name cannot be empty".to_string(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account currency cannot be empty".to_string(),
            ));
        }
        if self.my_share_pct <= Decimal::ZERO || self.my_share_pct > Decimal::ONE_HUNDRED {
            return Err(AccountError::InvalidData(format!(
                "my_share_pct must be in (0, 100], got {}",
                self.my_share_pct
            )));
        }
        if self.company_share_pct < Decimal::ZERO || self.company_share_pct > Decimal::ONE_HUNDRED
        {
            return Err(AccountError::InvalidData(format!(
                "company_share_pct must be in [0, 100], got {}",
                self.company_share_pct
            )));
        }
        Ok(())
    }

    /// Total share basis stored on the account at creation time.
    /// Individual clients settle at the operator's share; company clients are
    /// pinned to the fixed company percentage at validation time instead.
    pub fn total_share_pct(&self) -> Decimal {
        if self.is_company_client {
            COMPANY_TOTAL_SHARE_PCT
        } else {
            self.my_share_pct
        }
    }
}

/// Input model for updating an account's metadata or share split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: String,
    pub name: Option<String>,
    pub my_share_pct: Option<Decimal>,
    pub company_share_pct: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl AccountUpdate {
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.id.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account ID cannot be empty".to_string(),
            ));
        }
        if let Some(pct) = self.my_share_pct {
            if pct <= Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(AccountError::InvalidData(format!(
                    "my_share_pct must be in (0, 100], got {}",
                    pct
                )));
            }
        }
        if let Some(pct) = self.company_share_pct {
            if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(AccountError::InvalidData(format!(
                    "company_share_pct must be in [0, 100], got {}",
                    pct
                )));
            }
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AccountError::InvalidData(
                    "Account name cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
