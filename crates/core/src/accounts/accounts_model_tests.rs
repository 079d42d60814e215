use chrono::Utc;
use rust_decimal_macros::dec;

use crate::accounts::{Account, AccountUpdate, NewAccount};
use crate::constants::COMPANY_TOTAL_SHARE_PCT;

fn base_account() -> Account {
    Account {
        id: "acc-1".to_string(),
        name: "Client A / ExchangeX".to_string(),
        currency: "USD".to_string(),
        my_share_pct: dec!(25),
        company_share_pct: dec!(75),
        total_share_pct: dec!(25),
        is_company_client: false,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn individual_account_settles_at_configured_share() {
    let account = base_account();
    assert_eq!(account.effective_total_share_pct(), dec!(25));
}

#[test]
fn company_account_settles_at_fixed_share() {
    let account = Account {
        is_company_client: true,
        total_share_pct: dec!(42),
        ..base_account()
    };
    assert_eq!(
        account.effective_total_share_pct(),
        COMPANY_TOTAL_SHARE_PCT
    );
}

#[test]
fn new_account_validation_rejects_bad_share() {
    let mut new_account = NewAccount {
        id: None,
        name: "Client".to_string(),
        currency: "USD".to_string(),
        my_share_pct: dec!(25),
        company_share_pct: dec!(75),
        is_company_client: false,
    };
    assert!(new_account.validate().is_ok());

    new_account.my_share_pct = dec!(0);
    assert!(new_account.validate().is_err());

    new_account.my_share_pct = dec!(101);
    assert!(new_account.validate().is_err());
}

#[test]
fn new_account_total_share_basis() {
    let mut new_account = NewAccount {
        id: None,
        name: "Client".to_string(),
        currency: "USD".to_string(),
        my_share_pct: dec!(25),
        company_share_pct: dec!(75),
        is_company_client: false,
    };
    assert_eq!(new_account.total_share_pct(), dec!(25));

    new_account.is_company_client = true;
    assert_eq!(new_account.total_share_pct(), COMPANY_TOTAL_SHARE_PCT);
}

#[test]
fn update_validation_requires_id_and_sane_shares() {
    let update = AccountUpdate {
        id: "".to_string(),
        name: None,
        my_share_pct: None,
        company_share_pct: None,
        is_active: None,
    };
    assert!(update.validate().is_err());

    let update = AccountUpdate {
        id: "acc-1".to_string(),
        name: Some("Renamed".to_string()),
        my_share_pct: Some(dec!(30)),
        company_share_pct: Some(dec!(70)),
        is_active: Some(false),
    };
    assert!(update.validate().is_ok());
}
