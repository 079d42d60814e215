use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::audit::{AuditSnapshot, NewAuditSnapshot};
use crate::balances::balance_calculator::{current_balance, profit};
use crate::cache::{BalanceCacheEntry, BalanceCacheService, CacheRepositoryTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::ledger::{
    AppendedEvent, EventKind, LedgerEvent, LedgerRepositoryTrait, NewLedgerEvent,
};
use crate::locks::AccountLockManager;
use crate::utils::Clock;
use crate::withdrawals::{WithdrawalError, WithdrawalService};

struct TestClock;

impl Clock for TestClock {
    fn now(&self) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }
}

#[derive(Default)]
struct InMemoryLedger {
    events: Mutex<Vec<LedgerEvent>>,
}

impl InMemoryLedger {
    fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerRepositoryTrait for InMemoryLedger {
    async fn append(
        &self,
        event: NewLedgerEvent,
        audit: Option<NewAuditSnapshot>,
    ) -> Result<AppendedEvent> {
        event.validate()?;
        let mut events = self.events.lock().unwrap();
        let sequence = events
            .iter()
            .filter(|e| e.account_id == event.account_id)
            .map(|e| e.sequence)
            .max()
            .unwrap_or(0)
            + 1;
        let persisted = LedgerEvent {
            id: Uuid::new_v4().to_string(),
            account_id: event.account_id,
            kind: event.kind,
            amount: event.amount,
            effective_date: event.effective_date,
            sequence,
            total_share_pct: event.total_share_pct,
            capital_closed: event.capital_closed,
            idempotency_key: event.idempotency_key,
            created_at: Utc::now(),
        };
        events.push(persisted.clone());

        let audit_row = audit.map(|a| AuditSnapshot {
            id: Uuid::new_v4().to_string(),
            account_id: a.account_id,
            event_id: persisted.id.clone(),
            old_balance: a.old_balance,
            current_balance: a.current_balance,
            loss: a.loss,
            profit: a.profit,
            created_at: Utc::now(),
        });

        Ok(AppendedEvent {
            event: persisted,
            audit: audit_row,
        })
    }

    fn events_through(
        &self,
        account_id: &str,
        through_date: Option<NaiveDate>,
    ) -> Result<Vec<LedgerEvent>> {
        let events = self.events.lock().unwrap();
        let mut out: Vec<LedgerEvent> = events
            .iter()
            .filter(|e| e.account_id == account_id)
            .filter(|e| through_date.map_or(true, |d| e.effective_date <= d))
            .cloned()
            .collect();
        out.sort_by_key(|e| e.sort_key());
        Ok(out)
    }

    fn find_by_idempotency_key(
        &self,
        account_id: &str,
        idempotency_key: &str,
    ) -> Result<Option<LedgerEvent>> {
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .find(|e| {
                e.account_id == account_id
                    && e.idempotency_key.as_deref() == Some(idempotency_key)
            })
            .cloned())
    }
}

#[derive(Default)]
struct InMemoryCache {
    entries: Mutex<Vec<BalanceCacheEntry>>,
}

impl CacheRepositoryTrait for InMemoryCache {
    fn get(&self, account_id: &str) -> Result<Option<BalanceCacheEntry>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.iter().find(|e| e.account_id == account_id).cloned())
    }

    fn upsert(&self, entry: &BalanceCacheEntry) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|e| e.account_id != entry.account_id);
        entries.push(entry.clone());
        Ok(())
    }

    fn delete(&self, account_id: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|e| e.account_id != account_id);
        Ok(())
    }
}

struct FailingCache;

impl CacheRepositoryTrait for FailingCache {
    fn get(&self, _account_id: &str) -> Result<Option<BalanceCacheEntry>> {
        Ok(None)
    }

    fn upsert(&self, _entry: &BalanceCacheEntry) -> Result<()> {
        Err(Error::Database(DatabaseError::QueryFailed(
            "disk I/O error".to_string(),
        )))
    }

    fn delete(&self, _account_id: &str) -> Result<()> {
        Ok(())
    }
}

struct Fixture {
    service: WithdrawalService,
    ledger: Arc<InMemoryLedger>,
    cache_repo: Arc<InMemoryCache>,
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

fn fixture() -> Fixture {
    let ledger = Arc::new(InMemoryLedger::default());
    let cache_repo = Arc::new(InMemoryCache::default());
    let clock = Arc::new(TestClock);
    let locks = Arc::new(AccountLockManager::new());
    let cache = Arc::new(BalanceCacheService::new(
        cache_repo.clone(),
        ledger.clone(),
        clock.clone(),
    ));
    let service = WithdrawalService::new(ledger.clone(), locks, cache, clock);
    Fixture {
        service,
        ledger,
        cache_repo,
    }
}

async fn seed_profit_state(fixture: &Fixture) {
    // old_balance=100, current_balance=140 => profit=40.
    fixture
        .ledger
        .append(
            NewLedgerEvent::funding("acc-1", dec!(100), date("2026-01-05")),
            None,
        )
        .await
        .unwrap();
    fixture
        .ledger
        .append(
            NewLedgerEvent::balance_record("acc-1", dec!(140), date("2026-02-01")),
            None,
        )
        .await
        .unwrap();
}

fn withdrawal_err(err: Error) -> WithdrawalError {
    match err {
        Error::Withdrawal(inner) => inner,
        other => panic!("Expected withdrawal error, got: {}", other),
    }
}

#[tokio::test]
async fn withdraws_profit_as_a_balance_adjustment() {
    let fx = fixture();
    seed_profit_state(&fx).await;

    let audit = fx
        .service
        .withdraw_profit("acc-1", dec!(15), Some(date("2026-03-10")))
        .await
        .unwrap();

    assert_eq!(audit.current_balance, dec!(125));
    assert_eq!(audit.old_balance, dec!(100));
    assert_eq!(audit.profit, dec!(25));
    assert_eq!(audit.loss, Decimal::ZERO);

    let events = fx.ledger.events();
    let withdrawal = events
        .iter()
        .find(|e| e.kind == EventKind::Withdrawal)
        .unwrap();
    // The event carries the adjusted balance, not the payout.
    assert_eq!(withdrawal.amount, dec!(125));
    assert_eq!(withdrawal.capital_closed, Some(dec!(15)));

    assert_eq!(
        current_balance(&events, date("2026-03-20")),
        Some(dec!(125))
    );
    assert_eq!(profit(&events, date("2026-03-20")), dec!(25));
}

#[tokio::test]
async fn repeated_withdrawals_shrink_profit_to_zero() {
    let fx = fixture();
    seed_profit_state(&fx).await;

    fx.service
        .withdraw_profit("acc-1", dec!(15), Some(date("2026-03-10")))
        .await
        .unwrap();
    let audit = fx
        .service
        .withdraw_profit("acc-1", dec!(25), Some(date("2026-03-11")))
        .await
        .unwrap();
    assert_eq!(audit.profit, Decimal::ZERO);
    assert_eq!(audit.current_balance, dec!(100));

    let err = fx
        .service
        .withdraw_profit("acc-1", dec!(1), Some(date("2026-03-12")))
        .await
        .unwrap_err();
    assert!(matches!(
        withdrawal_err(err),
        WithdrawalError::NoActiveProfit
    ));
}

#[tokio::test]
async fn rejects_non_positive_withdrawal() {
    let fx = fixture();
    seed_profit_state(&fx).await;

    let err = fx
        .service
        .withdraw_profit("acc-1", dec!(-1), Some(date("2026-03-10")))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(fx.ledger.event_count(), 2);
}

#[tokio::test]
async fn rejects_withdrawal_in_loss_state() {
    let fx = fixture();
    fx.ledger
        .append(
            NewLedgerEvent::funding("acc-1", dec!(100), date("2026-01-05")),
            None,
        )
        .await
        .unwrap();
    fx.ledger
        .append(
            NewLedgerEvent::balance_record("acc-1", dec!(40), date("2026-02-01")),
            None,
        )
        .await
        .unwrap();

    let err = fx
        .service
        .withdraw_profit("acc-1", dec!(5), Some(date("2026-03-10")))
        .await
        .unwrap_err();
    assert!(matches!(
        withdrawal_err(err),
        WithdrawalError::NoActiveProfit
    ));
}

#[tokio::test]
async fn rejects_withdrawal_exceeding_profit() {
    let fx = fixture();
    seed_profit_state(&fx).await;

    let err = fx
        .service
        .withdraw_profit("acc-1", dec!(50), Some(date("2026-03-10")))
        .await
        .unwrap_err();
    match withdrawal_err(err) {
        WithdrawalError::ExceedsProfit { withdrawal, profit } => {
            assert_eq!(withdrawal, dec!(50));
            assert_eq!(profit, dec!(40));
        }
        other => panic!("Expected ExceedsProfit, got: {}", other),
    }
    assert_eq!(fx.ledger.event_count(), 2);
}

#[tokio::test]
async fn rejects_withdrawal_driving_balance_negative() {
    let fx = fixture();
    // A negative capital base (settlement anchored on a deficit balance)
    // makes profit larger than the current balance itself.
    fx.ledger
        .append(
            NewLedgerEvent::funding("acc-1", dec!(100), date("2026-01-05")),
            None,
        )
        .await
        .unwrap();
    fx.ledger
        .append(
            NewLedgerEvent::balance_record("acc-1", dec!(-10), date("2026-01-20")),
            None,
        )
        .await
        .unwrap();
    fx.ledger
        .append(
            NewLedgerEvent {
                account_id: "acc-1".to_string(),
                kind: EventKind::Settlement,
                amount: dec!(11),
                effective_date: date("2026-01-25"),
                total_share_pct: Some(dec!(10)),
                capital_closed: Some(dec!(110)),
                idempotency_key: Some("seed-key".to_string()),
            },
            None,
        )
        .await
        .unwrap();
    fx.ledger
        .append(
            NewLedgerEvent::balance_record("acc-1", dec!(5), date("2026-02-01")),
            None,
        )
        .await
        .unwrap();

    // old_balance = -10, current = 5, profit = 15; withdrawing 10 would push
    // the balance below zero.
    let err = fx
        .service
        .withdraw_profit("acc-1", dec!(10), Some(date("2026-03-10")))
        .await
        .unwrap_err();
    match withdrawal_err(err) {
        WithdrawalError::NegativeBalance { balance } => assert_eq!(balance, dec!(-5)),
        other => panic!("Expected NegativeBalance, got: {}", other),
    }
}

#[tokio::test]
async fn commit_survives_a_cache_refresh_failure() {
    let ledger = Arc::new(InMemoryLedger::default());
    let clock = Arc::new(TestClock);
    let locks = Arc::new(AccountLockManager::new());
    let cache = Arc::new(BalanceCacheService::new(
        Arc::new(FailingCache),
        ledger.clone(),
        clock.clone(),
    ));
    let service = WithdrawalService::new(ledger.clone(), locks, cache, clock);

    ledger
        .append(
            NewLedgerEvent::funding("acc-1", dec!(100), date("2026-01-05")),
            None,
        )
        .await
        .unwrap();
    ledger
        .append(
            NewLedgerEvent::balance_record("acc-1", dec!(140), date("2026-02-01")),
            None,
        )
        .await
        .unwrap();

    // The ledger commit is durable; a cache persistence failure must not
    // report the withdrawal as failed.
    let audit = service
        .withdraw_profit("acc-1", dec!(15), Some(date("2026-03-10")))
        .await
        .unwrap();
    assert_eq!(audit.profit, dec!(25));
    assert_eq!(ledger.event_count(), 3);
    assert_eq!(
        current_balance(&ledger.events(), date("2026-03-20")),
        Some(dec!(125))
    );
}

#[tokio::test]
async fn commit_refreshes_the_cache_projection() {
    let fx = fixture();
    seed_profit_state(&fx).await;

    fx.service
        .withdraw_profit("acc-1", dec!(15), Some(date("2026-03-10")))
        .await
        .unwrap();

    let entry = fx.cache_repo.get("acc-1").unwrap().unwrap();
    assert_eq!(entry.current_balance, dec!(125));
    assert_eq!(entry.old_balance, dec!(100));
}
