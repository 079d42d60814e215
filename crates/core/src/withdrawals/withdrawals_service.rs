//! Profit-withdrawal state machine.
//!
//! The "operator pays" path: a withdrawal realizes part of an account's
//! profit by committing a balance adjustment, not a separate derived
//! quantity. Runs under the same per-account lock discipline as settlements
//! but shares none of their guard logic.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::audit::{AuditSnapshot, NewAuditSnapshot};
use crate::balances::balance_calculator::{current_balance, old_balance};
use crate::cache::BalanceCacheService;
use crate::constants::EPSILON;
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::{LedgerRepositoryTrait, NewLedgerEvent};
use crate::locks::AccountLockManager;
use crate::utils::{is_zero_money, Clock};
use crate::withdrawals::WithdrawalError;

/// Validates and commits profit-withdrawal events under the per-account lock.
pub struct WithdrawalService {
    ledger: Arc<dyn LedgerRepositoryTrait>,
    locks: Arc<AccountLockManager>,
    cache: Arc<BalanceCacheService>,
    clock: Arc<dyn Clock>,
}

impl WithdrawalService {
    pub fn new(
        ledger: Arc<dyn LedgerRepositoryTrait>,
        locks: Arc<AccountLockManager>,
        cache: Arc<BalanceCacheService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ledger,
            locks,
            cache,
            clock,
        }
    }

    /// Pays out part or all of an account's active profit.
    pub async fn withdraw_profit(
        &self,
        account_id: &str,
        withdrawal: Decimal,
        effective_date: Option<NaiveDate>,
    ) -> Result<AuditSnapshot> {
        if withdrawal <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(withdrawal).into());
        }

        let date = effective_date.unwrap_or_else(|| self.clock.today());

        // Held through the commit; dropped on every exit path below.
        let _lock = self.locks.acquire(account_id).await?;

        // Step 1: one balance snapshot for the whole transaction.
        let events = self.ledger.events_through(account_id, None)?;
        let today = self.clock.today();
        let ob = old_balance(&events, today);
        let cb = current_balance(&events, today).unwrap_or(ob);

        // Step 2
        let profit_current = (cb - ob).max(Decimal::ZERO);
        debug!(
            "Withdrawal snapshot for {}: old={}, current={}, profit={}",
            account_id, ob, cb, profit_current
        );

        // Step 3
        if is_zero_money(profit_current) {
            return Err(WithdrawalError::NoActiveProfit.into());
        }

        // Step 4
        if withdrawal > profit_current + EPSILON {
            return Err(WithdrawalError::ExceedsProfit {
                withdrawal,
                profit: profit_current,
            }
            .into());
        }

        // Step 5
        let cb_new = cb - withdrawal;
        if cb_new < Decimal::ZERO {
            return Err(WithdrawalError::NegativeBalance { balance: cb_new }.into());
        }

        // Step 6: the withdrawal is realized as a balance adjustment; the
        // event carries the reduced current balance.
        let event = NewLedgerEvent {
            account_id: account_id.to_string(),
            kind: crate::ledger::EventKind::Withdrawal,
            amount: cb_new,
            effective_date: date,
            total_share_pct: None,
            capital_closed: Some(withdrawal),
            idempotency_key: None,
        };
        let audit = NewAuditSnapshot {
            account_id: account_id.to_string(),
            old_balance: ob,
            current_balance: cb_new,
            loss: Decimal::ZERO,
            profit: profit_current - withdrawal,
        };
        let appended = self.ledger.append(event, Some(audit)).await?;

        // The commit is durable at this point; a failed refresh leaves a
        // stale cache entry that the next read recomputes.
        if let Err(e) = self.cache.refresh(account_id) {
            warn!(
                "Balance cache refresh failed for account {} after withdrawal commit: {}",
                account_id, e
            );
        }
        debug!(
            "Withdrew {} from account {}: current balance {} -> {}",
            withdrawal, account_id, cb, cb_new
        );

        appended.audit.ok_or_else(|| {
            Error::Unexpected("Ledger append did not return the paired audit snapshot".to_string())
        })
    }
}
