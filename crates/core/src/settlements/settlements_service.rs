//! Loss-settlement state machine.
//!
//! A settlement is the "client pays" path: the client pays down a share of an
//! outstanding loss, and the committed event re-anchors the account's capital
//! base. The guard sequence runs strictly in order under the account's
//! exclusive lock; the first failure aborts with no mutation, and the append
//! of the settlement event with its audit snapshot is the only write.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, error, warn};
use rust_decimal::Decimal;

use crate::accounts::AccountRepositoryTrait;
use crate::audit::{AuditSnapshot, NewAuditSnapshot};
use crate::balances::balance_calculator::{current_balance, old_balance, pending_amount};
use crate::cache::BalanceCacheService;
use crate::constants::EPSILON;
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::{EventKind, LedgerRepositoryTrait, NewLedgerEvent};
use crate::locks::AccountLockManager;
use crate::settlements::{compute_settlement_key, SettlementError};
use crate::utils::{exceeds, is_zero_money, Clock};

/// Validates and commits loss-settlement events under the per-account lock.
pub struct SettlementService {
    accounts: Arc<dyn AccountRepositoryTrait>,
    ledger: Arc<dyn LedgerRepositoryTrait>,
    locks: Arc<AccountLockManager>,
    cache: Arc<BalanceCacheService>,
    clock: Arc<dyn Clock>,
}

impl SettlementService {
    pub fn new(
        accounts: Arc<dyn AccountRepositoryTrait>,
        ledger: Arc<dyn LedgerRepositoryTrait>,
        locks: Arc<AccountLockManager>,
        cache: Arc<BalanceCacheService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            ledger,
            locks,
            cache,
            clock,
        }
    }

    /// Settles part or all of an account's outstanding loss.
    ///
    /// `effective_date` defaults to today. `nonce` is the caller-supplied
    /// retry token folded into the idempotency key; resubmitting the same
    /// request with the same nonce is rejected as a duplicate instead of
    /// committing twice.
    pub async fn settle(
        &self,
        account_id: &str,
        payment: Decimal,
        effective_date: Option<NaiveDate>,
        nonce: &str,
    ) -> Result<AuditSnapshot> {
        if payment <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(payment).into());
        }

        let account = self.accounts.get_by_id(account_id)?;
        let date = effective_date.unwrap_or_else(|| self.clock.today());

        // Held through the commit; dropped on every exit path below.
        let _lock = self.locks.acquire(account_id).await?;

        // Step 1: one balance snapshot for the whole transaction. Never
        // re-read mid-transaction.
        let events = self.ledger.events_through(account_id, None)?;
        let today = self.clock.today();
        let ob = old_balance(&events, today);
        let cb = current_balance(&events, today).unwrap_or(ob);

        // Step 2
        let loss_current = (ob - cb).max(Decimal::ZERO);
        let profit_current = (cb - ob).max(Decimal::ZERO);
        debug!(
            "Settlement snapshot for {}: old={}, current={}, loss={}, profit={}",
            account_id, ob, cb, loss_current, profit_current
        );

        // Step 3: nothing outstanding at all.
        if is_zero_money(loss_current) && profit_current <= Decimal::ZERO {
            return Err(SettlementError::NoActiveLoss.into());
        }

        // Step 4: distinct from the withdrawal path; a loss settlement must
        // never run while the account shows a profit, regardless of amount.
        if profit_current > Decimal::ZERO {
            return Err(SettlementError::ProfitExists {
                profit: profit_current,
            }
            .into());
        }

        // Step 5: share basis frozen for this transaction.
        let total_pct = account.effective_total_share_pct();
        if total_pct <= Decimal::ZERO {
            return Err(SettlementError::InvalidSharePercent {
                total_share_pct: total_pct,
            }
            .into());
        }

        // Step 6
        let capital_closed = payment * Decimal::ONE_HUNDRED / total_pct;
        if exceeds(capital_closed, loss_current) {
            return Err(SettlementError::ExceedsLoss {
                capital_closed,
                loss: loss_current,
            }
            .into());
        }

        // Step 7: rounding drift within epsilon collapses to zero; anything
        // further negative is rejected.
        let loss_new = loss_current - capital_closed;
        if loss_new < -EPSILON {
            return Err(SettlementError::NegativeLoss { loss_new }.into());
        }
        let loss_new = if is_zero_money(loss_new) {
            Decimal::ZERO
        } else {
            loss_new
        };

        // Step 8
        let old_balance_new = if loss_new.is_zero() { cb } else { cb + loss_new };

        // Step 9: last-line defense. A failure here is a programming defect,
        // aborts the transaction, and is never clamped.
        if let Err(violation) = check_postconditions(old_balance_new, cb, loss_new) {
            error!(
                "Settlement invariant violated for account {}: {} (payment={}, capital_closed={})",
                account_id, violation, payment, capital_closed
            );
            return Err(SettlementError::InvariantViolation(violation).into());
        }

        // Step 10
        let idempotency_key = compute_settlement_key(account_id, date, payment, nonce);
        if self
            .ledger
            .find_by_idempotency_key(account_id, &idempotency_key)?
            .is_some()
        {
            return Err(SettlementError::DuplicateSettlement { idempotency_key }.into());
        }

        // Step 11: the client cannot pay more than is currently owed.
        let pending = pending_amount(loss_current, total_pct);
        if exceeds(payment, pending) {
            return Err(SettlementError::OverPayment { payment, pending }.into());
        }

        // Step 12: the single atomic write.
        let event = NewLedgerEvent {
            account_id: account_id.to_string(),
            kind: EventKind::Settlement,
            amount: payment,
            effective_date: date,
            total_share_pct: Some(total_pct),
            capital_closed: Some(capital_closed),
            idempotency_key: Some(idempotency_key),
        };
        let audit = NewAuditSnapshot {
            account_id: account_id.to_string(),
            old_balance: old_balance_new,
            current_balance: cb,
            loss: loss_new,
            profit: Decimal::ZERO,
        };
        let appended = self.ledger.append(event, Some(audit)).await?;

        // The commit is durable at this point; a failed refresh leaves a
        // stale cache entry that the next read recomputes.
        if let Err(e) = self.cache.refresh(account_id) {
            warn!(
                "Balance cache refresh failed for account {} after settlement commit: {}",
                account_id, e
            );
        }
        debug!(
            "Settled {} on account {}: capital_closed={}, loss {} -> {}",
            payment, account_id, capital_closed, loss_current, loss_new
        );

        appended.audit.ok_or_else(|| {
            Error::Unexpected("Ledger append did not return the paired audit snapshot".to_string())
        })
    }
}

/// Post-condition checks tying the new base to the snapshot it was computed
/// from.
fn check_postconditions(
    old_balance_new: Decimal,
    cb: Decimal,
    loss_new: Decimal,
) -> std::result::Result<(), String> {
    if old_balance_new < cb {
        return Err(format!(
            "new old balance {} fell below current balance {}",
            old_balance_new, cb
        ));
    }
    if (loss_new - (old_balance_new - cb)).abs() > EPSILON {
        return Err(format!(
            "residual loss {} does not match balance gap {}",
            loss_new,
            old_balance_new - cb
        ));
    }
    if old_balance_new < Decimal::ZERO {
        return Err(format!("new old balance {} is negative", old_balance_new));
    }
    Ok(())
}
