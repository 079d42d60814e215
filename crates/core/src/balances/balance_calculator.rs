//! Pure balance derivation over an account's event log.
//!
//! Deterministic and side-effect-free: given the same slice of events and the
//! same `as_of` date, every function returns the same value. Callers pass the
//! full event log (or any prefix covering `as_of`); slices are re-sorted into
//! derivation order internally, so persistence order never leaks in.
//!
//! The capital-base rule: a settlement is a capital reset. The old balance as
//! of any date anchors to the mark-to-market balance at the moment of the
//! most recent settlement, extended only by funding that arrived strictly
//! after it. Intervening balance movement before that settlement is already
//! folded into the anchor and must not be double-counted.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accounts::Account;
use crate::balances::BalanceSummary;
use crate::ledger::{EventKind, LedgerEvent};
use crate::utils::round_money;

/// Returns the account's events up to `as_of`, in derivation order.
fn ordered_through(events: &[LedgerEvent], as_of: NaiveDate) -> Vec<&LedgerEvent> {
    let mut slice: Vec<&LedgerEvent> = events
        .iter()
        .filter(|e| e.effective_date <= as_of)
        .collect();
    slice.sort_by_key(|e| e.sort_key());
    slice
}

/// Mark-to-market balance as of `as_of`: the amount carried by the latest
/// balance-carrying event (a `BalanceRecord`, or a `Withdrawal` holding the
/// adjusted balance) dated on or before it. `None` when no such event exists
/// yet; callers treat that as the zero-loss, zero-profit baseline.
pub fn current_balance(events: &[LedgerEvent], as_of: NaiveDate) -> Option<Decimal> {
    ordered_through(events, as_of)
        .into_iter()
        .filter(|e| e.kind.carries_balance())
        .next_back()
        .map(|e| e.amount)
}

/// Sum of funding deposited on or before `as_of`.
pub fn total_funding(events: &[LedgerEvent], as_of: NaiveDate) -> Decimal {
    events
        .iter()
        .filter(|e| e.kind == EventKind::Funding && e.effective_date <= as_of)
        .map(|e| e.amount)
        .sum()
}

/// Derived capital base as of `as_of`.
///
/// With S = the most recent settlement dated on or before `as_of`:
/// `current_balance(S.date) + Σ funding where S.date < date ≤ as_of`.
/// Without any settlement: `Σ funding where date ≤ as_of`.
///
/// Funding dated on S.date itself orders before S (kind priority) and so
/// belongs to the episode S closed; it is part of the anchor's history, never
/// re-added to the new base. Only the most recent settlement matters: earlier
/// ones are already folded into the balance at its date.
pub fn old_balance(events: &[LedgerEvent], as_of: NaiveDate) -> Decimal {
    let last_settlement = ordered_through(events, as_of)
        .into_iter()
        .filter(|e| e.kind == EventKind::Settlement)
        .next_back()
        .cloned();

    match last_settlement {
        Some(settlement) => {
            let anchor =
                current_balance(events, settlement.effective_date).unwrap_or(Decimal::ZERO);
            let funding_after: Decimal = events
                .iter()
                .filter(|e| {
                    e.kind == EventKind::Funding
                        && e.effective_date > settlement.effective_date
                        && e.effective_date <= as_of
                })
                .map(|e| e.amount)
                .sum();
            anchor + funding_after
        }
        None => total_funding(events, as_of),
    }
}

/// Non-negative gap by which the capital base exceeds the current balance.
pub fn loss(events: &[LedgerEvent], as_of: NaiveDate) -> Decimal {
    let ob = old_balance(events, as_of);
    let cb = current_balance(events, as_of).unwrap_or(ob);
    (ob - cb).max(Decimal::ZERO)
}

/// Non-negative gap by which the current balance exceeds the capital base.
pub fn profit(events: &[LedgerEvent], as_of: NaiveDate) -> Decimal {
    let ob = old_balance(events, as_of);
    let cb = current_balance(events, as_of).unwrap_or(ob);
    (cb - ob).max(Decimal::ZERO)
}

/// Share-adjusted amount owed for an outstanding loss, rounded at the money
/// comparison scale. Zero whenever the share basis is non-positive; the
/// settlement engine rejects such accounts before any division happens.
pub fn pending_amount(loss: Decimal, total_share_pct: Decimal) -> Decimal {
    if total_share_pct <= Decimal::ZERO || loss <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_money(loss * total_share_pct / Decimal::ONE_HUNDRED)
}

/// Full derived view for one account as of a date.
pub fn summarize(events: &[LedgerEvent], account: &Account, as_of: NaiveDate) -> BalanceSummary {
    let ob = old_balance(events, as_of);
    let cb = current_balance(events, as_of).unwrap_or(ob);
    let loss = (ob - cb).max(Decimal::ZERO);
    let profit = (cb - ob).max(Decimal::ZERO);
    let pending = pending_amount(loss, account.effective_total_share_pct());

    BalanceSummary {
        account_id: account.id.clone(),
        old_balance: ob,
        current_balance: cb,
        loss,
        profit,
        pending,
        as_of,
    }
}
