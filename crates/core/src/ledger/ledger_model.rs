use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ledger::LedgerError;

/// Kind of a ledger event.
///
/// The derivation order for same-date events is fixed by `priority()`:
/// funding applies before any settlement dated the same day, so a deposit
/// made on the settlement date is part of the loss episode that settlement
/// closes, never part of the new capital base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Funding,
    BalanceRecord,
    Settlement,
    Withdrawal,
}

impl EventKind {
    /// Rank of this kind among events sharing an effective date.
    pub fn priority(&self) -> u8 {
        match self {
            EventKind::Funding => 0,
            EventKind::BalanceRecord => 1,
            EventKind::Settlement => 2,
            EventKind::Withdrawal => 3,
        }
    }

    /// True for kinds whose `amount` is the account's mark-to-market balance
    /// as of the event date. A withdrawal is realized as a balance
    /// adjustment: its amount is the reduced current balance, not the payout.
    pub fn carries_balance(&self) -> bool {
        matches!(self, EventKind::BalanceRecord | EventKind::Withdrawal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Funding => "FUNDING",
            EventKind::BalanceRecord => "BALANCE_RECORD",
            EventKind::Settlement => "SETTLEMENT",
            EventKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl FromStr for EventKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FUNDING" => Ok(EventKind::Funding),
            "BALANCE_RECORD" => Ok(EventKind::BalanceRecord),
            "SETTLEMENT" => Ok(EventKind::Settlement),
            "WITHDRAWAL" => Ok(EventKind::Withdrawal),
            other => Err(LedgerError::UnknownKind(other.to_string())),
        }
    }
}

/// One immutable entry in an account's event log.
///
/// Events are never mutated or deleted once committed; corrections are
/// modeled as new events. `sequence` is assigned per account at append time
/// and strictly increases, making the derivation order total even when
/// effective dates and kinds collide.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEvent {
    pub id: String,
    pub account_id: String,
    pub kind: EventKind,
    /// Funding amount, reported balance, settlement payment, or withdrawal
    /// adjustment depending on `kind`.
    pub amount: Decimal,
    pub effective_date: NaiveDate,
    /// Per-account monotonic tie-breaker, assigned by the store.
    pub sequence: i64,
    /// Share percentage frozen for this transaction (settlements only).
    pub total_share_pct: Option<Decimal>,
    /// Amount of loss this settlement closed (settlements only).
    pub capital_closed: Option<Decimal>,
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LedgerEvent {
    /// Total derivation order: effective date, then kind priority, then the
    /// per-account sequence. Wall-clock insertion time is deliberately not
    /// part of the key.
    pub fn sort_key(&self) -> (NaiveDate, u8, i64) {
        (self.effective_date, self.kind.priority(), self.sequence)
    }
}

/// Result of an atomic append: the persisted event and, for mutations, the
/// audit row committed with it.
#[derive(Debug, Clone)]
pub struct AppendedEvent {
    pub event: LedgerEvent,
    pub audit: Option<crate::audit::AuditSnapshot>,
}

/// Input model for appending a ledger event. The store assigns the id, the
/// per-account sequence, and the creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEvent {
    pub account_id: String,
    pub kind: EventKind,
    pub amount: Decimal,
    pub effective_date: NaiveDate,
    pub total_share_pct: Option<Decimal>,
    pub capital_closed: Option<Decimal>,
    pub idempotency_key: Option<String>,
}

impl NewLedgerEvent {
    /// Plain funding deposit.
    pub fn funding(account_id: &str, amount: Decimal, effective_date: NaiveDate) -> Self {
        Self {
            account_id: account_id.to_string(),
            kind: EventKind::Funding,
            amount,
            effective_date,
            total_share_pct: None,
            capital_closed: None,
            idempotency_key: None,
        }
    }

    /// Mark-to-market balance report.
    pub fn balance_record(account_id: &str, balance: Decimal, effective_date: NaiveDate) -> Self {
        Self {
            account_id: account_id.to_string(),
            kind: EventKind::BalanceRecord,
            amount: balance,
            effective_date,
            total_share_pct: None,
            capital_closed: None,
            idempotency_key: None,
        }
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.account_id.trim().is_empty() {
            return Err(LedgerError::InvalidEvent(
                "Account ID cannot be empty".to_string(),
            ));
        }
        match self.kind {
            EventKind::Settlement => {
                if self.total_share_pct.is_none() || self.capital_closed.is_none() {
                    return Err(LedgerError::InvalidEvent(
                        "Settlement events must carry total_share_pct and capital_closed"
                            .to_string(),
                    ));
                }
                if self.idempotency_key.is_none() {
                    return Err(LedgerError::InvalidEvent(
                        "Settlement events must carry an idempotency key".to_string(),
                    ));
                }
            }
            EventKind::Funding => {
                if self.amount <= Decimal::ZERO {
                    return Err(LedgerError::InvalidEvent(
                        "Funding amount must be positive".to_string(),
                    ));
                }
            }
            EventKind::BalanceRecord | EventKind::Withdrawal => {}
        }
        Ok(())
    }
}
