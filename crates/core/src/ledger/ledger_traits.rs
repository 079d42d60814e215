//! Ledger repository trait.
//!
//! The core consumes this contract; the storage crate implements it. Append
//! is the only write in the whole engine and must persist the event together
//! with its paired audit snapshot atomically.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::audit::NewAuditSnapshot;
use crate::errors::Result;
use crate::ledger::{AppendedEvent, LedgerEvent, NewLedgerEvent};

#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Appends one event and, when present, its paired audit snapshot in a
    /// single atomic transaction. Assigns the event id and the per-account
    /// monotonic sequence. Either both rows persist or neither does.
    async fn append(
        &self,
        event: NewLedgerEvent,
        audit: Option<NewAuditSnapshot>,
    ) -> Result<AppendedEvent>;

    /// Returns the account's events with effective date up to and including
    /// `through_date` (all events when `None`), in derivation order:
    /// (effective_date, kind priority, sequence).
    fn events_through(
        &self,
        account_id: &str,
        through_date: Option<NaiveDate>,
    ) -> Result<Vec<LedgerEvent>>;

    /// Looks up a committed event by idempotency key within one account.
    fn find_by_idempotency_key(
        &self,
        account_id: &str,
        idempotency_key: &str,
    ) -> Result<Option<LedgerEvent>>;
}
