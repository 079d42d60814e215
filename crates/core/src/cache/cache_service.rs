use std::sync::Arc;

use chrono::Duration;
use log::debug;

use crate::balances::balance_calculator::{current_balance, old_balance, total_funding};
use crate::cache::{BalanceCacheEntry, CacheRepositoryTrait};
use crate::constants::DEFAULT_CACHE_FRESHNESS_SECS;
use crate::errors::Result;
use crate::ledger::LedgerRepositoryTrait;
use crate::utils::Clock;

/// Push-refreshed projection of derived balances.
///
/// The commit path of both mutation engines calls `refresh` synchronously
/// after every committed event. Reads of "now" go through `get_fresh`, which
/// recomputes when the entry is older than the freshness window. Recomputing
/// is a pure read of the ledger and needs no account lock.
pub struct BalanceCacheService {
    cache: Arc<dyn CacheRepositoryTrait>,
    ledger: Arc<dyn LedgerRepositoryTrait>,
    clock: Arc<dyn Clock>,
    freshness: Duration,
}

impl BalanceCacheService {
    pub fn new(
        cache: Arc<dyn CacheRepositoryTrait>,
        ledger: Arc<dyn LedgerRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_freshness(
            cache,
            ledger,
            clock,
            Duration::seconds(DEFAULT_CACHE_FRESHNESS_SECS),
        )
    }

    pub fn with_freshness(
        cache: Arc<dyn CacheRepositoryTrait>,
        ledger: Arc<dyn LedgerRepositoryTrait>,
        clock: Arc<dyn Clock>,
        freshness: Duration,
    ) -> Self {
        Self {
            cache,
            ledger,
            clock,
            freshness,
        }
    }

    /// Recomputes the account's projection from the ledger and stores it.
    pub fn refresh(&self, account_id: &str) -> Result<BalanceCacheEntry> {
        let events = self.ledger.events_through(account_id, None)?;
        let today = self.clock.today();

        let ob = old_balance(&events, today);
        let cb = current_balance(&events, today).unwrap_or(ob);
        let entry = BalanceCacheEntry {
            account_id: account_id.to_string(),
            current_balance: cb,
            old_balance: ob,
            total_funding: total_funding(&events, today),
            refreshed_at: self.clock.now(),
        };

        self.cache.upsert(&entry)?;
        debug!(
            "Refreshed balance cache for account {}: current={}, old={}",
            account_id, entry.current_balance, entry.old_balance
        );
        Ok(entry)
    }

    /// Returns a fresh entry, recomputing synchronously when the stored one
    /// is missing or older than the freshness window.
    pub fn get_fresh(&self, account_id: &str) -> Result<BalanceCacheEntry> {
        match self.cache.get(account_id)? {
            Some(entry) if self.clock.now() - entry.refreshed_at < self.freshness => Ok(entry),
            _ => self.refresh(account_id),
        }
    }

    /// Drops the stored entry. Always safe: the next read recomputes.
    pub fn invalidate(&self, account_id: &str) -> Result<()> {
        self.cache.delete(account_id)
    }
}
