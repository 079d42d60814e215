use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accounts::AccountRepositoryTrait;
use crate::balances::balance_calculator::{pending_amount, summarize};
use crate::balances::BalanceSummary;
use crate::cache::BalanceCacheService;
use crate::errors::Result;
use crate::ledger::LedgerRepositoryTrait;
use crate::utils::Clock;

/// Read-side service for derived balances.
///
/// Historical queries recompute from the ledger and never touch the cache or
/// any lock; the log is immutable once appended, so a lock-free read either
/// sees an event or does not, with no partial states. "Now" queries go
/// through the cache projection's freshness check.
pub struct BalanceService {
    accounts: Arc<dyn AccountRepositoryTrait>,
    ledger: Arc<dyn LedgerRepositoryTrait>,
    cache: Arc<BalanceCacheService>,
    clock: Arc<dyn Clock>,
}

impl BalanceService {
    pub fn new(
        accounts: Arc<dyn AccountRepositoryTrait>,
        ledger: Arc<dyn LedgerRepositoryTrait>,
        cache: Arc<BalanceCacheService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            ledger,
            cache,
            clock,
        }
    }

    /// Derived balances for one account, as of a historical date or now.
    pub fn get_balances(
        &self,
        account_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<BalanceSummary> {
        let account = self.accounts.get_by_id(account_id)?;

        match as_of {
            Some(date) => {
                let events = self.ledger.events_through(account_id, Some(date))?;
                Ok(summarize(&events, &account, date))
            }
            None => {
                let entry = self.cache.get_fresh(account_id)?;
                let loss = (entry.old_balance - entry.current_balance).max(Decimal::ZERO);
                let profit = (entry.current_balance - entry.old_balance).max(Decimal::ZERO);
                Ok(BalanceSummary {
                    account_id: account.id.clone(),
                    old_balance: entry.old_balance,
                    current_balance: entry.current_balance,
                    loss,
                    profit,
                    pending: pending_amount(loss, account.effective_total_share_pct()),
                    as_of: self.clock.today(),
                })
            }
        }
    }
}
