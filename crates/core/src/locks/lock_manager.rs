//! Per-account exclusive locks for the mutation engines.
//!
//! One lock per account id, held from the balance snapshot through the
//! commit. Different accounts never contend. Acquisition waits a bounded
//! time; timing out surfaces as the only retry-safe error kind in the
//! taxonomy, distinct from every validation rejection.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::constants::DEFAULT_LOCK_TIMEOUT_MS;

/// Lock acquisition errors.
#[derive(Error, Debug)]
pub enum LockError {
    /// Transient: the caller may retry the same request unchanged.
    #[error("Timed out acquiring lock for account {account_id} after {waited_ms}ms")]
    Timeout { account_id: String, waited_ms: u64 },
}

/// Guard representing exclusive mutation rights on one account.
///
/// Dropping it releases the lock; engines hold it across every exit path
/// (commit, guard rejection, storage error) by plain scope.
#[derive(Debug)]
pub struct AccountLockGuard {
    _guard: OwnedMutexGuard<()>,
}

/// Grants one exclusive mutation lock per account id at a time.
pub struct AccountLockManager {
    locks: DashMap<String, Arc<Mutex<()>>>,
    timeout: Duration,
}

impl AccountLockManager {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(DEFAULT_LOCK_TIMEOUT_MS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    /// Acquires the account's exclusive lock, waiting at most the configured
    /// timeout.
    pub async fn acquire(&self, account_id: &str) -> Result<AccountLockGuard, LockError> {
        let mutex = self
            .locks
            .entry(account_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        match tokio::time::timeout(self.timeout, mutex.lock_owned()).await {
            Ok(guard) => Ok(AccountLockGuard { _guard: guard }),
            Err(_) => Err(LockError::Timeout {
                account_id: account_id.to_string(),
                waited_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

impl Default for AccountLockManager {
    fn default() -> Self {
        Self::new()
    }
}
