use crate::cache::BalanceCacheEntry;
use crate::errors::Result;

/// Persistence contract for the balance cache projection.
pub trait CacheRepositoryTrait: Send + Sync {
    fn get(&self, account_id: &str) -> Result<Option<BalanceCacheEntry>>;

    fn upsert(&self, entry: &BalanceCacheEntry) -> Result<()>;

    fn delete(&self, account_id: &str) -> Result<()>;
}
