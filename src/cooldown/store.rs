//! Backing storage for cooldown timestamps.

use std::hash::Hash;
use std::time::SystemTime;

use dashmap::DashMap;

/// Last-claim timestamps by subject key.
///
/// The ledger only needs point reads and overwrites, so a persistent or
/// expiring store can replace the in-memory one without touching callers.
pub trait CooldownStore<K>: Send + Sync {
    /// Last recorded claim time for `key`.
    fn get(&self, key: &K) -> Option<SystemTime>;

    /// Record (or overwrite) the claim time for `key`.
    fn put(&self, key: K, at: SystemTime);

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded in-memory store. Entries live until the process exits.
#[derive(Debug)]
pub struct MemoryCooldownStore<K: Eq + Hash> {
    inner: DashMap<K, SystemTime>,
}

impl<K: Eq + Hash> MemoryCooldownStore<K> {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Default for MemoryCooldownStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> CooldownStore<K> for MemoryCooldownStore<K>
where
    K: Eq + Hash + Send + Sync,
{
    fn get(&self, key: &K) -> Option<SystemTime> {
        self.inner.get(key).map(|r| *r.value())
    }

    fn put(&self, key: K, at: SystemTime) {
        self.inner.insert(key, at);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_put_overwrites() {
        let store: MemoryCooldownStore<u64> = MemoryCooldownStore::new();
        let t1 = UNIX_EPOCH + Duration::from_secs(100);
        let t2 = UNIX_EPOCH + Duration::from_secs(200);

        assert!(store.get(&7u64).is_none());
        assert!(store.is_empty());

        store.put(7u64, t1);
        store.put(7u64, t2);
        assert_eq!(store.get(&7u64), Some(t2));
        assert_eq!(store.len(), 1);
    }
}
