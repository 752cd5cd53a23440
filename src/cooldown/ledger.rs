//! Cooldown window enforcement over a `CooldownStore`.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::cooldown::store::CooldownStore;
use crate::observability::metrics;

const SECS_PER_HOUR: u64 = 3600;

/// Result of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// No claim inside the window.
    Ready,
    /// A claim was recorded less than one window ago.
    Active { remaining: Duration },
}

impl CooldownStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, CooldownStatus::Active { .. })
    }

    pub fn remaining(&self) -> Duration {
        match self {
            CooldownStatus::Ready => Duration::ZERO,
            CooldownStatus::Active { remaining } => *remaining,
        }
    }

    /// Remaining time rounded up to whole hours, for display.
    pub fn remaining_hours(&self) -> u64 {
        let remaining = self.remaining();
        let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
        secs.div_ceil(SECS_PER_HOUR)
    }
}

/// One cooldown ledger: a fixed window over a keyed timestamp store.
pub struct CooldownLedger<K> {
    name: &'static str,
    window: Duration,
    store: Arc<dyn CooldownStore<K>>,
}

impl<K> CooldownLedger<K> {
    /// `name` labels the ledger in logs and metrics.
    pub fn new(name: &'static str, window: Duration, store: Arc<dyn CooldownStore<K>>) -> Self {
        Self {
            name,
            window,
            store,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Check whether `key` is still inside its window at `now`.
    ///
    /// A timestamp later than `now` counts as zero elapsed.
    pub fn check(&self, key: &K, now: SystemTime) -> CooldownStatus {
        let Some(last) = self.store.get(key) else {
            return CooldownStatus::Ready;
        };

        let elapsed = now.duration_since(last).unwrap_or(Duration::ZERO);
        if elapsed < self.window {
            CooldownStatus::Active {
                remaining: self.window - elapsed,
            }
        } else {
            CooldownStatus::Ready
        }
    }

    /// Tuple form of [`check`](Self::check).
    pub fn is_on_cooldown(&self, key: &K, now: SystemTime) -> (bool, Duration) {
        let status = self.check(key, now);
        (status.is_active(), status.remaining())
    }

    /// Start a new window for `key` at `at`.
    pub fn record(&self, key: K, at: SystemTime) {
        self.store.put(key, at);
        metrics::record_cooldown_entries(self.name, self.store.len());
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
