//! Fixed-interval throttling.
//!
//! Admits at most one send per identity per minimum interval, tracked as a
//! single last-admitted timestamp per identity.

use crate::application::admission::AdmissionControl;
use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, IdentityKey, Storage};
use crate::domain::config::{ConfigError, FixedIntervalConfig};
use crate::domain::interval::LastSend;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::storage::ShardedStorage;

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// Fixed-interval limiter: a minimum gap between consecutive admitted
/// sends per identity.
///
/// State is one timestamp per identity; an identity never seen is always
/// admissible. Boundary equality admits - a send exactly `min_interval`
/// after the previous one goes through, matching the sliding window's
/// half-open convention.
///
/// # Memory
///
/// Entries are never removed implicitly: a single timestamp per distinct
/// identity is cheap, and nothing needs pruning for correctness. For
/// high-cardinality identity spaces with little repeat traffic, call
/// [`evict_idle`] periodically to drop long-idle entries.
///
/// # Example
///
/// ```
/// use floodgate::{AdmissionControl, FixedIntervalConfig, FixedIntervalLimiter};
/// use std::time::Duration;
///
/// let limiter: FixedIntervalLimiter<String> =
///     FixedIntervalLimiter::new(FixedIntervalConfig::new(Duration::from_secs(10))).unwrap();
///
/// let user = "user_42".to_string();
/// assert!(limiter.record(&user));
/// assert!(!limiter.record(&user));
/// assert!(limiter.time_until_next_allowed(&user) > Duration::ZERO);
/// ```
///
/// [`evict_idle`]: FixedIntervalLimiter::evict_idle
pub struct FixedIntervalLimiter<K, S = ShardedStorage<K, LastSend>>
where
    K: IdentityKey,
    S: Storage<K, LastSend>,
{
    min_interval: Duration,
    storage: S,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
    _key: PhantomData<fn(K) -> K>,
}

impl<K> FixedIntervalLimiter<K>
where
    K: IdentityKey,
{
    /// Create a limiter reading time from the system clock.
    ///
    /// Fails fast on a zero interval.
    pub fn new(config: FixedIntervalConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create a limiter with an injected clock (mainly for testing).
    pub fn with_clock(
        config: FixedIntervalConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        Self::with_storage(config, ShardedStorage::new(), clock)
    }
}

impl<K, S> FixedIntervalLimiter<K, S>
where
    K: IdentityKey,
    S: Storage<K, LastSend>,
{
    /// Create a limiter over a custom storage backend.
    pub fn with_storage(
        config: FixedIntervalConfig,
        storage: S,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            min_interval: config.min_interval,
            storage,
            clock,
            metrics: Metrics::new(),
            _key: PhantomData,
        })
    }

    /// The configured minimum gap between admitted sends.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Number of identities currently holding state.
    pub fn tracked_identities(&self) -> usize {
        self.storage.len()
    }

    /// Metrics handle for this limiter.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Drop all per-identity state.
    pub fn clear(&self) {
        self.storage.clear();
    }

    /// Remove identities whose last admitted send is at least `idle_for`
    /// old, returning how many entries were dropped.
    ///
    /// `idle_for` shorter than `min_interval` is raised to `min_interval`:
    /// any entry that old is already admissible again, so the sweep can
    /// never re-admit an identity that would otherwise still be throttled.
    /// Typical usage passes a generous multiple of the interval and runs
    /// the sweep on a maintenance schedule.
    pub fn evict_idle(&self, idle_for: Duration) -> usize {
        let idle_for = idle_for.max(self.min_interval);
        let now = self.clock.now();
        let before = self.storage.len();
        self.storage.retain(|_, last| match last.sent_at() {
            None => false,
            Some(at) => now.saturating_duration_since(at) < idle_for,
        });
        let evicted = before.saturating_sub(self.storage.len());
        if evicted > 0 {
            self.metrics.record_evicted(evicted as u64);
            tracing::debug!(evicted, "dropped idle identities");
        }
        evicted
    }
}

impl<K, S> AdmissionControl<K> for FixedIntervalLimiter<K, S>
where
    K: IdentityKey,
    S: Storage<K, LastSend>,
{
    fn can_send(&self, id: &K) -> bool {
        let now = self.clock.now();
        self.storage
            .with_existing_mut(id, |last| last.is_open(now, self.min_interval))
            .unwrap_or(true)
    }

    fn record(&self, id: &K) -> bool {
        let now = self.clock.now();
        let admitted = self
            .storage
            .with_entry_mut(id.clone(), LastSend::idle, |last| {
                last.try_mark(now, self.min_interval)
            });
        if admitted {
            self.metrics.record_allowed();
        } else {
            self.metrics.record_rejected();
            tracing::debug!(identity = ?id, "send rejected: interval not elapsed");
        }
        admitted
    }

    fn time_until_next_allowed(&self, id: &K) -> Duration {
        let now = self.clock.now();
        self.storage
            .with_existing_mut(id, |last| last.remaining(now, self.min_interval))
            .unwrap_or(Duration::ZERO)
    }
}
