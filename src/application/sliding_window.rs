//! Sliding-window admission control.
//!
//! Admits up to `max_requests` sends per identity within a trailing time
//! window, tracked as an ordered timestamp log per identity.

use crate::application::admission::AdmissionControl;
use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, IdentityKey, Storage};
use crate::domain::config::{ConfigError, SlidingWindowConfig};
use crate::domain::window::AttemptLog;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::storage::ShardedStorage;

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// Sliding-window limiter: at most `max_requests` per identity within a
/// trailing window.
///
/// Each identity's admitted sends are kept as a timestamp log. Every
/// operation prunes entries that have aged out of the window before
/// deciding, and an identity whose log empties has its map entry removed,
/// so memory stays bounded to currently-active identities - including for
/// identities that only ever query without sending.
///
/// # Boundary convention
///
/// The window is the half-open interval `(now − window_size, now]`: an
/// entry exactly `window_size` old has expired and frees its slot.
///
/// # Concurrency
///
/// The admission check and the recording in [`record`] run inside a single
/// per-identity entry lock, so concurrent `record` calls for the same
/// identity cannot both admit past capacity. Reads take the same lock
/// because pruning mutates the log.
///
/// # Example
///
/// ```
/// use floodgate::{AdmissionControl, SlidingWindowConfig, SlidingWindowLimiter};
/// use std::time::Duration;
///
/// let limiter: SlidingWindowLimiter<String> =
///     SlidingWindowLimiter::new(SlidingWindowConfig::new(Duration::from_secs(10), 3)).unwrap();
///
/// let user = "user_42".to_string();
/// assert!(limiter.record(&user));
/// assert!(limiter.record(&user));
/// assert!(limiter.record(&user));
///
/// // Capacity reached: rejected, with a positive wait.
/// assert!(!limiter.record(&user));
/// assert!(limiter.time_until_next_allowed(&user) > Duration::ZERO);
/// ```
///
/// [`record`]: AdmissionControl::record
pub struct SlidingWindowLimiter<K, S = ShardedStorage<K, AttemptLog>>
where
    K: IdentityKey,
    S: Storage<K, AttemptLog>,
{
    window_size: Duration,
    max_requests: usize,
    storage: S,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
    _key: PhantomData<fn(K) -> K>,
}

impl<K> SlidingWindowLimiter<K>
where
    K: IdentityKey,
{
    /// Create a limiter reading time from the system clock.
    ///
    /// Fails fast on a zero window or zero capacity.
    pub fn new(config: SlidingWindowConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create a limiter with an injected clock (mainly for testing).
    pub fn with_clock(
        config: SlidingWindowConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        Self::with_storage(config, ShardedStorage::new(), clock)
    }
}

impl<K, S> SlidingWindowLimiter<K, S>
where
    K: IdentityKey,
    S: Storage<K, AttemptLog>,
{
    /// Create a limiter over a custom storage backend.
    pub fn with_storage(
        config: SlidingWindowConfig,
        storage: S,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            window_size: config.window_size,
            max_requests: config.max_requests,
            storage,
            clock,
            metrics: Metrics::new(),
            _key: PhantomData,
        })
    }

    /// The configured window length.
    pub fn window_size(&self) -> Duration {
        self.window_size
    }

    /// The configured per-window capacity.
    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Number of identities currently holding state.
    ///
    /// Only identities with at least one send still inside the window are
    /// counted; emptied logs are removed as they are encountered.
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

    /// Remove the identity's entry when pruning left it empty.
    fn drop_if_drained(&self, id: &K) {
        self.storage.remove_if(id, |_, log| log.is_empty());
    }
}

impl<K, S> AdmissionControl<K> for SlidingWindowLimiter<K, S>
where
    K: IdentityKey,
    S: Storage<K, AttemptLog>,
{
    fn can_send(&self, id: &K) -> bool {
        let now = self.clock.now();
        let allowed = self
            .storage
            .with_existing_mut(id, |log| {
                log.prune(now, self.window_size);
                log.has_capacity(self.max_requests)
            })
            .unwrap_or(true);
        self.drop_if_drained(id);
        allowed
    }

    fn record(&self, id: &K) -> bool {
        let now = self.clock.now();
        let admitted = self
            .storage
            .with_entry_mut(id.clone(), AttemptLog::new, |log| {
                log.prune(now, self.window_size);
                if log.has_capacity(self.max_requests) {
                    log.push(now);
                    true
                } else {
                    false
                }
            });
        if admitted {
            self.metrics.record_allowed();
        } else {
            self.metrics.record_rejected();
            tracing::debug!(identity = ?id, "send rejected: window capacity reached");
        }
        admitted
    }

    fn time_until_next_allowed(&self, id: &K) -> Duration {
        let now = self.clock.now();
        let wait = self
            .storage
            .with_existing_mut(id, |log| {
                log.prune(now, self.window_size);
                log.wait_until_slot(now, self.window_size, self.max_requests)
            })
            .unwrap_or(Duration::ZERO);
        self.drop_if_drained(id);
        wait
    }
}
