//! Observability metrics for admission control.
//!
//! Provides counters describing limiter behavior for monitoring and
//! debugging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking admission statistics for one limiter instance.
///
/// All counters use atomic operations, so updates and reads are safe from
/// any thread. Cloning the handle is cheap; clones share the same
/// underlying counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Total send attempts admitted
    attempts_allowed: AtomicU64,
    /// Total send attempts rejected
    attempts_rejected: AtomicU64,
    /// Total identity entries removed by eviction sweeps
    identities_evicted: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                attempts_allowed: AtomicU64::new(0),
                attempts_rejected: AtomicU64::new(0),
                identities_evicted: AtomicU64::new(0),
            }),
        }
    }

    /// Record an admitted send attempt.
    pub(crate) fn record_allowed(&self) {
        self.inner.attempts_allowed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected send attempt.
    pub(crate) fn record_rejected(&self) {
        self.inner.attempts_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record `count` identities removed by an eviction sweep.
    pub(crate) fn record_evicted(&self, count: u64) {
        self.inner
            .identities_evicted
            .fetch_add(count, Ordering::Relaxed);
    }

    /// Total send attempts admitted so far.
    pub fn attempts_allowed(&self) -> u64 {
        self.inner.attempts_allowed.load(Ordering::Relaxed)
    }

    /// Total send attempts rejected so far.
    pub fn attempts_rejected(&self) -> u64 {
        self.inner.attempts_rejected.load(Ordering::Relaxed)
    }

    /// Total identity entries removed by eviction sweeps so far.
    pub fn identities_evicted(&self) -> u64 {
        self.inner.identities_evicted.load(Ordering::Relaxed)
    }

    /// Get a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            attempts_allowed: self.attempts_allowed(),
            attempts_rejected: self.attempts_rejected(),
            identities_evicted: self.identities_evicted(),
        }
    }

    /// Reset all counters to zero.
    ///
    /// Useful for tests or when starting a new monitoring period.
    pub fn reset(&self) {
        self.inner.attempts_allowed.store(0, Ordering::Relaxed);
        self.inner.attempts_rejected.store(0, Ordering::Relaxed);
        self.inner.identities_evicted.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of limiter metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total send attempts admitted
    pub attempts_allowed: u64,
    /// Total send attempts rejected
    pub attempts_rejected: u64,
    /// Total identity entries removed by eviction sweeps
    pub identities_evicted: u64,
}

impl MetricsSnapshot {
    /// Total send attempts seen (admitted + rejected).
    pub fn total_attempts(&self) -> u64 {
        self.attempts_allowed.saturating_add(self.attempts_rejected)
    }

    /// Ratio of rejected attempts to total attempts (0.0 to 1.0).
    ///
    /// Returns 0.0 when no attempts have been recorded.
    pub fn rejection_rate(&self) -> f64 {
        let total = self.total_attempts();
        if total == 0 {
            0.0
        } else {
            self.attempts_rejected as f64 / total as f64
        }
    }
}
