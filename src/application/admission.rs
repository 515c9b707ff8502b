//! The admission-control contract shared by all limiter implementations.

use std::time::Duration;

/// Per-identity admission control: query, record, and backoff reporting.
///
/// Both [`SlidingWindowLimiter`](crate::SlidingWindowLimiter) and
/// [`FixedIntervalLimiter`](crate::FixedIntervalLimiter) implement this
/// trait; callers pick an implementation for its semantics and otherwise
/// treat them interchangeably.
///
/// All three operations are total for any valid key: an identity never
/// seen before is ordinary input, not an error. Operations are synchronous,
/// never block indefinitely, and perform no I/O.
pub trait AdmissionControl<K> {
    /// Whether a send for `id` would be admitted right now.
    ///
    /// Read-only with respect to admission: calling this any number of
    /// times never changes the outcome of the next [`record`].
    ///
    /// [`record`]: AdmissionControl::record
    fn can_send(&self, id: &K) -> bool;

    /// Admit and record a send for `id` if the limit allows it.
    ///
    /// Returns `true` and records the attempt on admission; returns
    /// `false` without mutating any state otherwise. The admission check
    /// and the recording are atomic per identity.
    fn record(&self, id: &K) -> bool;

    /// How long `id` must wait before the next send would be admitted.
    ///
    /// Zero when a send would be admitted right now. For a rejected
    /// caller, the returned duration is exact under a frozen clock and
    /// monotonically non-increasing as time advances.
    fn time_until_next_allowed(&self, id: &K) -> Duration;
}
