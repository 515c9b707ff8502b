//! Last-send tracking for fixed-interval throttling.
//!
//! One timestamp per identity: a send is admissible once at least
//! `min_interval` has passed since the previous admitted send. Like the
//! sliding-window log, this layer is pure over a caller-supplied "now".

use std::time::{Duration, Instant};

/// Most recent admitted-send time for a single identity.
///
/// An identity that has never sent is represented by the absence of a
/// timestamp and is always admissible. Boundary equality admits: a send
/// exactly `min_interval` after the previous one goes through, matching
/// the sliding window's half-open convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastSend {
    sent_at: Option<Instant>,
}

impl LastSend {
    /// State for an identity with no admitted sends yet.
    pub fn idle() -> Self {
        Self { sent_at: None }
    }

    /// Whether a send at `now` would be admitted.
    pub fn is_open(&self, now: Instant, min_interval: Duration) -> bool {
        match self.sent_at {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= min_interval,
        }
    }

    /// Admit a send at `now` if the interval has elapsed.
    ///
    /// Returns `true` and updates the timestamp on admission; leaves the
    /// state untouched otherwise.
    pub fn try_mark(&mut self, now: Instant, min_interval: Duration) -> bool {
        if self.is_open(now, min_interval) {
            self.sent_at = Some(now);
            true
        } else {
            false
        }
    }

    /// Time remaining until the next send would be admitted.
    pub fn remaining(&self, now: Instant, min_interval: Duration) -> Duration {
        match self.sent_at {
            None => Duration::ZERO,
            Some(last) => min_interval.saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// Timestamp of the last admitted send, if any.
    pub fn sent_at(&self) -> Option<Instant> {
        self.sent_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(10);

    #[test]
    fn fresh_identity_is_open_with_zero_wait() {
        let now = Instant::now();
        let last = LastSend::idle();

        assert!(last.is_open(now, INTERVAL));
        assert_eq!(last.remaining(now, INTERVAL), Duration::ZERO);
    }

    #[test]
    fn mark_closes_the_gate_until_the_interval_elapses() {
        let t0 = Instant::now();
        let mut last = LastSend::idle();

        assert!(last.try_mark(t0, INTERVAL));
        assert!(!last.is_open(t0 + Duration::from_secs(9), INTERVAL));
        assert!(last.is_open(t0 + INTERVAL, INTERVAL));
    }

    #[test]
    fn rejected_mark_does_not_move_the_timestamp() {
        let t0 = Instant::now();
        let mut last = LastSend::idle();
        last.try_mark(t0, INTERVAL);

        assert!(!last.try_mark(t0 + Duration::from_secs(5), INTERVAL));
        assert_eq!(last.sent_at(), Some(t0));
    }

    #[test]
    fn boundary_equality_admits() {
        let t0 = Instant::now();
        let mut last = LastSend::idle();
        last.try_mark(t0, INTERVAL);

        assert!(last.try_mark(t0 + INTERVAL, INTERVAL));
        assert_eq!(last.sent_at(), Some(t0 + INTERVAL));
    }

    #[test]
    fn remaining_counts_down_and_saturates_at_zero() {
        let t0 = Instant::now();
        let mut last = LastSend::idle();
        last.try_mark(t0, INTERVAL);

        assert_eq!(
            last.remaining(t0 + Duration::from_secs(3), INTERVAL),
            Duration::from_secs(7)
        );
        assert_eq!(
            last.remaining(t0 + Duration::from_secs(15), INTERVAL),
            Duration::ZERO
        );
    }
}
