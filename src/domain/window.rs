//! Per-identity timestamp log for sliding-window admission.
//!
//! The log is a FIFO queue of admitted-send times, ordered by insertion
//! (which equals chronological order, since each entry is stamped with the
//! clock reading at admission). All decisions are pure functions of the
//! stored timestamps and a caller-supplied "now", so this layer never
//! touches a clock itself.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Ordered log of admitted-send timestamps for a single identity.
///
/// The active window is the half-open interval `(now − window, now]`: an
/// entry exactly `window` old has aged out. Expired entries are removed
/// from the front only, so pruning is O(expired) amortized per call.
///
/// # Example
/// ```
/// use floodgate::AttemptLog;
/// use std::time::{Duration, Instant};
///
/// let window = Duration::from_secs(10);
/// let t0 = Instant::now();
///
/// let mut log = AttemptLog::new();
/// log.push(t0);
/// assert!(!log.has_capacity(1));
///
/// // The entry expires exactly one window later.
/// log.prune(t0 + window, window);
/// assert!(log.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttemptLog {
    stamps: VecDeque<Instant>,
}

impl AttemptLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            stamps: VecDeque::new(),
        }
    }

    /// Drop entries that have aged out of the window ending at `now`.
    ///
    /// An entry is expired once `now − entry >= window` (half-open window).
    pub fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.stamps.front() {
            if now.saturating_duration_since(oldest) >= window {
                self.stamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Whether another send fits under `max_requests`.
    ///
    /// Callers prune first; this only compares the remaining length.
    pub fn has_capacity(&self, max_requests: usize) -> bool {
        self.stamps.len() < max_requests
    }

    /// Append an admitted send at `now`.
    pub fn push(&mut self, now: Instant) {
        debug_assert!(
            self.stamps.back().map_or(true, |&last| last <= now),
            "attempt log must stay chronologically ordered"
        );
        self.stamps.push_back(now);
    }

    /// Time until the oldest entry ages out and frees a slot.
    ///
    /// Zero when the log (already pruned) is under `max_requests`.
    pub fn wait_until_slot(
        &self,
        now: Instant,
        window: Duration,
        max_requests: usize,
    ) -> Duration {
        if self.stamps.len() < max_requests {
            return Duration::ZERO;
        }
        match self.stamps.front() {
            None => Duration::ZERO,
            Some(&oldest) => window.saturating_sub(now.saturating_duration_since(oldest)),
        }
    }

    /// Number of entries still in the log.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Timestamp of the oldest entry, if any.
    pub fn oldest(&self) -> Option<Instant> {
        self.stamps.front().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(10);

    #[test]
    fn prune_removes_expired_entries_from_front() {
        let t0 = Instant::now();
        let mut log = AttemptLog::new();
        log.push(t0);
        log.push(t0 + Duration::from_secs(4));
        log.push(t0 + Duration::from_secs(8));

        log.prune(t0 + Duration::from_secs(12), WINDOW);

        assert_eq!(log.len(), 2);
        assert_eq!(log.oldest(), Some(t0 + Duration::from_secs(4)));
    }

    #[test]
    fn entry_exactly_one_window_old_is_expired() {
        let t0 = Instant::now();
        let mut log = AttemptLog::new();
        log.push(t0);

        log.prune(t0 + WINDOW, WINDOW);

        assert!(log.is_empty());
    }

    #[test]
    fn entry_just_inside_window_is_kept() {
        let t0 = Instant::now();
        let mut log = AttemptLog::new();
        log.push(t0);

        log.prune(t0 + WINDOW - Duration::from_millis(1), WINDOW);

        assert_eq!(log.len(), 1);
    }

    #[test]
    fn capacity_reflects_remaining_length() {
        let t0 = Instant::now();
        let mut log = AttemptLog::new();
        assert!(log.has_capacity(1));

        log.push(t0);
        assert!(!log.has_capacity(1));
        assert!(log.has_capacity(2));
    }

    #[test]
    fn wait_is_zero_under_capacity() {
        let t0 = Instant::now();
        let mut log = AttemptLog::new();
        log.push(t0);

        assert_eq!(log.wait_until_slot(t0, WINDOW, 2), Duration::ZERO);
    }

    #[test]
    fn wait_counts_down_to_oldest_expiry() {
        let t0 = Instant::now();
        let mut log = AttemptLog::new();
        log.push(t0);

        let wait = log.wait_until_slot(t0 + Duration::from_secs(3), WINDOW, 1);
        assert_eq!(wait, Duration::from_secs(7));

        // Never negative, even past the boundary.
        let wait = log.wait_until_slot(t0 + Duration::from_secs(11), WINDOW, 1);
        assert_eq!(wait, Duration::ZERO);
    }

    #[test]
    fn prune_on_empty_log_is_a_no_op() {
        let mut log = AttemptLog::new();
        log.prune(Instant::now(), WINDOW);
        assert!(log.is_empty());
    }
}
