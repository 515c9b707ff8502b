//! # floodgate
//!
//! Per-identity admission control for messaging pipelines.
//!
//! Given a stream of send attempts tagged by identity (user id, API key,
//! channel - any opaque hashable token), floodgate decides whether each
//! attempt is allowed now, records admitted attempts, and tells a rejected
//! caller exactly how long to wait before retrying.
//!
//! Two interchangeable limiters implement the same contract,
//! [`AdmissionControl`], differing only in algorithm:
//!
//! - [`SlidingWindowLimiter`] - up to `max_requests` per identity within a
//!   trailing window, tracked as an ordered timestamp log per identity.
//! - [`FixedIntervalLimiter`] - at most one send per identity per minimum
//!   interval, tracked as a single last-send timestamp per identity.
//!
//! ## Quick Start
//!
//! ```rust
//! use floodgate::{AdmissionControl, SlidingWindowConfig, SlidingWindowLimiter};
//! use std::time::Duration;
//!
//! // Allow 3 messages per user within any trailing 10-second window.
//! let limiter: SlidingWindowLimiter<String> =
//!     SlidingWindowLimiter::new(SlidingWindowConfig::new(Duration::from_secs(10), 3)).unwrap();
//!
//! let user = "user_42".to_string();
//! if limiter.record(&user) {
//!     // deliver the message
//! } else {
//!     let wait = limiter.time_until_next_allowed(&user);
//!     eprintln!("throttled, retry in {:.1}s", wait.as_secs_f64());
//! }
//! ```
//!
//! ## Boundary semantics
//!
//! Both limiters use the same half-open convention: the sliding window
//! covers `(now − window_size, now]`, so an entry exactly one window old
//! has expired, and a fixed-interval send exactly `min_interval` after the
//! previous one is admitted.
//!
//! ## Deterministic time
//!
//! Limiters read time through the [`Clock`] port. Production code uses
//! [`SystemClock`] (monotonic `Instant`); tests inject
//! [`MockClock`](infrastructure::mocks::MockClock) and advance it
//! explicitly, which makes every time-based assertion exact:
//!
//! ```rust
//! use floodgate::infrastructure::mocks::MockClock;
//! use floodgate::{AdmissionControl, SlidingWindowConfig, SlidingWindowLimiter};
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//!
//! let clock = Arc::new(MockClock::new(Instant::now()));
//! let limiter: SlidingWindowLimiter<&str> = SlidingWindowLimiter::with_clock(
//!     SlidingWindowConfig::default(), // window 10s, capacity 1
//!     clock.clone(),
//! )
//! .unwrap();
//!
//! assert!(limiter.record(&"u1"));
//! clock.advance(Duration::from_secs(5));
//! assert!(!limiter.can_send(&"u1"));
//! assert_eq!(limiter.time_until_next_allowed(&"u1"), Duration::from_secs(5));
//!
//! clock.advance(Duration::from_secs(5));
//! assert!(limiter.record(&"u1"));
//! ```
//!
//! ## Concurrency
//!
//! A limiter is safe to share across threads (wrap it in an `Arc`). The
//! check-then-record sequence in `record` runs under a per-identity entry
//! lock inside the storage layer, so concurrent records for one identity
//! can never admit past capacity. Reads take the same lock because they
//! prune expired state.
//!
//! ## Memory
//!
//! - Sliding window: per-identity logs are pruned on every operation and
//!   removed entirely once empty, so memory is bounded by identities with
//!   sends still inside the window.
//! - Fixed interval: one timestamp per distinct identity ever seen. For
//!   high-cardinality, low-repeat identity spaces, call
//!   [`FixedIntervalLimiter::evict_idle`] on a maintenance schedule.
//!
//! Both limiters expose `tracked_identities()` and an atomic
//! [`Metrics`] handle (attempts allowed / rejected, identities evicted)
//! for monitoring.

// Domain layer - pure admission logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    config::{
        ConfigError, FixedIntervalConfig, SlidingWindowConfig, DEFAULT_MAX_REQUESTS,
        DEFAULT_MIN_INTERVAL, DEFAULT_WINDOW_SIZE,
    },
    interval::LastSend,
    window::AttemptLog,
};

pub use application::{
    admission::AdmissionControl,
    fixed_interval::FixedIntervalLimiter,
    metrics::{Metrics, MetricsSnapshot},
    ports::{Clock, IdentityKey, Storage},
    sliding_window::SlidingWindowLimiter,
};

pub use infrastructure::{clock::SystemClock, storage::ShardedStorage};
