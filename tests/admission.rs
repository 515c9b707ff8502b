//! Cross-cutting behavior: the shared contract and concurrent admission.

use floodgate::infrastructure::mocks::MockClock;
use floodgate::{
    AdmissionControl, FixedIntervalConfig, FixedIntervalLimiter, SlidingWindowConfig,
    SlidingWindowLimiter,
};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn limiters_are_interchangeable_behind_the_contract() {
    let clock = Arc::new(MockClock::new(Instant::now()));

    let window: SlidingWindowLimiter<String> = SlidingWindowLimiter::with_clock(
        SlidingWindowConfig::new(Duration::from_secs(10), 1),
        clock.clone(),
    )
    .expect("valid config");
    let interval: FixedIntervalLimiter<String> = FixedIntervalLimiter::with_clock(
        FixedIntervalConfig::new(Duration::from_secs(10)),
        clock.clone(),
    )
    .expect("valid config");

    let limiters: Vec<Box<dyn AdmissionControl<String>>> =
        vec![Box::new(window), Box::new(interval)];

    // With capacity 1 / interval 10s, both behave identically on this stream.
    let user = "u1".to_string();
    for limiter in &limiters {
        assert!(limiter.record(&user));
        assert!(!limiter.record(&user));
        assert_eq!(
            limiter.time_until_next_allowed(&user),
            Duration::from_secs(10)
        );
    }

    clock.advance(Duration::from_secs(10));
    for limiter in &limiters {
        assert!(limiter.can_send(&user));
        assert!(limiter.record(&user));
    }
}

#[test]
fn concurrent_records_never_exceed_window_capacity() {
    const THREADS: usize = 8;
    const ATTEMPTS_PER_THREAD: usize = 25;
    const CAPACITY: usize = 50;

    // Frozen clock: every attempt lands inside one window.
    let clock = Arc::new(MockClock::new(Instant::now()));
    let limiter: Arc<SlidingWindowLimiter<u64>> = Arc::new(
        SlidingWindowLimiter::with_clock(
            SlidingWindowConfig::new(Duration::from_secs(60), CAPACITY),
            clock,
        )
        .expect("valid config"),
    );

    let mut handles = vec![];
    for _ in 0..THREADS {
        let limiter = Arc::clone(&limiter);
        handles.push(thread::spawn(move || {
            let mut admitted = 0;
            for _ in 0..ATTEMPTS_PER_THREAD {
                if limiter.record(&7) {
                    admitted += 1;
                }
            }
            admitted
        }));
    }

    let total_admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    // Exactly the capacity, never more: the check-then-record sequence is
    // atomic per identity.
    assert_eq!(total_admitted, CAPACITY);

    let snapshot = limiter.metrics().snapshot();
    assert_eq!(snapshot.attempts_allowed, CAPACITY as u64);
    assert_eq!(
        snapshot.total_attempts(),
        (THREADS * ATTEMPTS_PER_THREAD) as u64
    );
}

#[test]
fn concurrent_records_respect_the_minimum_interval() {
    const THREADS: usize = 8;
    const ATTEMPTS_PER_THREAD: usize = 25;

    let clock = Arc::new(MockClock::new(Instant::now()));
    let limiter: Arc<FixedIntervalLimiter<u64>> = Arc::new(
        FixedIntervalLimiter::with_clock(
            FixedIntervalConfig::new(Duration::from_secs(60)),
            clock,
        )
        .expect("valid config"),
    );

    let mut handles = vec![];
    for _ in 0..THREADS {
        let limiter = Arc::clone(&limiter);
        handles.push(thread::spawn(move || {
            let mut admitted = 0;
            for _ in 0..ATTEMPTS_PER_THREAD {
                if limiter.record(&7) {
                    admitted += 1;
                }
            }
            admitted
        }));
    }

    let total_admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    // A frozen clock means exactly one send can ever be admitted.
    assert_eq!(total_admitted, 1);
}

#[test]
fn concurrent_identities_do_not_interfere() {
    const THREADS: u64 = 8;

    let clock = Arc::new(MockClock::new(Instant::now()));
    let limiter: Arc<SlidingWindowLimiter<u64>> = Arc::new(
        SlidingWindowLimiter::with_clock(
            SlidingWindowConfig::new(Duration::from_secs(60), 1),
            clock,
        )
        .expect("valid config"),
    );

    let mut handles = vec![];
    for id in 0..THREADS {
        let limiter = Arc::clone(&limiter);
        handles.push(thread::spawn(move || {
            // Each thread owns one identity: first record admits, rest reject.
            let first = limiter.record(&id);
            let second = limiter.record(&id);
            first && !second
        }));
    }

    for handle in handles {
        assert!(handle.join().unwrap());
    }

    assert_eq!(limiter.tracked_identities(), THREADS as usize);
}

#[test]
fn integer_and_string_keys_both_work() {
    let by_name: SlidingWindowLimiter<String> =
        SlidingWindowLimiter::new(SlidingWindowConfig::default()).expect("valid config");
    let by_id: SlidingWindowLimiter<u64> =
        SlidingWindowLimiter::new(SlidingWindowConfig::default()).expect("valid config");

    assert!(by_name.record(&"alice".to_string()));
    assert!(by_id.record(&42));
}
