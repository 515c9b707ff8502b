//! Simulates a message stream from a handful of users through both
//! limiters, logging one line per send attempt.
//!
//! Run with `cargo run --example message_stream`.

use floodgate::{
    AdmissionControl, FixedIntervalConfig, FixedIntervalLimiter, SlidingWindowConfig,
    SlidingWindowLimiter,
};
use rand::Rng;
use std::thread;
use std::time::Duration;

fn drive<L: AdmissionControl<String>>(limiter: &L, first_message: u32, count: u32) {
    let mut rng = rand::thread_rng();

    for message_id in first_message..first_message + count {
        // Cycle through users 1-5, as a busy group chat would.
        let user = format!("user_{}", message_id % 5 + 1);
        let sent = limiter.record(&user);
        let wait = limiter.time_until_next_allowed(&user);

        if sent {
            tracing::info!(message_id, %user, "sent");
        } else {
            tracing::info!(
                message_id,
                %user,
                wait_secs = format!("{:.1}", wait.as_secs_f64()).as_str(),
                "throttled"
            );
        }

        thread::sleep(Duration::from_millis(rng.gen_range(100..1000)));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // One message per user per trailing 10-second window.
    let window: SlidingWindowLimiter<String> =
        SlidingWindowLimiter::new(SlidingWindowConfig::new(Duration::from_secs(10), 1))
            .expect("valid config");

    tracing::info!("--- sliding window: first burst ---");
    drive(&window, 1, 10);

    tracing::info!("--- waiting 4 seconds ---");
    thread::sleep(Duration::from_secs(4));

    tracing::info!("--- sliding window: second burst ---");
    drive(&window, 11, 10);

    let stats = window.metrics().snapshot();
    tracing::info!(
        allowed = stats.attempts_allowed,
        rejected = stats.attempts_rejected,
        rejection_rate = format!("{:.0}%", stats.rejection_rate() * 100.0).as_str(),
        "sliding window summary"
    );

    // At most one message per user every 10 seconds, enforced as a gap.
    let throttle: FixedIntervalLimiter<String> =
        FixedIntervalLimiter::new(FixedIntervalConfig::new(Duration::from_secs(10)))
            .expect("valid config");

    tracing::info!("--- fixed interval: first burst ---");
    drive(&throttle, 1, 10);

    tracing::info!("--- waiting 10 seconds ---");
    thread::sleep(Duration::from_secs(10));

    tracing::info!("--- fixed interval: second burst ---");
    drive(&throttle, 11, 10);

    let stats = throttle.metrics().snapshot();
    tracing::info!(
        allowed = stats.attempts_allowed,
        rejected = stats.attempts_rejected,
        rejection_rate = format!("{:.0}%", stats.rejection_rate() * 100.0).as_str(),
        "fixed interval summary"
    );
}
