//! Infrastructure layer - adapters for the application-layer ports.
//!
//! This layer provides:
//! - Clock adapters (system time, plus a controllable mock)
//! - Storage implementations (sharded concurrent maps)

pub mod clock;
pub mod storage;

/// Test doubles for the infrastructure adapters.
///
/// `MockClock` lets tests drive time explicitly instead of sleeping, which
/// keeps time-dependent assertions exact and fast.
pub mod mocks;
