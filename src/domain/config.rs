//! Limiter configuration and construction-time validation.
//!
//! Misconfiguration is rejected when a limiter is built, never at decision
//! time: a zero-length window or interval would make every admission check
//! degenerate, so constructors fail fast instead.

use std::time::Duration;

/// Default trailing window for [`SlidingWindowConfig`].
pub const DEFAULT_WINDOW_SIZE: Duration = Duration::from_secs(10);

/// Default per-window capacity for [`SlidingWindowConfig`].
pub const DEFAULT_MAX_REQUESTS: usize = 1;

/// Default minimum gap for [`FixedIntervalConfig`].
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(10);

/// Configuration for a sliding-window limiter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlidingWindowConfig {
    /// Length of the trailing window.
    pub window_size: Duration,
    /// Maximum admitted sends per identity inside the window.
    pub max_requests: usize,
}

impl SlidingWindowConfig {
    /// Create a configuration with explicit values.
    pub fn new(window_size: Duration, max_requests: usize) -> Self {
        Self {
            window_size,
            max_requests,
        }
    }

    /// Check that both parameters are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size.is_zero() {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.max_requests == 0 {
            return Err(ConfigError::ZeroMaxRequests);
        }
        Ok(())
    }
}

impl Default for SlidingWindowConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_requests: DEFAULT_MAX_REQUESTS,
        }
    }
}

/// Configuration for a fixed-interval limiter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedIntervalConfig {
    /// Minimum gap between consecutive admitted sends per identity.
    pub min_interval: Duration,
}

impl FixedIntervalConfig {
    /// Create a configuration with an explicit interval.
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    /// Check that the interval is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_interval.is_zero() {
            return Err(ConfigError::ZeroMinInterval);
        }
        Ok(())
    }
}

impl Default for FixedIntervalConfig {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

/// Error returned when limiter construction is given invalid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Window size must be greater than zero
    ZeroWindowSize,
    /// Per-window capacity must be greater than zero
    ZeroMaxRequests,
    /// Minimum interval must be greater than zero
    ZeroMinInterval,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroWindowSize => {
                write!(f, "window_size must be greater than 0")
            }
            ConfigError::ZeroMaxRequests => {
                write!(f, "max_requests must be greater than 0")
            }
            ConfigError::ZeroMinInterval => {
                write!(f, "min_interval must be greater than 0")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let window = SlidingWindowConfig::default();
        assert_eq!(window.window_size, Duration::from_secs(10));
        assert_eq!(window.max_requests, 1);
        assert!(window.validate().is_ok());

        let interval = FixedIntervalConfig::default();
        assert_eq!(interval.min_interval, Duration::from_secs(10));
        assert!(interval.validate().is_ok());
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = SlidingWindowConfig::new(Duration::ZERO, 5);
        assert_eq!(config.validate(), Err(ConfigError::ZeroWindowSize));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = SlidingWindowConfig::new(Duration::from_secs(1), 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxRequests));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = FixedIntervalConfig::new(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinInterval));
    }

    #[test]
    fn errors_render_the_offending_field() {
        assert!(ConfigError::ZeroWindowSize.to_string().contains("window_size"));
        assert!(ConfigError::ZeroMaxRequests.to_string().contains("max_requests"));
        assert!(ConfigError::ZeroMinInterval.to_string().contains("min_interval"));
    }
}
