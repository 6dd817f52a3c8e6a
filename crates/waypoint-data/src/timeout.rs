//! Timeout configuration for outbound fetches.

use std::time::Duration;

/// Timeout configuration for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Establishing the connection.
    pub connect: Duration,
    /// The whole exchange, body included.
    pub total: Duration,
}

impl TimeoutConfig {
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Connect gets a quarter of `total`.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }

    pub fn from_millis(total_ms: u64) -> Self {
        Self::from_total(Duration::from_millis(total_ms))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_millis(10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total() {
        let t = TimeoutConfig::from_millis(2_000);
        assert_eq!(t.connect, Duration::from_millis(500));
        assert_eq!(t.total, Duration::from_secs(2));
    }
}
