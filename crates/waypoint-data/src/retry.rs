//! Retry policies for outbound fetches.

use std::time::Duration;

use crate::FetchError;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    None,
    Fixed(Duration),
    /// Doubles from `base` up to `max`.
    Exponential { base: Duration, max: Duration },
}

impl BackoffStrategy {
    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let delay = base.saturating_mul(2u32.saturating_pow(attempt));
                delay.min(*max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(800),
        }
    }
}

/// Conditions that trigger a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCondition {
    StatusCode(u16),
    /// Any 5xx.
    ServerError,
    Timeout,
    /// The request never got a response.
    ConnectionError,
}

impl RetryCondition {
    fn matches(&self, status: Option<u16>, err: Option<&FetchError>) -> bool {
        match (self, status, err) {
            (Self::StatusCode(code), Some(s), _) => s == *code,
            (Self::ServerError, Some(s), _) => (500..600).contains(&s),
            (Self::Timeout, _, Some(FetchError::Timeout)) => true,
            (Self::ConnectionError, _, Some(FetchError::RequestError(_))) => true,
            _ => false,
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff: BackoffStrategy,
    pub retry_on: Vec<RetryCondition>,
}

impl RetryPolicy {
    /// Retry server errors, timeouts and connection failures up to `max_retries` times.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: BackoffStrategy::default(),
            retry_on: vec![
                RetryCondition::ServerError,
                RetryCondition::Timeout,
                RetryCondition::ConnectionError,
            ],
        }
    }

    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffStrategy::None,
            retry_on: Vec::new(),
        }
    }

    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<RetryCondition>) -> Self {
        self.retry_on = conditions;
        self
    }

    /// Whether a response with `status` on attempt `attempt` deserves another try.
    pub fn should_retry_status(&self, status: u16, attempt: u32) -> bool {
        attempt < self.max_retries && self.retry_on.iter().any(|c| c.matches(Some(status), None))
    }

    /// Whether a transport error on attempt `attempt` deserves another try.
    pub fn should_retry_error(&self, err: &FetchError, attempt: u32) -> bool {
        if attempt >= self.max_retries {
            return false;
        }
        match err.status() {
            Some(status) => self.should_retry_status(status, attempt),
            None => self.retry_on.iter().any(|c| c.matches(None, Some(err))),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_caps() {
        let backoff = BackoffStrategy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(300),
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(300));
        assert_eq!(backoff.delay_for_attempt(40), Duration::from_millis(300));
    }

    #[test]
    fn test_default_retries_server_errors_once() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry_status(503, 0));
        assert!(!policy.should_retry_status(503, 1));
        assert!(!policy.should_retry_status(404, 0));
    }

    #[test]
    fn test_retry_on_errors() {
        let policy = RetryPolicy::new(2);
        assert!(policy.should_retry_error(&FetchError::Timeout, 0));
        assert!(policy.should_retry_error(&FetchError::RequestError("reset".into()), 1));
        assert!(!policy.should_retry_error(&FetchError::ParseError("x".into()), 0));
        assert!(!policy.should_retry_error(&FetchError::Timeout, 2));
    }

    #[test]
    fn test_specific_status_condition() {
        let policy = RetryPolicy::new(1).with_conditions(vec![RetryCondition::StatusCode(429)]);
        assert!(policy.should_retry_status(429, 0));
        assert!(!policy.should_retry_status(500, 0));
        assert!(!policy.should_retry_error(&FetchError::Timeout, 0));
    }

    #[test]
    fn test_none_never_retries() {
        assert!(!RetryPolicy::none().should_retry_status(500, 0));
    }
}
