use std::time::Duration;

/// Default number of attempts per provider.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between two attempts against the same provider.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Per-provider retry bounds.
///
/// Only timeouts are retried; every other failure moves the cascade on
/// after a single attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts` counts the first attempt, so `1` disables retries.
    /// A value of `0` is raised to `1`: every provider is tried at least once.
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.retry_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_attempts_raised_to_one() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_attempts(), 1);
    }
}
