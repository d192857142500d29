//! Backoff for permission reloads.

use std::time::Duration;

/// Exponential backoff settings for [`reload_with_retry`].
///
/// [`reload_with_retry`]: crate::PermissionRegistry::reload_with_retry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total fetch attempts, including the first one.
    pub max_attempts: u32,

    /// Delay after the first failed attempt.
    pub initial_backoff: Duration,

    /// Factor applied to the delay after each further failure.
    pub multiplier: u32,

    /// Upper bound for a single delay.
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = self.multiplier.max(1).saturating_pow(exponent);
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(100),
            multiplier: 2,
            max_backoff: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(400));
        assert_eq!(policy.backoff_for(10), Duration::from_secs(5));
        assert_eq!(policy.backoff_for(u32::MAX), Duration::from_secs(5));
    }
}
