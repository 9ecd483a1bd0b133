use std::time::Duration;

/// Bounded retry schedule with exponential backoff and no jitter.
///
/// Attempt `n` (zero-based) that fails is followed by a sleep of
/// `base_delay * 2^n`, unless it was the last allowed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. Values below 1 act as 1.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Effective attempt cap (never zero).
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Sleep duration after the zero-based `failed_attempt`.
    pub fn delay_for(&self, failed_attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(failed_attempt);
        self.base_delay.saturating_mul(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_from_base() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_for(0), Duration::from_secs(1));
        assert_eq!(p.delay_for(1), Duration::from_secs(2));
        assert_eq!(p.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let p = RetryPolicy {
            max_attempts: 0,
            base_delay: Duration::ZERO,
        };
        assert_eq!(p.attempts(), 1);
    }

    #[test]
    fn huge_exponent_saturates() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_for(64), Duration::from_secs(u32::MAX as u64));
    }
}
