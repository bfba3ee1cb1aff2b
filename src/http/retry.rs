//! Retry policy
//!
//! An immutable description of whether and how failed requests are retried.
//! The policy is injected into the client at construction and may be
//! overridden for a single call; retry state never outlives one call.

use crate::types::{BackoffType, Method};
use std::time::Duration;

/// Rules governing automatic retries
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Whether retries happen at all
    pub enabled: bool,
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Growth of the delay between attempts
    pub backoff_type: BackoffType,
    /// Growth factor for exponential backoff
    pub multiplier: f64,
    /// Fraction of each delay that is randomized (0.0 = none, 1.0 = full jitter)
    pub jitter: f64,
    /// Methods that may be retried without an explicit idempotency flag
    pub retry_safe_methods: Vec<Method>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            max_retries: 4,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_type: BackoffType::Exponential,
            multiplier: 2.0,
            jitter: 0.5,
            retry_safe_methods: vec![Method::GET, Method::HEAD],
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Exponential backoff with jitter using the default limits
    pub fn exponential() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Set the maximum number of retries
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial and maximum delay
    #[must_use]
    pub fn delays(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_delay = initial;
        self.max_delay = max;
        self
    }

    /// Set the backoff strategy
    #[must_use]
    pub fn backoff_type(mut self, backoff_type: BackoffType) -> Self {
        self.backoff_type = backoff_type;
        self
    }

    /// Set the exponential growth factor (values below 1.0 are treated as 1.0)
    #[must_use]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the jitter fraction, clamped to `0.0..=1.0`
    #[must_use]
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Replace the set of retry-safe methods
    #[must_use]
    pub fn retry_safe_methods(mut self, methods: impl Into<Vec<Method>>) -> Self {
        self.retry_safe_methods = methods.into();
        self
    }

    /// Whether a request with this method may be retried at all
    pub fn allows(&self, method: Method, idempotent: bool) -> bool {
        self.enabled
            && self.max_retries > 0
            && (idempotent || self.retry_safe_methods.contains(&method))
    }

    /// Delay before retry number `attempt + 1`, without jitter
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_delay,
            BackoffType::Linear => self.initial_delay.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                if self.initial_delay.is_zero() {
                    return Duration::ZERO;
                }
                let exp = attempt.min(i32::MAX as u32) as i32;
                let factor = self.multiplier.max(1.0).powi(exp);
                let ceiling = self.max_delay.as_secs_f64() / self.initial_delay.as_secs_f64();
                if factor >= ceiling {
                    self.max_delay
                } else {
                    self.initial_delay.mul_f64(factor)
                }
            }
        };

        std::cmp::min(delay, self.max_delay)
    }

    /// Delay before retry number `attempt + 1`, with jitter applied
    pub fn backoff(&self, attempt: u32) -> Duration {
        let delay = self.base_delay(attempt);
        let jitter = self.jitter.clamp(0.0, 1.0);
        if jitter == 0.0 || delay.is_zero() {
            return delay;
        }
        let sample: f64 = rand::random();
        delay.mul_f64(1.0 - jitter * sample)
    }
}

#[cfg(test)]
mod retry_tests {
    use super::*;

    fn fixed(backoff_type: BackoffType) -> RetryPolicy {
        RetryPolicy::exponential()
            .backoff_type(backoff_type)
            .delays(Duration::from_millis(100), Duration::from_secs(10))
            .jitter(0.0)
    }

    #[test]
    fn test_default_is_disabled() {
        let policy = RetryPolicy::default();
        assert!(!policy.enabled);
        assert!(!policy.allows(Method::GET, false));
        assert_eq!(policy.max_retries, 4);
        assert_eq!(policy.max_delay, Duration::from_secs(30));
    }

    #[test]
    fn test_allows_methods() {
        let policy = RetryPolicy::exponential();
        assert!(policy.allows(Method::GET, false));
        assert!(policy.allows(Method::HEAD, false));
        assert!(!policy.allows(Method::POST, false));
        assert!(!policy.allows(Method::PATCH, false));
        assert!(policy.allows(Method::DELETE, true));
        assert!(!policy.max_retries(0).allows(Method::GET, false));
    }

    #[test]
    fn test_custom_retry_safe_methods() {
        let policy = RetryPolicy::exponential().retry_safe_methods([Method::GET, Method::PUT]);
        assert!(policy.allows(Method::PUT, false));
        assert!(!policy.allows(Method::HEAD, false));
    }

    #[test]
    fn test_base_delay_constant() {
        let policy = fixed(BackoffType::Constant);
        assert_eq!(policy.base_delay(0), Duration::from_millis(100));
        assert_eq!(policy.base_delay(5), Duration::from_millis(100));
    }

    #[test]
    fn test_base_delay_linear() {
        let policy = fixed(BackoffType::Linear);
        assert_eq!(policy.base_delay(0), Duration::from_millis(100));
        assert_eq!(policy.base_delay(1), Duration::from_millis(200));
        assert_eq!(policy.base_delay(2), Duration::from_millis(300));
    }

    #[test]
    fn test_base_delay_exponential() {
        let policy = fixed(BackoffType::Exponential);
        assert_eq!(policy.base_delay(0), Duration::from_millis(100));
        assert_eq!(policy.base_delay(1), Duration::from_millis(200));
        assert_eq!(policy.base_delay(2), Duration::from_millis(400));
        assert_eq!(policy.base_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn test_base_delay_respects_max() {
        let policy = fixed(BackoffType::Exponential)
            .delays(Duration::from_millis(100), Duration::from_millis(500));
        assert_eq!(policy.base_delay(10), Duration::from_millis(500));
        assert_eq!(policy.base_delay(u32::MAX), Duration::from_millis(500));
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let policy = fixed(BackoffType::Constant).jitter(0.5);
        for _ in 0..100 {
            let delay = policy.backoff(0);
            assert!(delay <= Duration::from_millis(100));
            assert!(delay >= Duration::from_millis(50));
        }
    }

    #[test]
    fn test_jitter_is_clamped() {
        let policy = RetryPolicy::exponential().jitter(3.0);
        assert!((policy.jitter - 1.0).abs() < f64::EPSILON);
    }
}
