//! Retry policy for the search client.

use std::time::Duration;

/// Configuration for automatic retry behavior.
///
/// Exponential backoff: base_delay × 2^attempt with jitter, capped at
/// max_delay. Only transport failures and retryable statuses are retried;
/// the policy of which errors qualify lives in
/// [`crate::error::ToolError::is_retryable`].
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 2)
    pub max_retries: u32,

    /// Base delay for exponential backoff (default: 500ms)
    pub base_delay: Duration,

    /// Maximum delay between retries (default: 8s)
    pub max_delay: Duration,

    /// Jitter factor (0.0-1.0) to add randomness to delays (default: 0.25)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            jitter: 0.25,
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with the specified max retries
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Disable retries
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Calculate the delay for a given retry attempt (0-indexed)
    ///
    /// Uses exponential backoff with jitter: base_delay × 2^attempt × (1 ± jitter)
    pub(crate) fn delay_for_attempt(&self, attempt: u32) -> Duration {
        use rand::Rng;

        let base = self.base_delay.as_secs_f64() * 2_f64.powi(attempt as i32);

        let jitter_range = base * self.jitter;
        let jitter = if jitter_range > 0.0 {
            rand::thread_rng().gen_range(-jitter_range..=jitter_range)
        } else {
            0.0
        };
        let delay_secs = (base + jitter).max(0.0);

        let delay = Duration::from_secs_f64(delay_secs);
        delay.min(self.max_delay)
    }
}
