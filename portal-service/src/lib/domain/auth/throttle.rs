use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use tokio::sync::Mutex;

struct AttemptWindow {
    failures: u32,
    last_attempt: DateTime<Utc>,
}

/// Per-identifier login throttle.
///
/// Tracks failed attempts within a sliding window; once the limit is hit,
/// further attempts for that identifier are refused until the window lapses.
/// State is in-process only and resets on restart.
pub struct LoginThrottle {
    max_failures: u32,
    window: Duration,
    attempts: Mutex<HashMap<String, AttemptWindow>>,
}

impl LoginThrottle {
    pub fn new(max_failures: u32, window: Duration) -> Self {
        Self {
            max_failures,
            window,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether an attempt for this identifier is currently allowed.
    ///
    /// # Returns
    /// `Err(retry_after_secs)` when the identifier is locked out.
    pub async fn check(&self, identifier: &str) -> Result<(), i64> {
        let mut attempts = self.attempts.lock().await;
        let now = Utc::now();

        if let Some(window) = attempts.get(identifier) {
            if now - window.last_attempt >= self.window {
                attempts.remove(identifier);
                return Ok(());
            }
            if window.failures >= self.max_failures {
                let retry_after = (window.last_attempt + self.window) - now;
                return Err(retry_after.num_seconds().max(1));
            }
        }

        Ok(())
    }

    /// Record a failed attempt for this identifier.
    pub async fn record_failure(&self, identifier: &str) {
        let mut attempts = self.attempts.lock().await;
        let now = Utc::now();

        let window = attempts
            .entry(identifier.to_string())
            .or_insert(AttemptWindow {
                failures: 0,
                last_attempt: now,
            });

        if now - window.last_attempt >= self.window {
            window.failures = 0;
        }
        window.failures += 1;
        window.last_attempt = now;
    }

    /// Forget an identifier's failures after a successful login.
    pub async fn reset(&self, identifier: &str) {
        self.attempts.lock().await.remove(identifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_until_limit_reached() {
        let throttle = LoginThrottle::new(3, Duration::minutes(15));

        for _ in 0..3 {
            assert!(throttle.check("someone").await.is_ok());
            throttle.record_failure("someone").await;
        }

        let retry_after = throttle.check("someone").await.unwrap_err();
        assert!(retry_after >= 1);
    }

    #[tokio::test]
    async fn identifiers_are_independent() {
        let throttle = LoginThrottle::new(1, Duration::minutes(15));
        throttle.record_failure("first").await;

        assert!(throttle.check("first").await.is_err());
        assert!(throttle.check("second").await.is_ok());
    }

    #[tokio::test]
    async fn reset_clears_lockout() {
        let throttle = LoginThrottle::new(1, Duration::minutes(15));
        throttle.record_failure("someone").await;
        assert!(throttle.check("someone").await.is_err());

        throttle.reset("someone").await;
        assert!(throttle.check("someone").await.is_ok());
    }

    #[tokio::test]
    async fn lockout_lapses_with_the_window() {
        let throttle = LoginThrottle::new(1, Duration::zero());
        throttle.record_failure("someone").await;

        // A zero-length window has always lapsed by the next check.
        assert!(throttle.check("someone").await.is_ok());
    }
}
