//! Backoff schedule for rate-limit recovery
//!
//! The remote API throttles concurrent fan-out with a dedicated error
//! code rather than HTTP status. Recovery is a sleep-and-reissue loop:
//! there is no attempt cap, only a delay that grows exponentially to a
//! configured ceiling, with optional jitter to keep simultaneous batch
//! calls from re-issuing in lockstep.

use crate::config::RetryConfig;
use rand::Rng;
use std::time::Duration;

/// Produces the successive delays for one call's retry loop.
///
/// Each call site creates its own `Backoff`; the schedule resets
/// naturally with it once the call finally succeeds.
#[derive(Debug)]
pub struct Backoff {
    delay: Duration,
    max_delay: Duration,
    multiplier: f64,
    jitter: bool,
}

impl Backoff {
    /// Create a schedule starting at the configured initial delay.
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            delay: config.initial_delay,
            max_delay: config.max_delay,
            multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }

    /// Return the delay to sleep before the next re-issue and advance
    /// the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let current = if self.jitter {
            add_jitter(self.delay)
        } else {
            self.delay
        };

        let next = Duration::from_secs_f64(self.delay.as_secs_f64() * self.multiplier);
        self.delay = next.min(self.max_delay);

        current
    }
}

/// Add random jitter to a delay to prevent thundering herd.
///
/// Jitter is uniformly distributed between 0% and 100% of the delay,
/// so the actual delay is between `delay` and `2 * delay`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn config_without_jitter() -> RetryConfig {
        RetryConfig {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(400),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    #[test]
    fn delays_double_until_capped() {
        let mut backoff = Backoff::new(&config_without_jitter());

        assert_eq!(backoff.next_delay(), Duration::from_millis(100));
        assert_eq!(backoff.next_delay(), Duration::from_millis(200));
        assert_eq!(backoff.next_delay(), Duration::from_millis(400));
        // Capped from here on
        assert_eq!(backoff.next_delay(), Duration::from_millis(400));
        assert_eq!(backoff.next_delay(), Duration::from_millis(400));
    }

    #[test]
    fn first_delay_is_the_initial_delay() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(30),
            ..config_without_jitter()
        };
        let mut backoff = Backoff::new(&config);
        assert_eq!(backoff.next_delay(), Duration::from_millis(30));
    }

    #[test]
    fn jittered_delays_stay_within_bounds() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 1.0,
            jitter: true,
        };
        let mut backoff = Backoff::new(&config);
        // Multiplier 1.0 keeps the base at 50ms; run enough iterations
        // that a bounds violation would almost certainly surface
        for i in 0..200 {
            let delay = backoff.next_delay();
            assert!(
                delay >= Duration::from_millis(50),
                "iteration {i}: {delay:?} below base delay"
            );
            assert!(
                delay <= Duration::from_millis(100),
                "iteration {i}: {delay:?} above 2x base delay"
            );
        }
    }

    #[test]
    fn add_jitter_on_zero_delay_returns_zero() {
        assert_eq!(add_jitter(Duration::ZERO), Duration::ZERO);
    }
}
