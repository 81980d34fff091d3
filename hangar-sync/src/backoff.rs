//! Backoff poller
//!
//! Re-invokes an operation with jittered exponential backoff until it
//! succeeds, fails permanently, or the policy's elapsed-time budget runs out.
//!
//! The operation decides what is retryable by returning
//! [`BackoffError::Transient`] ("not yet") or [`BackoffError::Permanent`]
//! ("give up now").
//!
//! Time is measured with [`tokio::time::Instant`] so that tests running on a
//! paused clock observe virtual time.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;
use tracing::debug;

use crate::error::SyncError;

/// Exponential backoff settings
///
/// Passed explicitly to every poll; there is no process-wide default to
/// mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Base wait before the first retry
    pub initial_interval: Duration,

    /// Growth factor applied to the base wait after each retry
    pub multiplier: f64,

    /// Symmetric jitter; each wait is drawn from `[i·(1−f), i·(1+f)]`
    pub randomization_factor: f64,

    /// Upper bound on any single wait
    pub max_interval: Duration,

    /// Total time budget; `Duration::ZERO` disables the limit
    pub max_elapsed_time: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(10),
            multiplier: 1.5,
            randomization_factor: 0.5,
            max_interval: Duration::from_secs(30),
            max_elapsed_time: Duration::from_secs(40 * 60),
        }
    }
}

impl RetryPolicy {
    /// Validates the policy
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.initial_interval.is_zero() {
            return Err(SyncError::InvalidConfig(
                "initial_interval must be greater than 0".to_string(),
            ));
        }

        if self.multiplier.is_nan() || self.multiplier < 1.0 {
            return Err(SyncError::InvalidConfig(format!(
                "multiplier must be at least 1.0, got {}",
                self.multiplier
            )));
        }

        if !(0.0..1.0).contains(&self.randomization_factor) {
            return Err(SyncError::InvalidConfig(format!(
                "randomization_factor must be in [0, 1), got {}",
                self.randomization_factor
            )));
        }

        if self.max_interval < self.initial_interval {
            return Err(SyncError::InvalidConfig(
                "max_interval must not be smaller than initial_interval".to_string(),
            ));
        }

        Ok(())
    }
}

/// Outcome of a single attempt that did not succeed
#[derive(Debug)]
pub enum BackoffError<E> {
    /// The condition has not cleared yet; try again later
    Transient(E),
    /// Retrying cannot help
    Permanent(E),
}

/// Why [`retry`] stopped without a value
#[derive(Debug)]
pub enum RetryFailure<E> {
    /// The operation reported a permanent failure
    Permanent(E),

    /// The elapsed-time budget ran out while the condition was still transient
    Exhausted {
        /// The last transient condition
        last: E,
        attempts: u32,
        elapsed: Duration,
    },
}

impl<E> RetryFailure<E> {
    /// The error that ended the loop
    pub fn into_inner(self) -> E {
        match self {
            RetryFailure::Permanent(err) => err,
            RetryFailure::Exhausted { last, .. } => last,
        }
    }
}

/// Interval state machine of the backoff poller
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    policy: RetryPolicy,
    current_interval: Duration,
    start: Instant,
}

impl ExponentialBackoff {
    /// Creates a backoff whose clock starts now
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            current_interval: policy.initial_interval,
            start: Instant::now(),
            policy,
        }
    }

    /// Restarts the clock and the interval
    pub fn reset(&mut self) {
        self.current_interval = self.policy.initial_interval;
        self.start = Instant::now();
    }

    /// Time since the backoff was created or last reset
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Base interval the next wait is drawn around
    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    /// Returns the next wait, or `None` once the time budget is spent
    pub fn next_backoff(&mut self) -> Option<Duration> {
        self.next_backoff_with(&mut rand::thread_rng())
    }

    fn next_backoff_with<R: Rng>(&mut self, rng: &mut R) -> Option<Duration> {
        let elapsed = self.elapsed();
        let wait = randomized(self.current_interval, self.policy.randomization_factor, rng)
            .min(self.policy.max_interval);
        self.grow();

        let budget = self.policy.max_elapsed_time;
        if !budget.is_zero() && elapsed + wait > budget {
            return None;
        }

        Some(wait)
    }

    fn grow(&mut self) {
        let grown = self.current_interval.as_secs_f64() * self.policy.multiplier;
        self.current_interval = if grown >= self.policy.max_interval.as_secs_f64() {
            self.policy.max_interval
        } else {
            // NaN and negative growth keep the current interval.
            Duration::try_from_secs_f64(grown).unwrap_or(self.current_interval)
        };
    }
}

/// Draws a wait uniformly from `[interval·(1−factor), interval·(1+factor)]`
///
/// The lower bound never drops below zero.
fn randomized<R: Rng>(interval: Duration, factor: f64, rng: &mut R) -> Duration {
    if factor.is_nan() || factor <= 0.0 || interval.is_zero() {
        return interval;
    }

    let secs = interval.as_secs_f64();
    let delta = secs * factor;
    let low = (secs - delta).max(0.0);
    let high = secs + delta;
    if !high.is_finite() {
        return interval;
    }

    Duration::try_from_secs_f64(rng.gen_range(low..=high)).unwrap_or(interval)
}

/// Runs `operation` until it succeeds, fails permanently, or the policy gives up
///
/// # Arguments
/// * `policy` - Backoff settings for this poll
/// * `operation` - Called once per attempt
///
/// # Returns
/// The operation's value, or why polling stopped
pub async fn retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryFailure<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BackoffError<E>>>,
{
    let mut backoff = ExponentialBackoff::new(policy.clone());
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        match operation().await {
            Ok(value) => return Ok(value),
            Err(BackoffError::Permanent(err)) => return Err(RetryFailure::Permanent(err)),
            Err(BackoffError::Transient(err)) => match backoff.next_backoff() {
                Some(wait) => {
                    debug!("Attempt {} not ready, retrying in {:?}", attempts, wait);
                    tokio::time::sleep(wait).await;
                }
                None => {
                    return Err(RetryFailure::Exhausted {
                        last: err,
                        attempts,
                        elapsed: backoff.elapsed(),
                    });
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy() -> RetryPolicy {
        RetryPolicy::default()
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.initial_interval, Duration::from_secs(10));
        assert_eq!(policy.multiplier, 1.5);
        assert_eq!(policy.randomization_factor, 0.5);
        assert_eq!(policy.max_interval, Duration::from_secs(30));
        assert_eq!(policy.max_elapsed_time, Duration::from_secs(2400));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_policy_validation() {
        let mut policy = policy();
        policy.multiplier = 0.5;
        assert!(matches!(policy.validate(), Err(SyncError::InvalidConfig(_))));

        let mut policy = RetryPolicy::default();
        policy.randomization_factor = 1.0;
        assert!(policy.validate().is_err());

        let mut policy = RetryPolicy::default();
        policy.max_interval = Duration::from_secs(1);
        assert!(policy.validate().is_err());

        let mut policy = RetryPolicy::default();
        policy.initial_interval = Duration::ZERO;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_waits_stay_within_jitter_bounds() {
        let policy = policy();
        let mut backoff = ExponentialBackoff::new(policy.clone());

        for _ in 0..20 {
            let base = backoff.current_interval().as_secs_f64();
            let wait = backoff.next_backoff().unwrap().as_secs_f64();

            let low = base * (1.0 - policy.randomization_factor);
            let high = (base * (1.0 + policy.randomization_factor))
                .min(policy.max_interval.as_secs_f64());
            assert!(wait >= low - 1e-9, "wait {} below {}", wait, low);
            assert!(wait <= high + 1e-9, "wait {} above {}", wait, high);

            let next = backoff.current_interval().as_secs_f64();
            let expected = (base * policy.multiplier).min(policy.max_interval.as_secs_f64());
            assert!((next - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_interval_caps_at_max() {
        let mut backoff = ExponentialBackoff::new(policy());
        for _ in 0..10 {
            backoff.next_backoff();
        }
        assert_eq!(backoff.current_interval(), Duration::from_secs(30));

        backoff.reset();
        assert_eq!(backoff.current_interval(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_randomization_is_deterministic() {
        let mut policy = policy();
        policy.randomization_factor = 0.0;
        let mut backoff = ExponentialBackoff::new(policy);

        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(10)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(15)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs_f64(22.5)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(30)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(30)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_policy_does_not_panic() {
        let mut policy = policy();
        policy.randomization_factor = 1.5;
        assert!(policy.validate().is_err());

        let mut backoff = ExponentialBackoff::new(policy.clone());
        for _ in 0..50 {
            let wait = backoff.next_backoff().unwrap();
            assert!(wait <= policy.max_interval);
        }

        let result: Result<(), RetryFailure<&str>> =
            retry(&policy, || async { Err(BackoffError::Transient("pending")) }).await;
        assert!(matches!(result, Err(RetryFailure::Exhausted { .. })));

        let mut policy = RetryPolicy::default();
        policy.multiplier = f64::NAN;
        let mut backoff = ExponentialBackoff::new(policy);
        assert_eq!(backoff.next_backoff().map(|w| w <= Duration::from_secs(15)), Some(true));
        assert_eq!(backoff.current_interval(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_once_budget_is_spent() {
        let mut backoff = ExponentialBackoff::new(policy());
        assert!(backoff.next_backoff().is_some());

        tokio::time::advance(Duration::from_secs(40 * 60)).await;
        assert_eq!(backoff.next_backoff(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_returns_first_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<u32, RetryFailure<&str>> = retry(&policy(), move || {
            let counter = Arc::clone(&counter);
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(BackoffError::Transient("not yet"))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_stops_immediately() {
        let start = Instant::now();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<(), RetryFailure<&str>> = retry(&policy(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err(BackoffError::Permanent("boom")) }
        })
        .await;

        assert!(matches!(result, Err(RetryFailure::Permanent("boom"))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_reports_last_condition() {
        let start = Instant::now();

        let result: Result<(), RetryFailure<&str>> =
            retry(&policy(), || async { Err(BackoffError::Transient("pending")) }).await;

        match result {
            Err(RetryFailure::Exhausted {
                last,
                attempts,
                elapsed,
            }) => {
                assert_eq!(last, "pending");
                assert!(attempts > 1);
                assert!(elapsed <= Duration::from_secs(40 * 60));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert!(start.elapsed() <= Duration::from_secs(40 * 60));
    }
}
