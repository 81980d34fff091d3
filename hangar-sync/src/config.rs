//! Reconciler configuration
//!
//! Defines the tunables of the backoff poller, the operation tracker and the
//! paginator. Everything has a default; environment variables override them.

use std::str::FromStr;
use std::time::Duration;

use crate::backoff::RetryPolicy;
use crate::error::{Result, SyncError};

/// Default server-side timeout of a single operation wait call
pub const DEFAULT_OPERATION_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default cap on pages fetched by one listing
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Reconciler configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Backoff settings used while awaiting operations
    pub retry_policy: RetryPolicy,

    /// Bound on each individual wait call, independent of the retry budget
    pub operation_wait_timeout: Duration,

    /// Listings that would need more pages than this fail instead of looping
    pub max_pages: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            retry_policy: RetryPolicy::default(),
            operation_wait_timeout: DEFAULT_OPERATION_WAIT_TIMEOUT,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl SyncConfig {
    /// Creates configuration from environment variables
    ///
    /// All variables are optional (durations in seconds, fractions allowed):
    /// - HANGAR_POLL_INITIAL_INTERVAL (default: 10)
    /// - HANGAR_POLL_MULTIPLIER (default: 1.5)
    /// - HANGAR_POLL_RANDOMIZATION_FACTOR (default: 0.5)
    /// - HANGAR_POLL_MAX_INTERVAL (default: 30)
    /// - HANGAR_POLL_MAX_ELAPSED (default: 2400, 0 disables the limit)
    /// - HANGAR_OPERATION_WAIT_TIMEOUT (default: 5)
    /// - HANGAR_MAX_PAGES (default: 1000)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let policy = defaults.retry_policy;

        let retry_policy = RetryPolicy {
            initial_interval: seconds(&lookup, "HANGAR_POLL_INITIAL_INTERVAL")?
                .unwrap_or(policy.initial_interval),
            multiplier: parsed(&lookup, "HANGAR_POLL_MULTIPLIER")?.unwrap_or(policy.multiplier),
            randomization_factor: parsed(&lookup, "HANGAR_POLL_RANDOMIZATION_FACTOR")?
                .unwrap_or(policy.randomization_factor),
            max_interval: seconds(&lookup, "HANGAR_POLL_MAX_INTERVAL")?
                .unwrap_or(policy.max_interval),
            max_elapsed_time: seconds(&lookup, "HANGAR_POLL_MAX_ELAPSED")?
                .unwrap_or(policy.max_elapsed_time),
        };

        let operation_wait_timeout = seconds(&lookup, "HANGAR_OPERATION_WAIT_TIMEOUT")?
            .unwrap_or(defaults.operation_wait_timeout);

        let max_pages = parsed(&lookup, "HANGAR_MAX_PAGES")?.unwrap_or(defaults.max_pages);

        Ok(Self {
            retry_policy,
            operation_wait_timeout,
            max_pages,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        self.retry_policy.validate()?;

        if self.operation_wait_timeout.as_secs() == 0 {
            return Err(SyncError::InvalidConfig(
                "operation_wait_timeout must be at least one second".to_string(),
            ));
        }

        if self.max_pages == 0 {
            return Err(SyncError::InvalidConfig(
                "max_pages must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn parsed<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                SyncError::InvalidConfig(format!("{} has an invalid value {:?}: {}", name, raw, e))
            })
        })
        .transpose()
}

fn seconds<F>(lookup: &F, name: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(secs) = parsed::<f64, F>(lookup, name)? else {
        return Ok(None);
    };

    Duration::try_from_secs_f64(secs).map(Some).map_err(|_| {
        SyncError::InvalidConfig(format!("{} must be a non-negative number of seconds", name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.operation_wait_timeout, Duration::from_secs(5));
        assert_eq!(config.max_pages, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = SyncConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        let config = SyncConfig::from_lookup(lookup(&[
            ("HANGAR_POLL_INITIAL_INTERVAL", "0.5"),
            ("HANGAR_POLL_MULTIPLIER", "2"),
            ("HANGAR_POLL_MAX_INTERVAL", "4"),
            ("HANGAR_POLL_MAX_ELAPSED", "60"),
            ("HANGAR_MAX_PAGES", "7"),
        ]))
        .unwrap();

        assert_eq!(config.retry_policy.initial_interval, Duration::from_millis(500));
        assert_eq!(config.retry_policy.multiplier, 2.0);
        assert_eq!(config.retry_policy.randomization_factor, 0.5);
        assert_eq!(config.retry_policy.max_interval, Duration::from_secs(4));
        assert_eq!(config.retry_policy.max_elapsed_time, Duration::from_secs(60));
        assert_eq!(config.max_pages, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = SyncConfig::from_lookup(lookup(&[("HANGAR_MAX_PAGES", "lots")])).unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(ref msg) if msg.contains("HANGAR_MAX_PAGES")));

        let err =
            SyncConfig::from_lookup(lookup(&[("HANGAR_POLL_MAX_INTERVAL", "-1")])).unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = SyncConfig::default();
        assert!(config.validate().is_ok());

        config.max_pages = 0;
        assert!(matches!(config.validate(), Err(SyncError::InvalidConfig(_))));

        config.max_pages = 10;
        config.operation_wait_timeout = Duration::from_millis(100);
        assert!(config.validate().is_err());

        config.operation_wait_timeout = Duration::from_secs(5);
        config.retry_policy.multiplier = 0.9;
        assert!(config.validate().is_err());
    }
}
