use std::time::Duration;

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{Error, PointPolicy, Result, TimePolicy, Window};

/// Window settings a host application can embed in its own configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use rolling_window::{Config, Policy};
///
/// let config = Config {
///     buckets: 60,
///     bucket_capacity: 32,
///     bucket_duration: Duration::from_secs(1),
/// };
/// let latencies = config.time_policy::<f64>().unwrap();
///
/// latencies.append(12.5);
///
/// assert_eq!(latencies.count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The number of buckets in the window.
    pub buckets: usize,
    /// Values preallocated per bucket. Zero grows buckets on demand.
    #[serde(default)]
    pub bucket_capacity: usize,
    /// The span of time covered by each bucket of a time policy.
    #[serde(default = "default_bucket_duration")]
    pub bucket_duration: Duration,
}

fn default_bucket_duration() -> Duration {
    Duration::from_secs(1)
}

impl Config {
    pub fn new(buckets: usize) -> Self {
        Self {
            buckets,
            bucket_capacity: 0,
            bucket_duration: default_bucket_duration(),
        }
    }

    /// Checks the settings for both kinds of policy.
    pub fn validate(&self) -> Result<()> {
        if self.buckets == 0 {
            return Err(Error::NoBuckets);
        }

        if self.bucket_duration.is_zero() {
            return Err(Error::ZeroBucketDuration(self.bucket_duration));
        }

        Ok(())
    }

    /// An empty window with the configured buckets and capacity.
    pub fn window<T>(&self) -> Window<T> {
        Window::with_capacity(self.buckets, self.bucket_capacity)
    }

    /// A policy retaining the last `buckets` values.
    pub fn point_policy<T: Zero>(&self) -> Result<PointPolicy<T>> {
        PointPolicy::try_new(self.window())
    }

    /// A policy retaining the values of the last `buckets` bucket durations.
    pub fn time_policy<T>(&self) -> Result<TimePolicy<T>> {
        TimePolicy::try_new(self.window(), self.bucket_duration)
    }
}

#[cfg(test)]
mod tests {
    use crate::Policy;

    use super::*;

    #[test]
    fn deserialize_defaults() {
        let config: Config = serde_json::from_str(r#"{"buckets": 10}"#).unwrap();

        assert_eq!(config, Config::new(10));
        assert_eq!(config.bucket_duration, Duration::from_secs(1));
        assert_eq!(config.bucket_capacity, 0);
    }

    #[test]
    fn deserialize_all() {
        let config: Config = serde_json::from_str(
            r#"{"buckets": 4, "bucket_capacity": 16, "bucket_duration": {"secs": 0, "nanos": 250000000}}"#,
        )
        .unwrap();

        assert_eq!(config.buckets, 4);
        assert_eq!(config.bucket_capacity, 16);
        assert_eq!(config.bucket_duration, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn window() {
        let config = Config {
            buckets: 3,
            bucket_capacity: 8,
            ..Config::new(0)
        };
        let window = config.window::<u32>();

        assert_eq!(window.len(), 3);
        assert!(window.buckets().iter().all(|b| b.capacity() >= 8));
    }

    #[test]
    fn policies() {
        let config = Config::new(5);

        assert_eq!(config.point_policy::<u32>().unwrap().count(), 5);
        assert_eq!(config.time_policy::<u32>().unwrap().buckets(), 5);
    }

    #[test]
    fn invalid() {
        let config = Config::new(0);

        assert_eq!(config.validate(), Err(Error::NoBuckets));
        assert_eq!(config.point_policy::<f64>().unwrap_err(), Error::NoBuckets);
        assert_eq!(config.time_policy::<f64>().unwrap_err(), Error::NoBuckets);

        let config = Config {
            bucket_duration: Duration::ZERO,
            ..Config::new(2)
        };

        assert_eq!(config.validate(), Err(Error::ZeroBucketDuration(Duration::ZERO)));
        assert_eq!(
            config.time_policy::<f64>().unwrap_err(),
            Error::ZeroBucketDuration(Duration::ZERO)
        );
    }
}
