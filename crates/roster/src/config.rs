//! Data service configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```
//! use roster::ServiceConfig;
//!
//! let config = ServiceConfig::from_json(r#"{ "recordCount": 50 }"#).unwrap();
//! assert_eq!(config.record_count, 50);
//! assert_eq!(config.seed, 12345);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{Result, RosterError};
use crate::generator::default_window_start;

/// Number of users generated when not configured.
pub const DEFAULT_RECORD_COUNT: usize = 500;

/// Generator seed used when not configured.
pub const DEFAULT_SEED: u64 = 12345;

fn default_record_count() -> usize {
    DEFAULT_RECORD_COUNT
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_cache_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Settings read once when the service is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default = "default_record_count")]
    pub record_count: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Maximum number of cached full-collection orderings.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Earliest possible registration instant.
    #[serde(default = "default_window_start")]
    pub window_start: DateTime<Utc>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            record_count: DEFAULT_RECORD_COUNT,
            seed: DEFAULT_SEED,
            cache_capacity: DEFAULT_CAPACITY,
            window_start: default_window_start(),
        }
    }
}

impl ServiceConfig {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(input: &str) -> Result<Self> {
        let config: ServiceConfig =
            serde_json::from_str(input).map_err(|e| RosterError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the number of generated records.
    pub fn record_count(mut self, count: usize) -> Self {
        self.record_count = count;
        self
    }

    /// Sets the generator seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many full-collection orderings are cached.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Sets the earliest possible registration instant.
    pub fn window_start(mut self, start: DateTime<Utc>) -> Self {
        self.window_start = start;
        self
    }

    /// Checks settings that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(RosterError::Config(
                "cacheCapacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.record_count, 500);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.cache_capacity, 20);
        assert_eq!(config.window_start, default_window_start());
        assert_eq!(ServiceConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn json_overrides() {
        let config = ServiceConfig::from_json(
            r#"{
                "recordCount": 10,
                "seed": 7,
                "cacheCapacity": 3,
                "windowStart": "2021-06-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(config.record_count, 10);
        assert_eq!(config.seed, 7);
        assert_eq!(config.cache_capacity, 3);
        assert_eq!(
            config.window_start,
            Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn negative_count_is_a_config_error() {
        let err = ServiceConfig::from_json(r#"{ "recordCount": -1 }"#).unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ServiceConfig::from_json(r#"{ "records": 5 }"#).unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = ServiceConfig::from_json(r#"{ "cacheCapacity": 0 }"#).unwrap_err();
        assert!(matches!(err, RosterError::Config(msg) if msg.contains("cacheCapacity")));
        assert!(ServiceConfig::new().cache_capacity(0).validate().is_err());
    }

    #[test]
    fn chained_setters() {
        let config = ServiceConfig::new().record_count(3).seed(1).cache_capacity(4);
        assert_eq!((config.record_count, config.seed, config.cache_capacity), (3, 1, 4));
        assert!(config.validate().is_ok());
    }
}
