//! Tuning constants for the scheduler and the review session.
//!
//! Two tunings of the failing-rating delays and the Easy bonus exist in the history of the
//! app. Both are available as presets; `standard` is the default. The minimum-growth floor
//! for successful reviews applies to both.
//!
//! A config file is plain TOML, every key optional:
//!
//! ```toml
//! seed = 42
//!
//! [scheduler]
//! again_delay_secs = 60
//! easy_bonus = 0.15
//!
//! [auto_rate]
//! threshold_ms = 1000
//! ```

use crate::models::Rating;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Upper bound accepted for `max_interval_days` (about 2700 years).
pub const INTERVAL_DAYS_LIMIT: f64 = 1_000_000.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub again_delay_secs: i64,
    pub hard_delay_secs: i64,
    pub again_penalty: f64,
    pub hard_penalty: f64,
    pub easy_bonus: f64,
    pub good_graduation_days: f64,
    pub easy_graduation_days: f64,
    pub min_ease_factor: f64,
    /// Successful reviews landing at or before `now` are pushed out by this much.
    pub success_clamp_secs: i64,
    /// Intervals stop growing here.
    pub max_interval_days: f64,
}

impl SchedulerConfig {
    /// Again in 1 minute, Hard in 5 minutes, Easy bonus +0.15.
    pub fn standard() -> Self {
        Self {
            again_delay_secs: 60,
            hard_delay_secs: 5 * 60,
            again_penalty: 0.20,
            hard_penalty: 0.15,
            easy_bonus: 0.15,
            good_graduation_days: 1.0,
            easy_graduation_days: 4.0,
            min_ease_factor: 1.3,
            success_clamp_secs: SECS_PER_DAY,
            max_interval_days: 36_500.0,
        }
    }

    /// Again in 1 second, Hard in 10 minutes, Easy bonus +0.10.
    pub fn legacy() -> Self {
        Self {
            again_delay_secs: 1,
            hard_delay_secs: 10 * 60,
            easy_bonus: 0.10,
            ..Self::standard()
        }
    }

    pub fn short_delay(&self, rating: Rating) -> Duration {
        match rating {
            Rating::Again => seconds(self.again_delay_secs),
            _ => seconds(self.hard_delay_secs),
        }
    }

    pub fn ease_penalty(&self, rating: Rating) -> f64 {
        match rating {
            Rating::Again => self.again_penalty,
            _ => self.hard_penalty,
        }
    }

    pub fn graduation_days(&self, rating: Rating) -> f64 {
        match rating {
            Rating::Easy => self.easy_graduation_days,
            _ => self.good_graduation_days,
        }
    }

    pub fn success_clamp(&self) -> Duration {
        seconds(self.success_clamp_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.again_delay_secs < 0 || self.hard_delay_secs < 0 {
            return Err(ConfigError::Invalid(
                "failing-rating delays must not be negative".to_string(),
            ));
        }
        if self.success_clamp_secs <= 0 {
            return Err(ConfigError::Invalid(
                "success_clamp_secs must be positive".to_string(),
            ));
        }
        if !(self.max_interval_days >= 1.0 && self.max_interval_days <= INTERVAL_DAYS_LIMIT) {
            return Err(ConfigError::Invalid(format!(
                "max_interval_days must be between 1 and {INTERVAL_DAYS_LIMIT}"
            )));
        }
        if !(self.good_graduation_days >= 1.0 && self.easy_graduation_days >= 1.0) {
            return Err(ConfigError::Invalid(
                "graduation intervals must be at least one day".to_string(),
            ));
        }
        if self.good_graduation_days > self.max_interval_days
            || self.easy_graduation_days > self.max_interval_days
        {
            return Err(ConfigError::Invalid(
                "graduation intervals must not exceed max_interval_days".to_string(),
            ));
        }
        let max_offset_secs = self.max_interval_days * SECS_PER_DAY as f64;
        if [
            self.again_delay_secs,
            self.hard_delay_secs,
            self.success_clamp_secs,
        ]
        .iter()
        .any(|&secs| secs as f64 > max_offset_secs)
        {
            return Err(ConfigError::Invalid(
                "delays must not exceed max_interval_days".to_string(),
            ));
        }
        if self.again_penalty < 0.0 || self.hard_penalty < 0.0 || self.easy_bonus < 0.0 {
            return Err(ConfigError::Invalid(
                "ease penalties and bonus must not be negative".to_string(),
            ));
        }
        if self.min_ease_factor <= 0.0 {
            return Err(ConfigError::Invalid(
                "min_ease_factor must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Saturates instead of panicking on out-of-range values.
fn seconds(secs: i64) -> Duration {
    Duration::try_seconds(secs).unwrap_or(if secs < 0 { Duration::MIN } else { Duration::MAX })
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Implicit rating for a second "continue" press while the answer is shown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoRatePolicy {
    pub threshold_ms: u64,
    pub fast: Rating,
    pub slow: Rating,
}

impl Default for AutoRatePolicy {
    fn default() -> Self {
        Self {
            threshold_ms: 1000,
            fast: Rating::Easy,
            slow: Rating::Again,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub scheduler: SchedulerConfig,
    pub auto_rate: AutoRatePolicy,
    /// Shuffle seed for session snapshots. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl ReviewConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ReviewConfig = toml::from_str(contents)?;
        config.scheduler.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_tuning() {
        let standard = SchedulerConfig::standard();
        let legacy = SchedulerConfig::legacy();
        assert_eq!(standard.again_penalty, legacy.again_penalty);
        assert_eq!(standard.hard_penalty, legacy.hard_penalty);
        assert_eq!(legacy.short_delay(Rating::Again), Duration::seconds(1));
        assert_eq!(legacy.short_delay(Rating::Hard), Duration::minutes(10));
        assert_eq!(standard.short_delay(Rating::Again), Duration::minutes(1));
        assert_eq!(standard.short_delay(Rating::Hard), Duration::minutes(5));
        assert_eq!(SchedulerConfig::default(), standard);
    }

    #[test]
    fn test_again_is_harsher_than_hard() {
        for config in [SchedulerConfig::standard(), SchedulerConfig::legacy()] {
            assert!(config.ease_penalty(Rating::Again) > config.ease_penalty(Rating::Hard));
            assert!(config.short_delay(Rating::Again) < config.short_delay(Rating::Hard));
            assert!(config.graduation_days(Rating::Easy) > config.graduation_days(Rating::Good));
        }
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = ReviewConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReviewConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = ReviewConfig::from_toml_str(
            r#"
seed = 7

[scheduler]
again_delay_secs = 1
easy_bonus = 0.1

[auto_rate]
threshold_ms = 1500
slow = 1
"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scheduler.again_delay_secs, 1);
        assert_eq!(config.scheduler.easy_bonus, 0.1);
        assert_eq!(config.scheduler.hard_delay_secs, 300);
        assert_eq!(config.auto_rate.threshold_ms, 1500);
        assert_eq!(config.auto_rate.slow, Rating::Hard);
        assert_eq!(config.auto_rate.fast, Rating::Easy);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = ReviewConfig::from_toml_str("[scheduler]\nsuccess_clamp_secs = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = ReviewConfig::from_toml_str("[scheduler]\nhard_delay_secs = 9223372036854775807\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = ReviewConfig::from_toml_str("[scheduler]\neasy_graduation_days = 1e12\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = ReviewConfig::from_toml_str("[scheduler]\nmax_interval_days = 1e9\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = ReviewConfig::from_toml_str("[auto_rate]\nfast = 9\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.toml");
        fs::write(&path, "[scheduler]\nhard_delay_secs = 600\n").unwrap();

        let config = ReviewConfig::load(&path).unwrap();
        assert_eq!(config.scheduler.hard_delay_secs, 600);

        assert!(matches!(
            ReviewConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
