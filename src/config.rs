//! Configuration types for ingestion and analytics.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`IngestConfig`] - time zone and identity tables used by the parsers
//! - [`TimeZoneSetting`] - how offset-carrying instants become wall-clock time
//! - [`WordCloudConfig`] - thresholds, sizes and stopwords for word frequencies
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::{IngestConfig, TimeZoneSetting};
//! use chatpulse::identity::IdentityTable;
//!
//! let config = IngestConfig::new()
//!     .with_time_zone(TimeZoneSetting::Utc)
//!     .with_identities(IdentityTable::new([("+351 912", "Rita")], Vec::<(&str, &str)>::new()));
//!
//! assert_eq!(config.identities.normalize("+351 912"), "Rita");
//! ```

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::analytics::stopwords::Stopwords;
use crate::identity::IdentityTable;

/// Zone used to turn an instant with an explicit offset into local wall-clock time.
///
/// Line-format timestamps are already wall-clock and are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "zone", rename_all = "snake_case")]
pub enum TimeZoneSetting {
    /// The zone of the machine running the analysis.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
    /// A fixed offset east of UTC.
    Fixed {
        /// Offset in seconds, e.g. `-10800` for UTC-3.
        offset_seconds: i32,
    },
}

impl TimeZoneSetting {
    /// Converts an instant to wall-clock time in this zone.
    ///
    /// An out-of-range fixed offset falls back to UTC.
    pub fn to_wall_clock(&self, instant: DateTime<FixedOffset>) -> NaiveDateTime {
        match *self {
            TimeZoneSetting::Local => instant.with_timezone(&Local).naive_local(),
            TimeZoneSetting::Utc => instant.naive_utc(),
            TimeZoneSetting::Fixed { offset_seconds } => FixedOffset::east_opt(offset_seconds)
                .map_or_else(
                    || instant.naive_utc(),
                    |offset| instant.with_timezone(&offset).naive_local(),
                ),
        }
    }
}

/// Configuration for transcript ingestion.
///
/// # Example
///
/// ```rust
/// use chatpulse::config::{IngestConfig, TimeZoneSetting};
///
/// let config = IngestConfig::new().with_time_zone(TimeZoneSetting::Fixed { offset_seconds: 3600 });
/// assert!(config.identities.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Zone for structured-format timestamps carrying an offset (default: local)
    pub time_zone: TimeZoneSetting,

    /// Phone and alias tables for the line-oriented format (default: empty)
    pub identities: IdentityTable,
}

impl IngestConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time zone setting.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZoneSetting) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Sets the identity tables.
    #[must_use]
    pub fn with_identities(mut self, identities: IdentityTable) -> Self {
        self.identities = identities;
        self
    }
}

/// Configuration for word-frequency extraction.
///
/// # Example
///
/// ```rust
/// use chatpulse::analytics::stopwords::Stopwords;
/// use chatpulse::config::WordCloudConfig;
///
/// let config = WordCloudConfig::new()
///     .with_min_count(2)
///     .with_stopwords(Stopwords::from_words(["lol"]));
///
/// assert_eq!(config.min_count, 2);
/// assert!(config.stopwords.contains("lol"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    /// Words seen fewer times are dropped (default: 5)
    pub min_count: usize,

    /// Maximum number of words returned (default: 100)
    pub max_words: usize,

    /// Size of the least frequent kept word (default: 12)
    pub min_size: f64,

    /// Size of the most frequent kept word (default: 60)
    pub max_size: f64,

    /// Words never counted (default: Portuguese)
    pub stopwords: Stopwords,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            min_count: 5,
            max_words: 100,
            min_size: 12.0,
            max_size: 60.0,
            stopwords: Stopwords::portuguese(),
        }
    }
}

impl WordCloudConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum count.
    #[must_use]
    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }

    /// Sets the maximum number of words.
    #[must_use]
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Sets the size range.
    #[must_use]
    pub fn with_size_range(mut self, min_size: f64, max_size: f64) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    /// Replaces the stopword table.
    #[must_use]
    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_ingest_config_default() {
        let config = IngestConfig::default();
        assert_eq!(config.time_zone, TimeZoneSetting::Local);
        assert!(config.identities.is_empty());
    }

    #[test]
    fn test_time_zone_utc() {
        let wall = TimeZoneSetting::Utc.to_wall_clock(instant("2024-01-01T10:00:00+02:00"));
        assert_eq!(wall.to_string(), "2024-01-01 08:00:00");
    }

    #[test]
    fn test_time_zone_fixed() {
        let zone = TimeZoneSetting::Fixed {
            offset_seconds: -3 * 3600,
        };
        let wall = zone.to_wall_clock(instant("2024-01-01T10:00:00Z"));
        assert_eq!(wall.to_string(), "2024-01-01 07:00:00");
    }

    #[test]
    fn test_time_zone_fixed_out_of_range_falls_back_to_utc() {
        let zone = TimeZoneSetting::Fixed {
            offset_seconds: 100_000,
        };
        let wall = zone.to_wall_clock(instant("2024-01-01T10:00:00Z"));
        assert_eq!(wall.to_string(), "2024-01-01 10:00:00");
    }

    #[test]
    fn test_time_zone_serde() {
        let json = serde_json::to_string(&TimeZoneSetting::Fixed {
            offset_seconds: 3600,
        })
        .unwrap();
        assert_eq!(json, r#"{"zone":"fixed","offset_seconds":3600}"#);

        let parsed: TimeZoneSetting = serde_json::from_str(r#"{"zone":"utc"}"#).unwrap();
        assert_eq!(parsed, TimeZoneSetting::Utc);
    }

    #[test]
    fn test_word_cloud_config_default() {
        let config = WordCloudConfig::default();
        assert_eq!(config.min_count, 5);
        assert_eq!(config.max_words, 100);
        assert!((config.min_size - 12.0).abs() < f64::EPSILON);
        assert!((config.max_size - 60.0).abs() < f64::EPSILON);
        assert!(config.stopwords.contains("que"));
    }

    #[test]
    fn test_word_cloud_config_builder() {
        let config = WordCloudConfig::new()
            .with_max_words(10)
            .with_size_range(10.0, 20.0);
        assert_eq!(config.max_words, 10);
        assert!((config.max_size - 20.0).abs() < f64::EPSILON);
    }
}
