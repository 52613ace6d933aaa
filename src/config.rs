//! Configuration for the detection pipeline
//!
//! The detector thresholds are tunable through a JSON config file so that
//! classification behavior can be adjusted without recompilation. The
//! defaults are the calibrated production values; loading failures fall
//! back to them with a warning rather than erroring out.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub detector: DetectorConfig,
}

/// Sound-event detection parameters
///
/// All decibel values are elevations relative to the per-recording median
/// baseline, not absolute levels. Durations count samples, nominally one
/// per second of recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum number of samples for any classification to be meaningful.
    /// Shorter recordings produce an empty result.
    pub min_sample_count: usize,
    /// Elevation that opens a loud burst
    pub loud_entry_db: f32,
    /// Elevation that keeps a loud burst going
    pub loud_continue_db: f32,
    /// Hard cap on loud burst length; longer elevation is a sustained
    /// region, not a spike
    pub loud_burst_max_samples: usize,
    /// Elevation that opens a sustained region
    pub sustained_entry_db: f32,
    /// Elevation that keeps a sustained region going (looser than entry so
    /// a region can ride slightly below its trigger level)
    pub sustained_continue_db: f32,
    /// Sustained regions shorter than this are discarded unclassified
    pub min_sustained_samples: usize,
    /// Entry elevation required for a talking classification
    pub talking_entry_db: f32,
    /// Longest region still classifiable as talking, in seconds
    pub talking_max_secs: f64,
    /// Longest rhythmic region classified as snoring, in seconds
    pub snoring_max_secs: f64,
    /// Samples at or below baseline + this ceiling count toward silence
    pub silence_ceiling_db: f32,
    /// Minimum quiet run length reported as a silence event, in seconds
    pub min_silence_secs: f64,
    /// Maximum gap between same-type events before they merge, in seconds
    pub merge_gap_secs: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_sample_count: 10,
            loud_entry_db: 20.0,
            loud_continue_db: 15.0,
            loud_burst_max_samples: 3,
            sustained_entry_db: 8.0,
            sustained_continue_db: 5.0,
            min_sustained_samples: 3,
            talking_entry_db: 10.0,
            talking_max_secs: 15.0,
            snoring_max_secs: 30.0,
            silence_ceiling_db: 2.0,
            min_silence_secs: 300.0,
            merge_gap_secs: 5.0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    ///
    /// Returns the default configuration if the file is missing or does
    /// not parse, logging a warning either way.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.detector.min_sample_count, 10);
        assert_eq!(config.detector.loud_entry_db, 20.0);
        assert_eq!(config.detector.sustained_entry_db, 8.0);
        assert_eq!(config.detector.min_silence_secs, 300.0);
        assert_eq!(config.detector.merge_gap_secs, 5.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.detector.loud_burst_max_samples,
            config.detector.loud_burst_max_samples
        );
        assert_eq!(
            parsed.detector.talking_max_secs,
            config.detector.talking_max_secs
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_file("does/not/exist.json");
        assert_eq!(config.detector.min_sample_count, 10);
    }
}
