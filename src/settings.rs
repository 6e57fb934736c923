//! Runtime settings
//!
//! Loaded from an optional JSON file by the headless driver. Game rules live in
//! [`crate::consts`]; this only covers pacing and seeding.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_FRAME_INTERVAL_MS, BASE_TICK_INTERVAL_MS};
use crate::eco::journal::DEFAULT_MAX_ENTRIES;

/// Real-time pacing presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    #[serde(alias = "slow")]
    #[value(alias = "slow")]
    Relaxed,
    #[default]
    Normal,
    Fast,
}

impl Pace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Relaxed => "relaxed",
            Pace::Normal => "normal",
            Pace::Fast => "fast",
        }
    }

    /// Interval multiplier (1.0 = normal)
    pub fn scale(&self) -> f64 {
        match self {
            Pace::Relaxed => 2.0,
            Pace::Normal => 1.0,
            Pace::Fast => 0.25,
        }
    }
}

/// Errors reading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Real-time pacing of ticks and frames
    pub pace: Pace,
    /// Fixed seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Journal capacity for ecosystem sessions
    pub max_log_entries: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pace: Pace::Normal,
            seed: None,
            max_log_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Real-time interval between ecosystem turns
    pub fn tick_interval(&self) -> Duration {
        scaled(BASE_TICK_INTERVAL_MS, self.pace)
    }

    /// Real-time interval between catcher frames
    pub fn frame_interval(&self) -> Duration {
        scaled(BASE_FRAME_INTERVAL_MS, self.pace)
    }
}

fn scaled(base_ms: u64, pace: Pace) -> Duration {
    Duration::from_millis((base_ms as f64 * pace.scale()).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_parsing() {
        use clap::ValueEnum;

        assert_eq!(Pace::from_str("FAST", true), Ok(Pace::Fast));
        assert_eq!(Pace::from_str("slow", false), Ok(Pace::Relaxed));
        assert!(Pace::from_str("warp", true).is_err());
        for pace in Pace::value_variants() {
            assert_eq!(Pace::from_str(pace.as_str(), false), Ok(*pace));
        }
    }

    #[test]
    fn test_intervals() {
        let settings = Settings::default();
        assert_eq!(settings.tick_interval(), Duration::from_millis(5000));
        assert_eq!(settings.frame_interval(), Duration::from_millis(16));

        let fast = Settings {
            pace: Pace::Fast,
            ..Default::default()
        };
        assert_eq!(fast.tick_interval(), Duration::from_millis(1250));
    }

    #[test]
    fn test_slow_alias_in_json() {
        let settings = Settings::from_json(r#"{ "pace": "slow" }"#).unwrap_or_default();
        assert_eq!(settings.pace, Pace::Relaxed);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "pace": "relaxed" }"#);
        let settings = settings.unwrap_or_default();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.pace, Pace::Relaxed);
        assert_eq!(settings.max_log_entries, DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ pace: }").is_err());
        assert!(Settings::from_json(r#"{ "pace": "warp" }"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/nonexistent/ecosphere.json");
        assert!(matches!(err, Err(SettingsError::Io { .. })));
    }
}
