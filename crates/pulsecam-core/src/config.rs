//! Recorder configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Tunables for a recording session.
///
/// The defaults match the nominal capture setup: a 30 fps camera stream,
/// 3 seconds of filter settling, a 10 second estimation window, and a
/// 40 BPM plausibility floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Camera frame rate in frames per second.
    pub frame_rate: u32,
    /// Seconds of samples discarded for filter settling before the first
    /// estimate.
    pub settle_seconds: u32,
    /// Seconds of samples in the estimation window.
    pub window_seconds: u32,
    /// Estimates below this are discarded as physiologically implausible.
    pub min_bpm: u32,
    /// Capacity of the bounded event channel toward the observer.
    pub event_capacity: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            settle_seconds: 3,
            window_seconds: 10,
            min_bpm: 40,
            event_capacity: 64,
        }
    }
}

impl RecorderConfig {
    /// Load a configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: RecorderConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 || self.frame_rate > 240 {
            return Err(ConfigError::Validation(format!(
                "frame_rate must be in 1..=240, got {}",
                self.frame_rate
            )));
        }
        if self.window_seconds == 0 {
            return Err(ConfigError::Validation(
                "window_seconds must be at least 1".into(),
            ));
        }
        if self.min_bpm == 0 {
            return Err(ConfigError::Validation("min_bpm must be at least 1".into()));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Validation(
                "event_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
