//! Configuration Management
//!
//! Every physics and matching constant of the engine lives here rather than
//! as a module-level literal, so callers can override the reference values
//! (7 s tolerance, 80 % threshold, 0.0004 drag, and so on) without touching
//! engine code.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::matching::MatchingConfig;
use crate::quality::QualityConfig;
use crate::trajectory::{CohortConfig, TrajectoryConfig};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Event matching settings
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Contact-quality model settings
    #[serde(default)]
    pub quality: QualityConfig,
    /// Trajectory simulation settings
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
    /// Per-level cohort speed tables
    #[serde(default)]
    pub cohorts: CohortConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let mut errors = Vec::new();
        errors.extend(self.matching.validate().into_iter().map(|e| format!("matching: {e}")));
        errors.extend(self.quality.validate().into_iter().map(|e| format!("quality: {e}")));
        errors.extend(self.trajectory.validate().into_iter().map(|e| format!("trajectory: {e}")));
        errors.extend(self.cohorts.validate().into_iter().map(|e| format!("cohorts: {e}")));

        match errors.into_iter().next() {
            Some(first) => Err(crate::Error::Config(first)),
            None => Ok(()),
        }
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".swing_engine").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
