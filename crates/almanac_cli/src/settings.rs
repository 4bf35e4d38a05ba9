//! Finder tolerances loaded from `almanac.toml`.
//!
//! Every table and key is optional; missing values take the finder defaults.
//! A missing or malformed file falls back to defaults with a warning.

use std::fs;
use std::path::Path;

use almanac_search::{CriticalConfig, DiscreteConfig, RootConfig};
use serde::{Deserialize, Serialize};

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_PATH: &str = "almanac.toml";

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub root: RootSettings,
    pub critical: CriticalSettings,
    pub discrete: DiscreteSettings,
}

/// `[root]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RootSettings {
    pub samples_per_period: usize,
    pub epsilon_days: f64,
    pub epsilon_relative: f64,
    pub max_iterations: u32,
}

impl Default for RootSettings {
    fn default() -> Self {
        let c = RootConfig::default();
        Self {
            samples_per_period: c.samples_per_period,
            epsilon_days: c.epsilon_days,
            epsilon_relative: c.epsilon_relative,
            max_iterations: c.max_iterations,
        }
    }
}

impl RootSettings {
    pub fn to_config(&self) -> RootConfig {
        RootConfig {
            samples_per_period: self.samples_per_period,
            epsilon_days: self.epsilon_days,
            epsilon_relative: self.epsilon_relative,
            max_iterations: self.max_iterations,
        }
    }
}

/// `[critical]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CriticalSettings {
    pub samples_per_period: usize,
    pub epsilon_width_days: f64,
    /// Units of the searched function per day.
    pub epsilon_flatness: f64,
    pub max_iterations: u32,
}

impl Default for CriticalSettings {
    fn default() -> Self {
        let c = CriticalConfig::default();
        Self {
            samples_per_period: c.samples_per_period,
            epsilon_width_days: c.epsilon_width_days,
            epsilon_flatness: c.epsilon_flatness,
            max_iterations: c.max_iterations,
        }
    }
}

impl CriticalSettings {
    pub fn to_config(&self) -> CriticalConfig {
        CriticalConfig {
            samples_per_period: self.samples_per_period,
            epsilon_width_days: self.epsilon_width_days,
            epsilon_flatness: self.epsilon_flatness,
            max_iterations: self.max_iterations,
        }
    }
}

/// `[discrete]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscreteSettings {
    pub samples_per_period: usize,
    pub epsilon_days: f64,
    pub max_iterations: u32,
}

impl Default for DiscreteSettings {
    fn default() -> Self {
        let c = DiscreteConfig::default();
        Self {
            samples_per_period: c.samples_per_period,
            epsilon_days: c.epsilon_days,
            max_iterations: c.max_iterations,
        }
    }
}

impl DiscreteSettings {
    pub fn to_config(&self) -> DiscreteConfig {
        DiscreteConfig {
            samples_per_period: self.samples_per_period,
            epsilon_days: self.epsilon_days,
            max_iterations: self.max_iterations,
        }
    }
}

impl Settings {
    /// Load settings from `path`.
    /// Falls back to defaults if the file doesn't exist or is invalid.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Settings>(&contents) {
                Ok(settings) => {
                    log::debug!("loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("invalid settings file {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the settings as TOML to `path`.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
