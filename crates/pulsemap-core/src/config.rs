use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

pub const OUTPUT_DIR_ENV: &str = "PULSEMAP_OUTPUT_DIR";
pub const SEED_ENV: &str = "PULSEMAP_SEED";

/// Top-level settings for both pipelines. Every field has a default, so an
/// empty TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub output_dir: PathBuf,
    pub vitals: VitalsConfig,
    pub mobility: MobilityConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            vitals: VitalsConfig::default(),
            mobility: MobilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    pub rolling_window: usize,
    /// Samples per seasonal cycle. 1 disables seasonal separation.
    pub decomposition_period: usize,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            rolling_window: 3,
            decomposition_period: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobilityConfig {
    pub records: usize,
    pub clusters: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub seed: Option<u64>,
    pub map_center: [f64; 2],
    pub zoom: u8,
}

impl Default for MobilityConfig {
    fn default() -> Self {
        Self {
            records: 1000,
            clusters: 5,
            max_iterations: 300,
            tolerance: 1e-4,
            seed: None,
            map_center: [28.6448, 77.216721],
            zoom: 12,
        }
    }
}

/// Settings given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl AnalysisConfig {
    /// Layer defaults, the TOML file at `path`, environment values from
    /// `lookup`, then `overrides`, and validate the result.
    pub fn resolve<F>(path: Option<&Path>, lookup: F, overrides: &ConfigOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(seed) = overrides.seed {
            self.mobility.seed = Some(seed);
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Overlay `PULSEMAP_OUTPUT_DIR` / `PULSEMAP_SEED` from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|value| !value.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir.trim());
        }

        if let Some(raw) = lookup(SEED_ENV).filter(|value| !value.trim().is_empty()) {
            let seed = raw.trim().parse::<u64>().map_err(|err| {
                AnalysisError::Config(format!("{SEED_ENV} must be an unsigned integer: {err}"))
            })?;
            self.mobility.seed = Some(seed);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.vitals.rolling_window == 0 {
            return Err(AnalysisError::Config(
                "vitals.rolling_window must be at least 1".into(),
            ));
        }
        if self.vitals.decomposition_period == 0 {
            return Err(AnalysisError::Config(
                "vitals.decomposition_period must be at least 1".into(),
            ));
        }
        if self.mobility.records == 0 {
            return Err(AnalysisError::Config(
                "mobility.records must be at least 1".into(),
            ));
        }
        if self.mobility.clusters == 0 {
            return Err(AnalysisError::Config(
                "mobility.clusters must be at least 1".into(),
            ));
        }
        if !(self.mobility.tolerance.is_finite() && self.mobility.tolerance >= 0.0) {
            return Err(AnalysisError::Config(
                "mobility.tolerance must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}
