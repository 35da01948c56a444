//! `AnalysisConfig` — TOML run configuration.
//!
//! ```toml
//! network          = "input/network.csv"
//! regions          = "input/zip-codes.csv"
//! region_attribute = "plz"
//! region_values    = ["42551", "42549", "42555", "42553"]
//! population       = "input/plans.csv"
//! events           = "output/output_events.csv.gz"
//! output_dir       = "output"
//! first_iteration  = 0
//! last_iteration   = 0
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use ms_spatial::RegionFeature;

use crate::{AnalyzerError, AnalyzerResult, ControlerConfig};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Links CSV.
    pub network:          PathBuf,
    /// Region features CSV (`wkt` column plus attributes).
    pub regions:          PathBuf,
    /// Attribute that selects which region features form the study area.
    /// Every feature is kept when unset.
    #[serde(default)]
    pub region_attribute: Option<String>,
    #[serde(default)]
    pub region_values:    Vec<String>,
    /// Plan-activities CSV.
    pub population:       PathBuf,
    /// Events CSV, optionally gzipped.
    pub events:           PathBuf,
    pub output_dir:       PathBuf,
    #[serde(default)]
    pub first_iteration:  u32,
    #[serde(default)]
    pub last_iteration:   u32,
}

impl AnalysisConfig {
    /// Parse and validate a configuration held in memory.  Paths are kept
    /// as written.
    pub fn from_toml_str(text: &str) -> AnalyzerResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file, resolving relative paths against its
    /// directory.
    pub fn load(path: &Path) -> AnalyzerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        log::info!("loaded analysis configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> AnalyzerResult<()> {
        self.controler().validate()?;
        if self.region_attribute.is_none() && !self.region_values.is_empty() {
            return Err(AnalyzerError::Config(
                "region_values given without region_attribute".into(),
            ));
        }
        Ok(())
    }

    /// Prefix every relative path with `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.network,
            &mut self.regions,
            &mut self.population,
            &mut self.events,
            &mut self.output_dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    pub fn controler(&self) -> ControlerConfig {
        ControlerConfig {
            first_iteration: self.first_iteration,
            last_iteration:  self.last_iteration,
        }
    }

    /// Whether `feature` belongs to the study area.
    pub fn keeps_region(&self, feature: &RegionFeature) -> bool {
        match &self.region_attribute {
            None => true,
            Some(attr) => feature
                .attribute(attr)
                .is_some_and(|v| self.region_values.iter().any(|want| want == v)),
        }
    }
}
