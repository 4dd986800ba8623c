//! Transform configuration resolution.
//!
//! Precedence, lowest first: built-in defaults, the `--config` JSON file,
//! individual command-line flags.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use wavtone::{HeaderEmission, SeedPolicy, TransformConfig};

/// Command-line settings that feed into a [`TransformConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// JSON configuration file.
    pub config_path: Option<PathBuf>,
    pub amplitude: Option<f64>,
    pub tone_frequency_hz: Option<f64>,
    /// Start from the legacy preset instead of the defaults.
    pub legacy: bool,
    pub per_frame_header: bool,
    pub every_sample_seed: bool,
    pub strict_tags: bool,
}

impl ConfigOverrides {
    /// Builds the effective configuration.
    pub fn resolve(&self) -> Result<TransformConfig> {
        let mut config = match &self.config_path {
            Some(path) => load_config_file(path)?,
            None => TransformConfig::default(),
        };

        if self.legacy {
            config.header_emission = HeaderEmission::PerFrame;
            config.seed_policy = SeedPolicy::EverySample;
        }
        if let Some(amplitude) = self.amplitude {
            config.amplitude = amplitude;
        }
        if let Some(frequency) = self.tone_frequency_hz {
            config.tone_frequency_hz = frequency;
        }
        if self.per_frame_header {
            config.header_emission = HeaderEmission::PerFrame;
        }
        if self.every_sample_seed {
            config.seed_policy = SeedPolicy::EverySample;
        }
        if self.strict_tags {
            config.strict_tags = true;
        }

        config.validate().context("Invalid transform configuration")?;
        Ok(config)
    }
}

/// Parses a configuration from a JSON file.
pub fn load_config_file(path: &Path) -> Result<TransformConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    TransformConfig::from_json(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
