//! Transform configuration.
//!
//! Defaults reproduce the fixed behavior of the converter: an 8000-amplitude
//! 2400 Hz tone offset, a single output header, and one-shot seeding of the
//! averaging partner. The legacy preset restores the older converter's
//! per-frame header and per-sample seeding for side-by-side comparisons.

use serde::{Deserialize, Serialize};

use crate::error::{WavError, WavResult};

/// Default tone amplitude.
pub const DEFAULT_AMPLITUDE: f64 = 8000.0;

/// Default tone frequency in Hz.
pub const DEFAULT_TONE_FREQUENCY_HZ: f64 = 2400.0;

/// When the output header is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderEmission {
    /// Once, before the first frame.
    #[default]
    Once,
    /// Before every frame (legacy; produces an unplayable file).
    PerFrame,
}

/// Where the averaging partner of a sample comes from.
///
/// The default seeds once and then carries the previous sample, which is what
/// produces `[2783, 2833, 2933]` for a 44.1 kHz mono `[100, 200, 300, 400]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// The first sample of the stream pairs with itself; every later sample
    /// pairs with the sample decoded just before it.
    #[default]
    FirstSample,
    /// Every sample pairs with itself (legacy), so averaging is a no-op.
    EverySample,
}

/// Parameters of the sample transform and output layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Peak amplitude of the injected tone.
    pub amplitude: f64,
    /// Frequency of the injected tone in Hz.
    pub tone_frequency_hz: f64,
    pub header_emission: HeaderEmission,
    pub seed_policy: SeedPolicy,
    /// Reject inputs whose tags are not `RIFF`/`WAVE`/`fmt `/`data`.
    pub strict_tags: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            amplitude: DEFAULT_AMPLITUDE,
            tone_frequency_hz: DEFAULT_TONE_FREQUENCY_HZ,
            header_emission: HeaderEmission::Once,
            seed_policy: SeedPolicy::FirstSample,
            strict_tags: false,
        }
    }
}

impl TransformConfig {
    /// Preset reproducing the older converter's header and seeding behavior.
    pub fn legacy() -> Self {
        Self {
            header_emission: HeaderEmission::PerFrame,
            seed_policy: SeedPolicy::EverySample,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> WavResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WavError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the tone parameters are usable.
    pub fn validate(&self) -> WavResult<()> {
        if !self.amplitude.is_finite() {
            return Err(WavError::invalid_config(format!(
                "amplitude must be finite, got {}",
                self.amplitude
            )));
        }
        if !self.tone_frequency_hz.is_finite() || self.tone_frequency_hz < 0.0 {
            return Err(WavError::invalid_config(format!(
                "tone_frequency_hz must be a finite non-negative number, got {}",
                self.tone_frequency_hz
            )));
        }
        Ok(())
    }
}
