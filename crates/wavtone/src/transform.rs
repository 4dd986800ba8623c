//! Per-frame sample transform.
//!
//! Each channel sample is averaged with the sample decoded just before it,
//! shifted by a constant tone offset and clamped to the bit depth's range:
//!
//! ```text
//! result = clamp((current + previous) / 2 + round(A * sin(2π * f / sample_rate)))
//! ```
//!
//! The tone offset does not depend on the sample index, so it acts as a fixed
//! bias for the whole run.

use std::f64::consts::PI;
use std::io::Write;

use crate::amplitude::AmplitudeRange;
use crate::config::{SeedPolicy, TransformConfig};
use crate::error::{WavError, WavResult};
use crate::wav::{read_le, sign_extend, write_le, WaveHeader};

/// Supported widths of one channel sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    One,
    Two,
    Four,
}

impl SampleWidth {
    /// Maps a byte count to a width, rejecting anything but 1, 2 and 4.
    pub fn from_bytes(bytes: usize) -> WavResult<Self> {
        match bytes {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            other => Err(WavError::UnsupportedSampleWidth { bytes: other }),
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

/// Computes the constant tone offset added to every sample.
pub fn tone_offset(amplitude: f64, frequency_hz: f64, sample_rate: u32) -> i64 {
    let phase = 2.0 * PI * frequency_hz / sample_rate as f64;
    (amplitude * phase.sin()).round() as i64
}

/// Averaging partner carried from one sample to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformState {
    previous: Option<i64>,
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last decoded sample, or `None` before the first frame.
    pub fn previous(&self) -> Option<i64> {
        self.previous
    }
}

/// Transform for frames of one particular layout.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransform {
    channels: usize,
    width: SampleWidth,
    range: AmplitudeRange,
    tone: i64,
    seed_policy: SeedPolicy,
}

impl FrameTransform {
    /// Derives the frame layout, clamp range and tone offset from a header.
    pub fn new(header: &WaveHeader, config: &TransformConfig) -> WavResult<Self> {
        if header.channel_count == 0 {
            return Err(WavError::DegenerateHeader {
                field: "channel_count",
            });
        }
        Ok(Self {
            channels: header.channel_count as usize,
            width: SampleWidth::from_bytes(header.bytes_per_channel_sample())?,
            range: AmplitudeRange::for_bits(header.bits_per_sample),
            tone: tone_offset(
                config.amplitude,
                config.tone_frequency_hz,
                header.sample_rate,
            ),
            seed_policy: config.seed_policy,
        })
    }

    pub fn width(&self) -> SampleWidth {
        self.width
    }

    pub fn range(&self) -> AmplitudeRange {
        self.range
    }

    pub fn tone(&self) -> i64 {
        self.tone
    }

    /// Bytes written per transformed frame.
    pub fn output_frame_len(&self) -> usize {
        self.channels * self.width.bytes()
    }

    /// Transforms one interleaved frame and writes the result to `out`.
    ///
    /// Returns how many samples were clamped.
    pub fn apply<W: Write>(
        &self,
        state: &mut TransformState,
        frame: &[u8],
        out: &mut W,
    ) -> WavResult<usize> {
        let width = self.width.bytes();
        let mut clamped = 0;

        for channel in 0..self.channels {
            let sample_bytes = frame.get(channel * width..).unwrap_or_default();
            let current = sign_extend(read_le(sample_bytes, width)?, width);

            let partner = match (self.seed_policy, state.previous) {
                (SeedPolicy::FirstSample, Some(previous)) => previous,
                _ => current,
            };
            let shifted = ((current + partner) / 2).saturating_add(self.tone);
            let result = self.range.clamp(shifted);
            if result != shifted {
                clamped += 1;
            }

            write_le(result as u32, width, out)?;
            state.previous = Some(current);
        }

        Ok(clamped)
    }
}
