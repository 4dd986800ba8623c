//! Valid signed amplitude range per bit depth.

use serde::Serialize;

/// Inclusive clamp range for signed PCM samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmplitudeRange {
    pub lower: i64,
    pub upper: i64,
}

impl AmplitudeRange {
    /// Returns the signed range for 8, 16 and 32-bit samples.
    ///
    /// Any other depth yields the degenerate `0..=0` range, which clamps every
    /// sample to zero.
    pub fn for_bits(bits_per_sample: u16) -> Self {
        let (lower, upper) = match bits_per_sample {
            8 => (i8::MIN as i64, i8::MAX as i64),
            16 => (i16::MIN as i64, i16::MAX as i64),
            32 => (i32::MIN as i64, i32::MAX as i64),
            _ => (0, 0),
        };
        Self { lower, upper }
    }

    /// Saturates `value` at the range boundaries.
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.lower, self.upper)
    }

    /// Whether this is the zero-width range of an unsupported bit depth.
    pub fn is_degenerate(&self) -> bool {
        self.lower == 0 && self.upper == 0
    }
}
