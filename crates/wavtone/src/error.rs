//! Error types for the WAVE codec and transform pipeline.

use thiserror::Error;

/// Result type for codec and pipeline operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that can occur while decoding, transforming or re-encoding a file.
///
/// Every variant is fatal for the run that produced it.
#[derive(Debug, Error)]
pub enum WavError {
    /// The input ended before a header field or frame was complete.
    #[error("truncated input: unexpected end of stream while reading {what}")]
    TruncatedInput {
        /// The header field or stream region being read.
        what: String,
    },

    /// Bytes per channel sample is not 1, 2 or 4.
    #[error("unsupported sample width: {bytes} bytes per channel sample (expected 1, 2 or 4)")]
    UnsupportedSampleWidth {
        /// The offending width in bytes.
        bytes: usize,
    },

    /// A header field that is used as a divisor is zero.
    #[error("degenerate header: {field} is zero")]
    DegenerateHeader {
        /// Name of the zero field.
        field: &'static str,
    },

    /// The output sink rejected a write.
    #[error("failed to write output: {0}")]
    SinkWrite(#[source] std::io::Error),

    /// The input source failed for a reason other than end of stream.
    #[error("failed to read input: {0}")]
    SourceRead(#[source] std::io::Error),

    /// A header tag did not match its canonical value (strict mode only).
    #[error("invalid {field} tag: expected {expected:?}, found {found:?}")]
    InvalidTag {
        /// Tag field name.
        field: &'static str,
        /// Canonical tag value.
        expected: String,
        /// Value read from the input.
        found: String,
    },

    /// Transform configuration is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// A pipeline driver was run after reaching a terminal stage.
    #[error("pipeline already ran to the {stage} stage")]
    PipelineReused {
        /// Terminal stage the driver is in.
        stage: &'static str,
    },
}

impl WavError {
    /// Creates a truncated input error for the named field or region.
    pub fn truncated(what: impl Into<String>) -> Self {
        Self::TruncatedInput { what: what.into() }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Maps a read failure, turning end-of-stream into [`WavError::TruncatedInput`].
    pub fn from_read(err: std::io::Error, what: impl Into<String>) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::truncated(what)
        } else {
            Self::SourceRead(err)
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::TruncatedInput { .. } => "WAV_001",
            WavError::UnsupportedSampleWidth { .. } => "WAV_002",
            WavError::DegenerateHeader { .. } => "WAV_003",
            WavError::SinkWrite(_) => "WAV_004",
            WavError::SourceRead(_) => "WAV_005",
            WavError::InvalidTag { .. } => "WAV_006",
            WavError::InvalidConfig { .. } => "WAV_007",
            WavError::PipelineReused { .. } => "WAV_008",
        }
    }

    /// Error category used to group related errors.
    pub fn category(&self) -> &'static str {
        match self {
            WavError::TruncatedInput { .. } | WavError::SourceRead(_) => "input",
            WavError::UnsupportedSampleWidth { .. }
            | WavError::DegenerateHeader { .. }
            | WavError::InvalidTag { .. } => "header",
            WavError::SinkWrite(_) => "output",
            WavError::InvalidConfig { .. } | WavError::PipelineReused { .. } => "usage",
        }
    }
}
