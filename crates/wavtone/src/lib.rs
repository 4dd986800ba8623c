//! wavtone core
//!
//! Reads a canonical PCM WAVE file, applies a deterministic per-sample
//! transform and writes the result as a new WAVE file.
//!
//! # Overview
//!
//! The transform averages every channel sample with the sample decoded just
//! before it, adds a constant tone offset derived from a fixed amplitude and
//! frequency, and clamps the result to the signed range of the bit depth.
//! 8, 16 and 32-bit samples are supported, with any number of interleaved
//! channels.
//!
//! # Example
//!
//! ```ignore
//! use wavtone::{Pipeline, TransformConfig};
//!
//! let input = std::io::BufReader::new(std::fs::File::open("in.wav")?);
//! let output = std::io::BufWriter::new(std::fs::File::create("out.wav")?);
//!
//! let report = Pipeline::new(TransformConfig::default()).run(input, output)?;
//! println!("{} frames written", report.frames_written);
//! ```
//!
//! # Crate Structure
//!
//! - [`wav`] - Little-endian codec and the 44-byte header
//! - [`amplitude`] - Clamp range per bit depth
//! - [`transform`] - Per-frame averaging, tone offset and clamping
//! - [`pipeline`] - Header-to-payload streaming driver
//! - [`config`] - Tone parameters and compatibility switches

pub mod amplitude;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod transform;
pub mod wav;

// Re-export main types at crate root
pub use amplitude::AmplitudeRange;
pub use config::{HeaderEmission, SeedPolicy, TransformConfig};
pub use error::{WavError, WavResult};
pub use pipeline::{transform_bytes, Pipeline, PipelineReport, PipelineStage};
pub use transform::{tone_offset, FrameTransform, SampleWidth, TransformState};
pub use wav::WaveHeader;
