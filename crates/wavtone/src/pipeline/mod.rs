//! Single-pass WAVE transform driver.
//!
//! The driver decodes the input header, derives the frame layout, writes the
//! output header and then streams frames through [`FrameTransform`]. It moves
//! through [`PipelineStage`]s in order; any error parks it in
//! [`PipelineStage::Failed`].
//!
//! Only `frame_count - 1` frames are processed: frame indices run from 1 up to
//! but excluding `frame_count`, so the final frame of the payload is never
//! read.

mod report;

#[cfg(test)]
mod tests;

use std::fmt;
use std::io::{Read, Write};

use tracing::{debug, info, warn};

use crate::config::{HeaderEmission, TransformConfig};
use crate::error::{WavError, WavResult};
use crate::transform::{FrameTransform, TransformState};
use crate::wav::{WaveHeader, FORMAT_PCM, HEADER_SIZE};

pub use report::PipelineReport;

/// Lifecycle of a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    HeaderRead,
    Validated,
    Streaming,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Init => "init",
            PipelineStage::HeaderRead => "header-read",
            PipelineStage::Validated => "validated",
            PipelineStage::Streaming => "streaming",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives one input stream through the transform into one output stream.
///
/// A pipeline runs once; create a new one per file.
#[derive(Debug)]
pub struct Pipeline {
    config: TransformConfig,
    stage: PipelineStage,
    failed_at: Option<PipelineStage>,
}

impl Pipeline {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            stage: PipelineStage::Init,
            failed_at: None,
        }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Stage the pipeline was in when it failed.
    pub fn failed_at(&self) -> Option<PipelineStage> {
        self.failed_at
    }

    /// Transforms `input` into `output`.
    ///
    /// On error the output may hold a partial file and should be discarded.
    pub fn run<R: Read, W: Write>(&mut self, mut input: R, mut output: W) -> WavResult<PipelineReport> {
        if self.stage != PipelineStage::Init {
            return Err(WavError::PipelineReused {
                stage: self.stage.as_str(),
            });
        }

        let result = self.drive(&mut input, &mut output);
        if let Err(err) = &result {
            debug!(stage = %self.stage, code = err.code(), "pipeline failed");
            self.failed_at = Some(self.stage);
            self.advance(PipelineStage::Failed);
        }
        result
    }

    fn advance(&mut self, next: PipelineStage) {
        debug!(from = %self.stage, to = %next, "pipeline stage");
        self.stage = next;
    }

    fn drive<R: Read, W: Write>(&mut self, input: &mut R, output: &mut W) -> WavResult<PipelineReport> {
        self.config.validate()?;

        let header = WaveHeader::decode(input)?;
        self.advance(PipelineStage::HeaderRead);

        let transform = self.validate(&header)?;
        self.advance(PipelineStage::Validated);

        let mut report = PipelineReport::new(&header, &transform, &self.config);

        if self.config.header_emission == HeaderEmission::Once {
            header.encode(output)?;
            report.bytes_written += HEADER_SIZE as u64;
        }
        self.advance(PipelineStage::Streaming);

        let frame_count = report.frame_count;
        let mut frame = vec![0u8; header.block_align as usize];
        let mut transformed = Vec::with_capacity(transform.output_frame_len());
        let mut state = TransformState::new();
        let mut hasher = blake3::Hasher::new();

        for index in 1..frame_count {
            input
                .read_exact(&mut frame)
                .map_err(|e| WavError::from_read(e, format!("frame {index} of {frame_count}")))?;

            if self.config.header_emission == HeaderEmission::PerFrame {
                header.encode(output)?;
                report.bytes_written += HEADER_SIZE as u64;
            }

            transformed.clear();
            report.clamped_samples += transform.apply(&mut state, &frame, &mut transformed)? as u64;
            hasher.update(&transformed);
            output.write_all(&transformed).map_err(WavError::SinkWrite)?;

            report.frames_written += 1;
            report.bytes_written += transformed.len() as u64;
        }

        output.flush().map_err(WavError::SinkWrite)?;
        report.pcm_hash = hasher.finalize().to_hex().to_string();
        self.advance(PipelineStage::Done);

        info!(
            frames = report.frames_written,
            clamped = report.clamped_samples,
            bytes = report.bytes_written,
            "transform complete"
        );
        Ok(report)
    }

    fn validate(&self, header: &WaveHeader) -> WavResult<FrameTransform> {
        if header.channel_count == 0 {
            return Err(WavError::DegenerateHeader {
                field: "channel_count",
            });
        }
        if header.bits_per_sample == 0 {
            return Err(WavError::DegenerateHeader {
                field: "bits_per_sample",
            });
        }
        if header.sample_rate == 0 {
            return Err(WavError::DegenerateHeader {
                field: "sample_rate",
            });
        }
        if self.config.strict_tags {
            header.validate_tags()?;
        }

        if header.format_type != FORMAT_PCM {
            warn!(
                format_type = header.format_type,
                format = header.format_name(),
                "format is not integer PCM; samples are treated as signed PCM"
            );
        }
        if !header.has_consistent_block_align() {
            warn!(
                block_align = header.block_align,
                channels = header.channel_count,
                bits = header.bits_per_sample,
                "block_align does not match channels * bits_per_sample / 8"
            );
        }
        if !header.is_frame_aligned() {
            warn!(
                data_size = header.data_size,
                block_align = header.block_align,
                "data_size is not a whole number of frames"
            );
        }

        let transform = FrameTransform::new(header, &self.config)?;
        if transform.range().is_degenerate() {
            warn!(
                bits = header.bits_per_sample,
                "no amplitude range for this bit depth; every sample clamps to 0"
            );
        }
        debug!(
            frames = header.frame_count(),
            width = transform.width().bytes(),
            tone = transform.tone(),
            "derived stream parameters"
        );
        Ok(transform)
    }
}

/// Runs a pipeline over an in-memory file and returns the output bytes.
pub fn transform_bytes(input: &[u8], config: TransformConfig) -> WavResult<(Vec<u8>, PipelineReport)> {
    let mut output = Vec::with_capacity(input.len());
    let report = Pipeline::new(config).run(input, &mut output)?;
    Ok((output, report))
}
