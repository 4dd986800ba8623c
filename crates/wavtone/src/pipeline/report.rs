//! Summary of a completed pipeline run.

use serde::Serialize;

use crate::amplitude::AmplitudeRange;
use crate::config::{HeaderEmission, SeedPolicy, TransformConfig};
use crate::transform::FrameTransform;
use crate::wav::WaveHeader;

/// What a pipeline run read, derived and wrote.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Header decoded from the input (and re-encoded to the output).
    pub header: WaveHeader,
    /// Whole frames described by the header.
    pub frame_count: u64,
    /// Frames actually transformed and written.
    pub frames_written: u64,
    pub bytes_per_channel_sample: usize,
    pub amplitude_range: AmplitudeRange,
    /// Constant offset added to every sample.
    pub tone_offset: i64,
    /// Samples that hit the amplitude range boundary.
    pub clamped_samples: u64,
    pub header_emission: HeaderEmission,
    pub seed_policy: SeedPolicy,
    /// Total bytes written to the output, headers included.
    pub bytes_written: u64,
    /// BLAKE3 hash of the transformed PCM bytes (headers excluded).
    pub pcm_hash: String,
}

impl PipelineReport {
    pub(crate) fn new(
        header: &WaveHeader,
        transform: &FrameTransform,
        config: &TransformConfig,
    ) -> Self {
        Self {
            header: *header,
            frame_count: header.frame_count(),
            frames_written: 0,
            bytes_per_channel_sample: transform.width().bytes(),
            amplitude_range: transform.range(),
            tone_offset: transform.tone(),
            clamped_samples: 0,
            header_emission: config.header_emission,
            seed_policy: config.seed_policy,
            bytes_written: 0,
            pcm_hash: String::new(),
        }
    }

    /// Duration of the written frames in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.header.sample_rate == 0 {
            return 0.0;
        }
        self.frames_written as f64 / self.header.sample_rate as f64
    }
}
