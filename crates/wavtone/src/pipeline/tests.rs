//! Tests for the pipeline driver.

use std::io::{self, Read, Write};

use pretty_assertions::assert_eq;

use super::{transform_bytes, Pipeline, PipelineStage};
use crate::config::{HeaderEmission, SeedPolicy, TransformConfig};
use crate::error::WavError;
use crate::wav::{WaveHeader, HEADER_SIZE};

/// Serializes `header` with its own tags, not the canonical ones `encode` stamps.
fn wav_file(header: &WaveHeader, payload: &[u8]) -> Vec<u8> {
    let mut bytes = header.to_bytes();
    bytes[0..4].copy_from_slice(&header.riff_tag);
    bytes[8..12].copy_from_slice(&header.wave_tag);
    bytes[12..16].copy_from_slice(&header.format_tag);
    bytes[36..40].copy_from_slice(&header.data_tag);
    bytes.extend_from_slice(payload);
    bytes
}

fn mono16(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let payload: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    let header = WaveHeader::pcm(1, sample_rate, 16, payload.len() as u32);
    wav_file(&header, &payload)
}

fn decode_i16(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct BrokenSource;

impl Read for BrokenSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "revoked"))
    }
}

// =========================================================================
// End-to-end behavior
// =========================================================================

#[test]
fn test_mono_16bit_scenario() {
    let input = mono16(44100, &[100, 200, 300, 400]);
    let (output, report) = transform_bytes(&input, TransformConfig::default()).unwrap();

    // tone at 44.1 kHz is 2683; the fourth frame is never read
    assert_eq!(decode_i16(&output[HEADER_SIZE..]), vec![2783, 2833, 2933]);
    assert_eq!(report.frame_count, 4);
    assert_eq!(report.frames_written, 3);
    assert_eq!(report.tone_offset, 2683);
    assert_eq!(report.clamped_samples, 0);
    assert_eq!(report.bytes_written, output.len() as u64);
}

#[test]
fn test_header_is_copied_verbatim() {
    let input = mono16(44100, &[1, 2, 3]);
    let (output, _) = transform_bytes(&input, TransformConfig::default()).unwrap();
    assert_eq!(&output[..HEADER_SIZE], &input[..HEADER_SIZE]);
}

#[test]
fn test_nonstandard_tags_are_restamped() {
    let mut header = WaveHeader::pcm(2, 22050, 16, 16);
    header.riff_tag = *b"RIFX";
    header.data_tag = *b"FLLR";
    header.byte_rate = 12345;
    let input = wav_file(&header, &[0u8; 16]);

    let (output, report) = transform_bytes(&input, TransformConfig::default()).unwrap();

    assert_eq!(&output[0..4], b"RIFF");
    assert_eq!(&output[36..40], b"data");
    assert_eq!(&output[4..8], &input[4..8]);
    assert_eq!(&output[8..36], &input[8..36]);
    assert_eq!(&output[40..44], &input[40..44]);
    assert_eq!(&report.header.riff_tag, b"RIFX");
}

#[test]
fn test_silent_input_yields_tone_constant() {
    // 4800 Hz puts the 2400 Hz tone at a zero crossing
    let input = mono16(4800, &[0; 16]);
    let (output, report) = transform_bytes(&input, TransformConfig::default()).unwrap();
    assert_eq!(report.tone_offset, 0);
    assert_eq!(decode_i16(&output[HEADER_SIZE..]), vec![0; 15]);

    let input = mono16(48000, &[0; 16]);
    let (output, _) = transform_bytes(&input, TransformConfig::default()).unwrap();
    assert_eq!(decode_i16(&output[HEADER_SIZE..]), vec![2472; 15]);
}

#[test]
fn test_processes_frame_count_minus_one() {
    let header = WaveHeader::pcm(2, 44100, 16, 40);
    let input = wav_file(&header, &[0u8; 40]);
    let (output, report) = transform_bytes(&input, TransformConfig::default()).unwrap();

    assert_eq!(report.frame_count, 10);
    assert_eq!(report.frames_written, 9);
    assert_eq!(output.len(), HEADER_SIZE + 9 * 4);
}

#[test]
fn test_missing_last_frame_is_not_an_error() {
    // Header announces 4 frames, only 3 are present
    let header = WaveHeader::pcm(1, 44100, 16, 8);
    let input = wav_file(&header, &[0u8; 6]);
    let (_, report) = transform_bytes(&input, TransformConfig::default()).unwrap();
    assert_eq!(report.frames_written, 3);
}

#[test]
fn test_partial_trailing_frame_is_ignored() {
    let header = WaveHeader::pcm(2, 44100, 16, 10);
    let input = wav_file(&header, &[0u8; 10]);
    let (output, report) = transform_bytes(&input, TransformConfig::default()).unwrap();

    assert_eq!(report.frame_count, 2);
    assert_eq!(report.frames_written, 1);
    assert_eq!(output.len(), HEADER_SIZE + 4);
}

#[test]
fn test_empty_and_single_frame_payloads() {
    let input = mono16(44100, &[]);
    let (output, report) = transform_bytes(&input, TransformConfig::default()).unwrap();
    assert_eq!(output.len(), HEADER_SIZE);
    assert_eq!(report.frames_written, 0);

    let input = mono16(44100, &[500]);
    let (output, report) = transform_bytes(&input, TransformConfig::default()).unwrap();
    assert_eq!(output.len(), HEADER_SIZE);
    assert_eq!(report.frames_written, 0);
}

#[test]
fn test_stereo_8bit_clamping() {
    // 8 kHz tone is 7608, far beyond the 8-bit range
    let header = WaveHeader::pcm(2, 8000, 8, 6);
    let payload = [0u8, (-128i8) as u8, 5, 6, 7, 8];
    let (output, report) =
        transform_bytes(&wav_file(&header, &payload), TransformConfig::default()).unwrap();

    assert_eq!(&output[HEADER_SIZE..], &[127u8, 127, 127, 127]);
    assert_eq!(report.clamped_samples, 4);
}

#[test]
fn test_32bit_stereo() {
    let samples: [i32; 6] = [1000, -1000, 3000, 5000, 0, 0];
    let payload: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    let header = WaveHeader::pcm(2, 44100, 32, payload.len() as u32);
    let config = TransformConfig {
        amplitude: 0.0,
        ..TransformConfig::default()
    };
    let (output, _) = transform_bytes(&wav_file(&header, &payload), config).unwrap();

    let written: Vec<i32> = output[HEADER_SIZE..]
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    // (1000+1000)/2, (-1000+1000)/2, (3000-1000)/2, (5000+3000)/2
    assert_eq!(written, vec![1000, 0, 1000, 4000]);
}

#[test]
fn test_pcm_hash_covers_payload_only() {
    let input = mono16(44100, &[10, 20, 30, 40, 50]);
    let (output, report) = transform_bytes(&input, TransformConfig::default()).unwrap();
    let expected = blake3::hash(&output[HEADER_SIZE..]).to_hex().to_string();
    assert_eq!(report.pcm_hash, expected);
}

#[test]
fn test_report_duration() {
    let input = mono16(8000, &[0; 8001]);
    let (_, report) = transform_bytes(&input, TransformConfig::default()).unwrap();
    assert_eq!(report.duration_seconds(), 1.0);
}

// =========================================================================
// Compatibility modes
// =========================================================================

#[test]
fn test_per_frame_header_emission() {
    let input = mono16(44100, &[100, 200, 300]);
    let config = TransformConfig {
        header_emission: HeaderEmission::PerFrame,
        ..TransformConfig::default()
    };
    let (output, report) = transform_bytes(&input, config).unwrap();

    let header = &input[..HEADER_SIZE];
    let chunk = HEADER_SIZE + 2;
    assert_eq!(output.len(), 2 * chunk);
    assert_eq!(&output[..HEADER_SIZE], header);
    assert_eq!(&output[chunk..chunk + HEADER_SIZE], header);
    assert_eq!(decode_i16(&output[HEADER_SIZE..chunk]), vec![2783]);
    assert_eq!(decode_i16(&output[chunk + HEADER_SIZE..]), vec![2833]);
    assert_eq!(report.bytes_written, output.len() as u64);
}

#[test]
fn test_per_frame_header_with_no_frames_writes_nothing() {
    let input = mono16(44100, &[100]);
    let config = TransformConfig {
        header_emission: HeaderEmission::PerFrame,
        ..TransformConfig::default()
    };
    let (output, _) = transform_bytes(&input, config).unwrap();
    assert!(output.is_empty());
}

#[test]
fn test_legacy_preset_skips_averaging() {
    let input = mono16(44100, &[100, 200, 300, 400]);
    let (output, report) = transform_bytes(&input, TransformConfig::legacy()).unwrap();

    let chunk = HEADER_SIZE + 2;
    let samples: Vec<i16> = output
        .chunks_exact(chunk)
        .flat_map(|c| decode_i16(&c[HEADER_SIZE..]))
        .collect();
    assert_eq!(samples, vec![2783, 2883, 2983]);
    assert_eq!(report.seed_policy, SeedPolicy::EverySample);
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn test_truncated_payload_names_frame() {
    let header = WaveHeader::pcm(1, 44100, 16, 20);
    let input = wav_file(&header, &[0u8; 9]);

    let mut pipeline = Pipeline::new(TransformConfig::default());
    let mut output = Vec::new();
    let err = pipeline.run(input.as_slice(), &mut output).unwrap_err();

    match err {
        WavError::TruncatedInput { what } => assert_eq!(what, "frame 5 of 10"),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(pipeline.stage(), PipelineStage::Failed);
    assert_eq!(pipeline.failed_at(), Some(PipelineStage::Streaming));
}

#[test]
fn test_truncated_header() {
    let input = mono16(44100, &[1, 2, 3]);
    let err = transform_bytes(&input[..30], TransformConfig::default()).unwrap_err();
    assert!(matches!(err, WavError::TruncatedInput { .. }));
}

#[test]
fn test_degenerate_headers() {
    let cases: [(fn(&mut WaveHeader), &str); 3] = [
        (|h| h.channel_count = 0, "channel_count"),
        (|h| h.bits_per_sample = 0, "bits_per_sample"),
        (|h| h.sample_rate = 0, "sample_rate"),
    ];

    for (mutate, expected) in cases {
        let mut header = WaveHeader::pcm(1, 44100, 16, 8);
        mutate(&mut header);
        let mut output = Vec::new();
        let err = Pipeline::new(TransformConfig::default())
            .run(wav_file(&header, &[0u8; 8]).as_slice(), &mut output)
            .unwrap_err();

        match err {
            WavError::DegenerateHeader { field } => assert_eq!(field, expected),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(output.is_empty(), "nothing is written before validation");
    }
}

#[test]
fn test_unsupported_width_writes_nothing() {
    let header = WaveHeader::pcm(2, 44100, 24, 12);
    let mut output = Vec::new();
    let err = Pipeline::new(TransformConfig::default())
        .run(wav_file(&header, &[0u8; 12]).as_slice(), &mut output)
        .unwrap_err();

    assert!(matches!(err, WavError::UnsupportedSampleWidth { bytes: 3 }));
    assert!(output.is_empty());
}

#[test]
fn test_zero_block_align_is_unsupported_width() {
    let mut header = WaveHeader::pcm(1, 44100, 16, 8);
    header.block_align = 0;
    let err = transform_bytes(&wav_file(&header, &[0u8; 8]), TransformConfig::default())
        .unwrap_err();
    assert!(matches!(err, WavError::UnsupportedSampleWidth { bytes: 0 }));
}

#[test]
fn test_strict_tags() {
    let mut header = WaveHeader::pcm(1, 44100, 16, 8);
    header.wave_tag = *b"AVI ";
    let input = wav_file(&header, &[0u8; 8]);

    assert!(transform_bytes(&input, TransformConfig::default()).is_ok());

    let strict = TransformConfig {
        strict_tags: true,
        ..TransformConfig::default()
    };
    let err = transform_bytes(&input, strict).unwrap_err();
    assert!(matches!(err, WavError::InvalidTag { field: "wave", .. }));
}

#[test]
fn test_sink_failure() {
    let input = mono16(44100, &[1, 2, 3]);
    let mut pipeline = Pipeline::new(TransformConfig::default());
    let err = pipeline.run(input.as_slice(), FailingSink).unwrap_err();

    assert!(matches!(err, WavError::SinkWrite(_)));
    assert_eq!(pipeline.stage(), PipelineStage::Failed);
}

#[test]
fn test_source_failure() {
    let err = Pipeline::new(TransformConfig::default())
        .run(BrokenSource, Vec::new())
        .unwrap_err();
    assert!(matches!(err, WavError::SourceRead(_)));
}

#[test]
fn test_invalid_config_fails_before_reading() {
    let config = TransformConfig {
        amplitude: f64::INFINITY,
        ..TransformConfig::default()
    };
    let mut pipeline = Pipeline::new(config);
    let err = pipeline.run(BrokenSource, Vec::new()).unwrap_err();

    assert!(matches!(err, WavError::InvalidConfig { .. }));
    assert_eq!(pipeline.stage(), PipelineStage::Failed);
    assert_eq!(pipeline.failed_at(), Some(PipelineStage::Init));
}

// =========================================================================
// Lifecycle
// =========================================================================

#[test]
fn test_stage_progression() {
    let input = mono16(44100, &[1, 2]);
    let mut pipeline = Pipeline::new(TransformConfig::default());
    assert_eq!(pipeline.stage(), PipelineStage::Init);

    pipeline.run(input.as_slice(), Vec::new()).unwrap();
    assert_eq!(pipeline.stage(), PipelineStage::Done);
    assert!(pipeline.stage().is_terminal());
    assert_eq!(pipeline.failed_at(), None);
}

#[test]
fn test_pipeline_runs_once() {
    let input = mono16(44100, &[1, 2]);
    let mut pipeline = Pipeline::new(TransformConfig::default());
    pipeline.run(input.as_slice(), Vec::new()).unwrap();

    let err = pipeline.run(input.as_slice(), Vec::new()).unwrap_err();
    assert!(matches!(err, WavError::PipelineReused { stage: "done" }));
    assert_eq!(pipeline.stage(), PipelineStage::Done);
}

#[test]
fn test_config_survives_the_run() {
    let config = TransformConfig {
        amplitude: 0.0,
        strict_tags: true,
        ..TransformConfig::legacy()
    };
    let mut pipeline = Pipeline::new(config);
    pipeline.run(mono16(44100, &[1, 2]).as_slice(), Vec::new()).unwrap();
    assert_eq!(pipeline.config(), &config);
}

#[test]
fn test_stage_names() {
    assert_eq!(PipelineStage::HeaderRead.to_string(), "header-read");
    assert_eq!(PipelineStage::Streaming.as_str(), "streaming");
    assert!(!PipelineStage::Validated.is_terminal());
}
