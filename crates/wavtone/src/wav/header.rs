//! Canonical 44-byte WAVE header.

use serde::{Serialize, Serializer};
use std::io::{Read, Write};
use tracing::debug;

use super::byte_order::{read_tag, read_u16_field, read_u32_field, write_le};
use crate::error::{WavError, WavResult};

/// Size of the canonical `RIFF`/`fmt `/`data` header in bytes.
pub const HEADER_SIZE: usize = 44;

/// Canonical RIFF chunk identifier.
pub const RIFF_TAG: &[u8; 4] = b"RIFF";
/// Canonical RIFF form type.
pub const WAVE_TAG: &[u8; 4] = b"WAVE";
/// Canonical format chunk identifier.
pub const FMT_TAG: &[u8; 4] = b"fmt ";
/// Canonical data chunk identifier.
pub const DATA_TAG: &[u8; 4] = b"data";

/// PCM format chunk size.
pub const PCM_FORMAT_CHUNK_SIZE: u32 = 16;
/// Integer PCM format type.
pub const FORMAT_PCM: u16 = 1;
/// IEEE float format type.
pub const FORMAT_IEEE_FLOAT: u16 = 3;
/// 8-bit A-law format type.
pub const FORMAT_ALAW: u16 = 6;
/// 8-bit mu-law format type.
pub const FORMAT_MULAW: u16 = 7;

/// Decoded canonical WAVE header.
///
/// Tags are kept exactly as read; numeric fields are plain little-endian values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaveHeader {
    #[serde(serialize_with = "tag_as_str")]
    pub riff_tag: [u8; 4],
    /// Total file size minus 8 bytes.
    pub file_size: u32,
    #[serde(serialize_with = "tag_as_str")]
    pub wave_tag: [u8; 4],
    #[serde(serialize_with = "tag_as_str")]
    pub format_tag: [u8; 4],
    /// Format chunk size (16 for PCM).
    pub format_chunk_size: u32,
    /// 1 = PCM, 3 = IEEE float, 6 = A-law, 7 = mu-law.
    pub format_type: u16,
    pub channel_count: u16,
    /// Samples per second per channel.
    pub sample_rate: u32,
    pub byte_rate: u32,
    /// Bytes per multi-channel frame.
    pub block_align: u16,
    pub bits_per_sample: u16,
    #[serde(serialize_with = "tag_as_str")]
    pub data_tag: [u8; 4],
    /// Bytes of PCM payload following the header.
    pub data_size: u32,
}

fn tag_as_str<S: Serializer>(tag: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(tag))
}

impl WaveHeader {
    /// Builds a consistent PCM header for the given layout and payload size.
    pub fn pcm(channel_count: u16, sample_rate: u32, bits_per_sample: u16, data_size: u32) -> Self {
        let block_align = channel_count.wrapping_mul(bits_per_sample / 8);
        Self {
            riff_tag: *RIFF_TAG,
            file_size: data_size.wrapping_add(HEADER_SIZE as u32 - 8),
            wave_tag: *WAVE_TAG,
            format_tag: *FMT_TAG,
            format_chunk_size: PCM_FORMAT_CHUNK_SIZE,
            format_type: FORMAT_PCM,
            channel_count,
            sample_rate,
            byte_rate: sample_rate.wrapping_mul(block_align as u32),
            block_align,
            bits_per_sample,
            data_tag: *DATA_TAG,
            data_size,
        }
    }

    /// Reads the 44-byte header in field order.
    ///
    /// Tags are not checked against their canonical values; see
    /// [`WaveHeader::validate_tags`] for the strict pass.
    pub fn decode<R: Read>(reader: &mut R) -> WavResult<Self> {
        let header = Self {
            riff_tag: read_tag(reader, "riff_tag")?,
            file_size: read_u32_field(reader, "file_size")?,
            wave_tag: read_tag(reader, "wave_tag")?,
            format_tag: read_tag(reader, "format_tag")?,
            format_chunk_size: read_u32_field(reader, "format_chunk_size")?,
            format_type: read_u16_field(reader, "format_type")?,
            channel_count: read_u16_field(reader, "channel_count")?,
            sample_rate: read_u32_field(reader, "sample_rate")?,
            byte_rate: read_u32_field(reader, "byte_rate")?,
            block_align: read_u16_field(reader, "block_align")?,
            bits_per_sample: read_u16_field(reader, "bits_per_sample")?,
            data_tag: read_tag(reader, "data_tag")?,
            data_size: read_u32_field(reader, "data_size")?,
        };
        debug!(?header, "decoded WAVE header");
        Ok(header)
    }

    /// Writes the 44-byte header.
    ///
    /// The four tags are always the canonical literals, never the ones read
    /// from the input. Numeric fields are written verbatim.
    pub fn encode<W: Write>(&self, writer: &mut W) -> WavResult<()> {
        writer.write_all(RIFF_TAG).map_err(WavError::SinkWrite)?;
        write_le(self.file_size, 4, writer)?;
        writer.write_all(WAVE_TAG).map_err(WavError::SinkWrite)?;

        writer.write_all(FMT_TAG).map_err(WavError::SinkWrite)?;
        write_le(self.format_chunk_size, 4, writer)?;
        write_le(self.format_type as u32, 2, writer)?;
        write_le(self.channel_count as u32, 2, writer)?;
        write_le(self.sample_rate, 4, writer)?;
        write_le(self.byte_rate, 4, writer)?;
        write_le(self.block_align as u32, 2, writer)?;
        write_le(self.bits_per_sample as u32, 2, writer)?;

        writer.write_all(DATA_TAG).map_err(WavError::SinkWrite)?;
        write_le(self.data_size, 4, writer)?;

        Ok(())
    }

    /// Encodes the header into a fresh 44-byte buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(HEADER_SIZE);
        self.encode(&mut buffer)
            .expect("writing to Vec should not fail");
        buffer
    }

    /// Checks every tag against its canonical value.
    pub fn validate_tags(&self) -> WavResult<()> {
        let tags: [(&'static str, &[u8; 4], &[u8; 4]); 4] = [
            ("riff", &self.riff_tag, RIFF_TAG),
            ("wave", &self.wave_tag, WAVE_TAG),
            ("fmt", &self.format_tag, FMT_TAG),
            ("data", &self.data_tag, DATA_TAG),
        ];
        for (field, found, expected) in tags {
            if found != expected {
                return Err(WavError::InvalidTag {
                    field,
                    expected: String::from_utf8_lossy(expected).into_owned(),
                    found: String::from_utf8_lossy(found).into_owned(),
                });
            }
        }
        Ok(())
    }

    /// Number of whole frames described by `data_size`.
    ///
    /// Returns 0 when the channel count or bit depth is zero.
    pub fn frame_count(&self) -> u64 {
        let bits_per_frame = self.channel_count as u64 * self.bits_per_sample as u64;
        if bits_per_frame == 0 {
            return 0;
        }
        self.data_size as u64 * 8 / bits_per_frame
    }

    /// Bytes of one channel's sample inside a frame.
    ///
    /// Returns 0 when the channel count is zero.
    pub fn bytes_per_channel_sample(&self) -> usize {
        if self.channel_count == 0 {
            return 0;
        }
        (self.block_align / self.channel_count) as usize
    }

    /// Whether `block_align` agrees with the channel count and bit depth.
    pub fn has_consistent_block_align(&self) -> bool {
        self.block_align as u32 == self.channel_count as u32 * self.bits_per_sample as u32 / 8
    }

    /// Whether `data_size` is a whole number of frames.
    pub fn is_frame_aligned(&self) -> bool {
        self.block_align != 0 && self.data_size % self.block_align as u32 == 0
    }

    /// Human-readable name of the format type.
    pub fn format_name(&self) -> &'static str {
        match self.format_type {
            FORMAT_PCM => "PCM",
            FORMAT_IEEE_FLOAT => "IEEE float",
            FORMAT_ALAW => "8-bit A-law",
            FORMAT_MULAW => "8-bit mu-law",
            _ => "unknown",
        }
    }
}
