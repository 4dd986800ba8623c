//! Little-endian integer reads and writes.
//!
//! Every multi-byte number in a canonical WAVE file is little-endian. The
//! helpers here work on fixed widths of 1, 2 or 4 bytes, which covers both the
//! header fields and the supported PCM sample widths.

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use crate::error::{WavError, WavResult};

/// Interprets the first `width` bytes of `bytes` as an unsigned little-endian integer.
pub fn read_le(bytes: &[u8], width: usize) -> WavResult<u32> {
    if !matches!(width, 1 | 2 | 4) {
        return Err(WavError::UnsupportedSampleWidth { bytes: width });
    }
    if bytes.len() < width {
        return Err(WavError::truncated(format!(
            "{width}-byte value ({} bytes available)",
            bytes.len()
        )));
    }

    Ok(match width {
        1 => bytes[0] as u32,
        2 => LittleEndian::read_u16(&bytes[..2]) as u32,
        _ => LittleEndian::read_u32(&bytes[..4]),
    })
}

/// Writes the low `width` bytes of `value`, least-significant first.
pub fn write_le<W: Write>(value: u32, width: usize, sink: &mut W) -> WavResult<()> {
    let written = match width {
        1 => sink.write_u8(value as u8),
        2 => sink.write_u16::<LittleEndian>(value as u16),
        4 => sink.write_u32::<LittleEndian>(value),
        other => return Err(WavError::UnsupportedSampleWidth { bytes: other }),
    };
    written.map_err(WavError::SinkWrite)
}

/// Reinterprets an unsigned read of `width` bytes as a two's complement value.
pub fn sign_extend(raw: u32, width: usize) -> i64 {
    match width {
        1 => raw as u8 as i8 as i64,
        2 => raw as u16 as i16 as i64,
        _ => raw as i32 as i64,
    }
}

/// Reads a little-endian `u16` header field.
pub(crate) fn read_u16_field<R: Read>(reader: &mut R, field: &str) -> WavResult<u16> {
    reader
        .read_u16::<LittleEndian>()
        .map_err(|e| WavError::from_read(e, format!("header field {field}")))
}

/// Reads a little-endian `u32` header field.
pub(crate) fn read_u32_field<R: Read>(reader: &mut R, field: &str) -> WavResult<u32> {
    reader
        .read_u32::<LittleEndian>()
        .map_err(|e| WavError::from_read(e, format!("header field {field}")))
}

/// Reads a raw four-byte tag.
pub(crate) fn read_tag<R: Read>(reader: &mut R, field: &str) -> WavResult<[u8; 4]> {
    let mut tag = [0u8; 4];
    reader
        .read_exact(&mut tag)
        .map_err(|e| WavError::from_read(e, format!("header field {field}")))?;
    Ok(tag)
}
