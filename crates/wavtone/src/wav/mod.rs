//! Canonical PCM WAVE codec.
//!
//! Only the fixed 44-byte `RIFF`/`fmt `/`data` layout is understood; any other
//! chunk arrangement is read as if it were that layout.

mod byte_order;
mod header;


// Re-export public API
pub use byte_order::{read_le, sign_extend, write_le};
pub use header::{
    WaveHeader, DATA_TAG, FMT_TAG, FORMAT_ALAW, FORMAT_IEEE_FLOAT, FORMAT_MULAW, FORMAT_PCM,
    HEADER_SIZE, PCM_FORMAT_CHUNK_SIZE, RIFF_TAG, WAVE_TAG,
};
