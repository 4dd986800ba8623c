#![no_main]

use libfuzzer_sys::fuzz_target;
use wavtone::{transform_bytes, TransformConfig, WaveHeader};

fuzz_target!(|data: &[u8]| {
    let mut reader = data;
    if let Ok(header) = WaveHeader::decode(&mut reader) {
        // Canonical tags aside, a decoded header re-encodes to its input.
        let encoded = header.to_bytes();
        if header.validate_tags().is_ok() {
            assert_eq!(&encoded[..], &data[..encoded.len()]);
        }
    }

    let _ = transform_bytes(data, TransformConfig::default());
    let _ = transform_bytes(data, TransformConfig::legacy());
});
