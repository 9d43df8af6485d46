#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary bytes must never panic; neither may scrubbing a
    // successfully parsed in-memory image.
    if let Ok(mut bmp) = bmpscrub::parse_bytes(data.to_vec()) {
        let _ = bmp.row_padding_bytes();
        let _ = bmp.anonymize_metadata();
        let _ = bmp.anonymize_padding();
    }
});
