#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must produce an image or an error, never a panic.
    let _ = bmp24::decode_bytes(data, enough::Unstoppable);
    let _ = bmp24::ImageInfo::from_bytes(data);
    let _ = bmp24::DecodeRequest::new()
        .with_strictness(bmp24::Strictness::Strict)
        .decode_bytes(data, enough::Unstoppable);
});
