#![no_main]
use libfuzzer_sys::fuzz_target;
use bmp24::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode, and decode again to the same image.
    let limits = Limits {
        max_width: Some(1 << 14),
        max_height: Some(1 << 14),
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new()
        .with_limits(&limits)
        .decode_bytes(data, enough::Unstoppable)
    else {
        return;
    };

    let reencoded = encode_to_vec(&decoded, enough::Unstoppable)
        .expect("decoded image failed to encode");
    let Ok(decoded2) = decode_bytes(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());

    // A second encode is byte-stable.
    let again = encode_to_vec(&decoded2, enough::Unstoppable).unwrap();
    assert_eq!(reencoded, again);
});
