use bmp24::*;

/// Build a 24-bit BMP by hand. `disk_rows` are bottom-up, unpadded BGR bytes.
fn raw_bmp(width: u32, height: u32, disk_rows: &[Vec<u8>]) -> Vec<u8> {
    let stride = bmp::row_stride(width).unwrap();
    let image_size = (stride * height as usize) as u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(54 + image_size).to_le_bytes());
    out.extend_from_slice(&0x1234u16.to_le_bytes());
    out.extend_from_slice(&0x5678u16.to_le_bytes());
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&3780i32.to_le_bytes());
    out.extend_from_slice(&(-3780i32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for row in disk_rows {
        assert_eq!(row.len(), width as usize * 3);
        out.extend_from_slice(row);
        out.resize(out.len() + stride - row.len(), 0);
    }
    out
}

fn gradient_rows(width: u32, height: u32) -> Vec<Vec<u8>> {
    (0..height)
        .map(|y| {
            (0..width)
                .flat_map(|x| [(x * 13) as u8, (y * 29) as u8, (x + y) as u8 ^ 0x5A])
                .collect()
        })
        .collect()
}

#[test]
fn unmodified_image_roundtrips_byte_for_byte() {
    for width in 1..=9 {
        for height in [1, 2, 5] {
            let original = raw_bmp(width, height, &gradient_rows(width, height));
            let image = decode_bytes(&original, Unstoppable).unwrap();
            let encoded = encode_to_vec(&image, Unstoppable).unwrap();
            assert_eq!(encoded, original, "{width}x{height}");
        }
    }
}

#[test]
fn decoded_grid_is_top_down() {
    let blue_bottom = vec![0xFF, 0x00, 0x00, 0xFF, 0x00, 0x00];
    let red_top = vec![0x00, 0x00, 0xFF, 0x00, 0x00, 0xFF];
    let data = raw_bmp(2, 2, &[blue_bottom, red_top]);

    let image = decode_bytes(&data, Unstoppable).unwrap();
    let red = Color::from_bgr(0x00, 0x00, 0xFF);
    let blue = Color::from_bgr(0xFF, 0x00, 0x00);
    assert_eq!(image.pixels().row(0), &[red, red]);
    assert_eq!(image.pixels().row(1), &[blue, blue]);
}

#[test]
fn every_row_is_padded_to_stride() {
    for (width, stride) in [(1u32, 4usize), (2, 8), (3, 12), (4, 12), (5, 16)] {
        assert_eq!(bmp::row_stride(width), Some(stride));
        assert_eq!(stride, ((3 * width as usize + 3) / 4) * 4);

        let image = Bitmap::new(width, 3, Color::WHITE).unwrap();
        let encoded = encode_to_vec(&image, Unstoppable).unwrap();
        let pixel_bytes = &encoded[54..];
        assert_eq!(pixel_bytes.len(), stride * 3);
        for row in pixel_bytes.chunks_exact(stride) {
            assert!(row[..width as usize * 3].iter().all(|&b| b == 0xFF));
            assert!(row[width as usize * 3..].iter().all(|&b| b == 0));
        }
    }
}

#[test]
fn wrong_magic_is_rejected() {
    let mut data = raw_bmp(1, 1, &gradient_rows(1, 1));
    data[0..2].copy_from_slice(b"PM");
    assert!(matches!(
        decode_bytes(&data, Unstoppable),
        Err(BmpError::NotABmpFile)
    ));
}

#[test]
fn sixteen_bit_depth_is_rejected() {
    let mut data = raw_bmp(1, 1, &gradient_rows(1, 1));
    data[28..30].copy_from_slice(&16u16.to_le_bytes());
    assert!(matches!(
        decode_bytes(&data, Unstoppable),
        Err(BmpError::UnsupportedColorDepth(16))
    ));
}

#[test]
fn compression_is_rejected() {
    let mut data = raw_bmp(1, 1, &gradient_rows(1, 1));
    data[30..34].copy_from_slice(&1u32.to_le_bytes());
    assert!(matches!(
        decode_bytes(&data, Unstoppable),
        Err(BmpError::UnsupportedCompression(1))
    ));
}

#[test]
fn truncated_pixel_data_is_rejected() {
    let data = raw_bmp(4, 4, &gradient_rows(4, 4));
    let cut = &data[..data.len() - 20];
    assert!(matches!(
        decode_bytes(cut, Unstoppable),
        Err(BmpError::TruncatedPixelData)
    ));
}

#[test]
fn short_headers_are_malformed() {
    let data = raw_bmp(1, 1, &gradient_rows(1, 1));
    for len in [0, 2, 13, 14, 30, 53] {
        // Length is checked before the magic, so even "B" alone is malformed.
        assert!(
            matches!(
                decode_bytes(&data[..len], Unstoppable),
                Err(BmpError::MalformedHeader(_))
            ),
            "length {len}"
        );
    }
    let mut wrong = data[..1].to_vec();
    wrong[0] = b'X';
    assert!(matches!(
        decode_bytes(&wrong, Unstoppable),
        Err(BmpError::MalformedHeader(_))
    ));
}

#[test]
fn edited_pixel_survives_roundtrip() {
    let original = raw_bmp(7, 5, &gradient_rows(7, 5));
    let before = decode_bytes(&original, Unstoppable).unwrap();

    let orange = Color::from_u32(0x00A5FF);
    let mut edited = before.clone();
    edited[(3, 2)] = orange;

    let encoded = encode_to_vec(&edited, Unstoppable).unwrap();
    let after = decode_bytes(&encoded, Unstoppable).unwrap();
    for row in 0..5 {
        for col in 0..7 {
            let expected = if (row, col) == (3, 2) {
                orange
            } else {
                before[(row, col)]
            };
            assert_eq!(after[(row, col)], expected, "({row}, {col})");
        }
    }
}

#[test]
fn decode_encode_decode_is_idempotent() {
    let original = raw_bmp(16, 9, &gradient_rows(16, 9));
    let first = decode_bytes(&original, Unstoppable).unwrap();
    let encoded = encode_to_vec(&first, Unstoppable).unwrap();
    let second = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(first.pixels(), second.pixels());
    assert_eq!(first.file_header(), second.file_header());
    assert_eq!(first.info_block(), second.info_block());
}

#[test]
fn empty_dimensions_decode_to_empty_grid() {
    for (w, h) in [(0u32, 0u32), (0, 3), (3, 0)] {
        let rows = vec![Vec::new(); h as usize];
        let data = raw_bmp(w, h, &rows);
        let image = decode_bytes(&data, Unstoppable).unwrap();
        assert!(image.pixels().is_empty());
        assert_eq!((image.width(), image.height()), (w, h));
        assert_eq!(encode_to_vec(&image, Unstoppable).unwrap(), data);
    }
}
