#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp24(width: u32, height: u32, offset: u32) -> Vec<u8> {
    let stride = ((width * 3 + 3) & !3) as usize;
    let pixels = stride * height as usize;
    let mut bmp = vec![0u8; offset as usize + pixels];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(bmp.len() as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info block size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[34..38].copy_from_slice(&(pixels as u32).to_le_bytes()); // image size
    for (i, b) in bmp[offset as usize..].iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp24(1, 1, 54)).unwrap();
    fs::write(format!("{dir}/bmp_5x3.bmp"), bmp24(5, 3, 54)).unwrap();
    fs::write(format!("{dir}/bmp_16x9.bmp"), bmp24(16, 9, 54)).unwrap();
    fs::write(format!("{dir}/bmp_extra_chunk.bmp"), bmp24(3, 2, 70)).unwrap();
    fs::write(format!("{dir}/bmp_0x4.bmp"), bmp24(0, 4, 54)).unwrap();

    // Truncated/malformed seeds for edge coverage
    let mut truncated = bmp24(4, 4, 54);
    truncated.truncate(60);
    fs::write(format!("{dir}/bmp_truncated.bmp"), truncated).unwrap();
    let mut rle = bmp24(2, 2, 54);
    rle[30] = 1;
    fs::write(format!("{dir}/bmp_rle8.bmp"), rle).unwrap();
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}
