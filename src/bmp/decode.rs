//! BMP-24 decoder: headers, validation, and bottom-up row reading.

use std::io::{Read, Seek, SeekFrom};

use enough::Stop;
use log::{debug, trace, warn};

use super::header::{FILE_HEADER_LEN, FileHeader, INFO_BLOCK_LEN, InfoBlock, PIXEL_DATA_OFFSET};
use super::utils::{read_exact_or, row_padding, row_stride};
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::{Color, PixelGrid};

// ── Strictness ──────────────────────────────────────────────────────

/// Controls how strictly the decoder validates header fields that do not
/// affect pixel decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Validate only what decoding depends on: magic, depth, compression,
    /// and a pixel offset that lies past the headers.
    #[default]
    Standard,

    /// Also reject planes != 1, an info block smaller than 40 bytes, and a
    /// nonzero image size field that disagrees with `stride * height`.
    Strict,
}

// ── Headers ─────────────────────────────────────────────────────────

/// Read and validate both fixed headers from the current position.
pub(crate) fn read_headers<R: Read + ?Sized>(
    reader: &mut R,
) -> Result<(FileHeader, InfoBlock), BmpError> {
    let mut raw = [0u8; FILE_HEADER_LEN];
    read_exact_or(
        reader,
        &mut raw,
        BmpError::MalformedHeader("file header shorter than 14 bytes"),
    )?;
    let file = FileHeader::parse(&raw);
    if !file.has_bmp_magic() {
        return Err(BmpError::NotABmpFile);
    }

    let mut raw = [0u8; INFO_BLOCK_LEN];
    read_exact_or(
        reader,
        &mut raw,
        BmpError::MalformedHeader("info block shorter than 40 bytes"),
    )?;
    let info = InfoBlock::parse(&raw);

    if info.color_depth_in_bits != 24 {
        return Err(BmpError::UnsupportedColorDepth(info.color_depth_in_bits));
    }
    if info.type_of_compression != 0 {
        return Err(BmpError::UnsupportedCompression(info.type_of_compression));
    }
    if file.offset_to_pixel_data < PIXEL_DATA_OFFSET {
        return Err(BmpError::MalformedHeader(
            "pixel data offset points inside the headers",
        ));
    }

    debug!(
        "BMP {}x{}, pixel data at {}, info block {} bytes",
        info.width, info.height, file.offset_to_pixel_data, info.size_of_info_block
    );
    Ok((file, info))
}

pub(crate) fn check_strict(info: &InfoBlock) -> Result<(), BmpError> {
    if info.count_of_planes != 1 {
        return Err(BmpError::InvalidHeader(format!(
            "BMP planes field is {}, expected 1",
            info.count_of_planes
        )));
    }
    if (info.size_of_info_block as usize) < INFO_BLOCK_LEN {
        return Err(BmpError::InvalidHeader(format!(
            "BMP info block size is {}, expected at least {INFO_BLOCK_LEN}",
            info.size_of_info_block
        )));
    }
    if info.size_of_image != 0 {
        let expected = pixel_section_len(info)?;
        if info.size_of_image as usize != expected {
            return Err(BmpError::InvalidHeader(format!(
                "BMP image data size field ({}) doesn't match expected ({expected})",
                info.size_of_image
            )));
        }
    }
    Ok(())
}

/// `stride * height` with overflow mapped to `DimensionsTooLarge`.
pub(crate) fn pixel_section_len(info: &InfoBlock) -> Result<usize, BmpError> {
    let (width, height) = (info.width, info.height);
    row_stride(width)
        .and_then(|stride| stride.checked_mul(height as usize))
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}

// ── Pixels ──────────────────────────────────────────────────────────

/// Decode the pixel array described by `file`/`info` into a top-down grid.
///
/// The reader may be anywhere; the declared pixel offset is sought
/// absolutely.
pub(crate) fn decode_pixels<R: Read + Seek + ?Sized>(
    reader: &mut R,
    file: &FileHeader,
    info: &InfoBlock,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, BmpError> {
    let (width, height) = (info.width, info.height);
    let too_large = BmpError::DimensionsTooLarge { width, height };
    let w = width as usize;
    let h = height as usize;

    let cell_count = w.checked_mul(h).ok_or(too_large)?;
    if let Some(limits) = limits {
        limits.check_grid(width, height)?;
    }

    let row_bytes = w * 3;
    let padding = row_padding(width).ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let offset = u64::from(file.offset_to_pixel_data);

    // Fail before allocating when the source is too short to hold every row.
    // Padding after the final row is optional.
    let stream_len = reader.seek(SeekFrom::End(0)).map_err(BmpError::IoRead)?;
    if h > 0 {
        let needed = pixel_section_len(info)? - padding;
        if offset.saturating_add(needed as u64) > stream_len {
            debug!("BMP needs {needed} pixel bytes at {offset}, stream is {stream_len} bytes");
            return Err(BmpError::TruncatedPixelData);
        }
    }

    warn_on_size_fields(file, info, stream_len);
    if offset > u64::from(PIXEL_DATA_OFFSET) {
        warn!(
            "BMP pixel data offset {offset} skips {} bytes after the info block",
            offset - u64::from(PIXEL_DATA_OFFSET)
        );
    }
    reader.seek(SeekFrom::Start(offset)).map_err(BmpError::IoRead)?;

    stop.check()?;

    // Zero-width rows carry no bytes, not even padding.
    if row_bytes == 0 {
        trace!("decoded {h} empty rows");
        return Ok(PixelGrid::from_cells(0, h, Vec::new()));
    }

    let mut cells = vec![Color::BLACK; cell_count];
    let mut row_buf = vec![0u8; row_bytes];
    let mut pad_buf = [0u8; 3];

    for disk_row in 0..h {
        if disk_row % 16 == 0 {
            stop.check()?;
        }
        read_exact_or(reader, &mut row_buf, BmpError::TruncatedPixelData)?;

        let grid_row = h - 1 - disk_row;
        let dst = &mut cells[grid_row * w..(grid_row + 1) * w];
        for (cell, bgr) in dst.iter_mut().zip(row_buf.chunks_exact(3)) {
            *cell = Color::from_bgr(bgr[0], bgr[1], bgr[2]);
        }

        if disk_row + 1 < h {
            read_exact_or(reader, &mut pad_buf[..padding], BmpError::TruncatedPixelData)?;
        }
    }

    trace!("decoded {h} rows of {w} pixels");
    Ok(PixelGrid::from_cells(w, h, cells))
}

/// Nonzero size fields that disagree with the layout are kept as-is but logged.
fn warn_on_size_fields(file: &FileHeader, info: &InfoBlock, stream_len: u64) {
    if let Ok(expected) = pixel_section_len(info) {
        if info.size_of_image != 0 && info.size_of_image as usize != expected {
            warn!(
                "BMP image size field is {}, rows need {expected} bytes",
                info.size_of_image
            );
        }
    }
    if file.size_of_file != 0 && u64::from(file.size_of_file) != stream_len {
        warn!(
            "BMP file size field is {}, stream is {stream_len} bytes",
            file.size_of_file
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};
    use std::time::{Duration, Instant};

    use enough::Unstoppable;

    use super::*;

    /// 54-byte header for a 24-bit image, followed by `pixels` verbatim.
    fn bmp_bytes(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(54 + pixels.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&54u32.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 16]);
        out.extend_from_slice(pixels);
        out
    }

    fn decode(data: &[u8]) -> Result<PixelGrid, BmpError> {
        let mut cur = Cursor::new(data);
        let (file, info) = read_headers(&mut cur)?;
        decode_pixels(&mut cur, &file, &info, None, &Unstoppable)
    }

    #[test]
    fn bottom_disk_row_becomes_last_grid_row() {
        // 2x2: disk row 0 (bottom) is blue, disk row 1 (top) is red.
        #[rustfmt::skip]
        let pixels = [
            0xFF, 0, 0,  0xFF, 0, 0,  0, 0,
            0, 0, 0xFF,  0, 0, 0xFF,  0, 0,
        ];
        let grid = decode(&bmp_bytes(2, 2, &pixels)).unwrap();
        assert_eq!(grid.row(0), &[Color::from_u32(0x0000FF); 2]);
        assert_eq!(grid.row(1), &[Color::from_u32(0xFF0000); 2]);
    }

    #[test]
    fn last_row_padding_is_optional() {
        // 1x2: the top row's padding byte is missing.
        let pixels = [1, 2, 3, 0, 4, 5, 6];
        let grid = decode(&bmp_bytes(1, 2, &pixels)).unwrap();
        assert_eq!(grid[(0, 0)], Color::from_bgr(4, 5, 6));
        assert_eq!(grid[(1, 0)], Color::from_bgr(1, 2, 3));
    }

    #[test]
    fn missing_pixel_bytes_fail_before_allocation() {
        // Claims 1000x1000 with only one row present.
        let data = bmp_bytes(1000, 1000, &[0u8; 3000]);
        assert!(matches!(decode(&data), Err(BmpError::TruncatedPixelData)));
    }

    #[test]
    fn zero_width_with_huge_height_returns_immediately() {
        let data = bmp_bytes(0, u32::MAX, &[]);
        let start = Instant::now();
        let grid = decode(&data).unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!((grid.width(), grid.height()), (0, u32::MAX as usize));
        assert!(grid.is_empty());
    }

    /// Reports `extra` more bytes at the end than the inner cursor holds.
    struct OverstatedLen {
        inner: Cursor<Vec<u8>>,
        extra: u64,
    }

    impl Read for OverstatedLen {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Seek for OverstatedLen {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            match pos {
                SeekFrom::End(0) => Ok(self.inner.get_ref().len() as u64 + self.extra),
                other => self.inner.seek(other),
            }
        }
    }

    #[test]
    fn short_read_mid_rows_is_truncated() {
        // 2x3 needs 22 bytes; only the first row and its padding are present.
        let data = bmp_bytes(2, 3, &[7u8; 8]);
        let mut src = OverstatedLen {
            inner: Cursor::new(data),
            extra: 64,
        };
        let (file, info) = read_headers(&mut src).unwrap();
        let result = decode_pixels(&mut src, &file, &info, None, &Unstoppable);
        assert!(matches!(result, Err(BmpError::TruncatedPixelData)));
    }

    #[test]
    fn mismatched_size_fields_still_decode() {
        let mut data = bmp_bytes(1, 1, &[1, 2, 3, 0]);
        data[2..6].copy_from_slice(&999u32.to_le_bytes());
        data[34..38].copy_from_slice(&77u32.to_le_bytes());
        let grid = decode(&data).unwrap();
        assert_eq!(grid[(0, 0)], Color::from_bgr(1, 2, 3));
    }

    #[test]
    fn offset_inside_headers_is_malformed() {
        let mut data = bmp_bytes(1, 1, &[0, 0, 0, 0]);
        data[10..14].copy_from_slice(&40u32.to_le_bytes());
        assert!(matches!(decode(&data), Err(BmpError::MalformedHeader(_))));
    }

    #[test]
    fn strict_rejects_planes_and_image_size() {
        let data = bmp_bytes(1, 1, &[0, 0, 0, 0]);
        let (_, mut info) = read_headers(&mut Cursor::new(&data[..])).unwrap();
        assert!(check_strict(&info).is_ok());

        info.count_of_planes = 3;
        assert!(matches!(check_strict(&info), Err(BmpError::InvalidHeader(_))));

        info.count_of_planes = 1;
        info.size_of_image = 5;
        assert!(matches!(check_strict(&info), Err(BmpError::InvalidHeader(_))));

        info.size_of_image = 0;
        info.size_of_info_block = 12;
        assert!(matches!(check_strict(&info), Err(BmpError::InvalidHeader(_))));
    }

    #[test]
    fn limits_checked_before_reading_pixels() {
        let data = bmp_bytes(4, 4, &[0u8; 48]);
        let mut cur = Cursor::new(&data[..]);
        let (file, info) = read_headers(&mut cur).unwrap();
        let limits = Limits {
            max_memory_bytes: Some(16),
            ..Default::default()
        };
        let result = decode_pixels(&mut cur, &file, &info, Some(&limits), &Unstoppable);
        assert!(matches!(result, Err(BmpError::LimitExceeded(_))));
    }
}
