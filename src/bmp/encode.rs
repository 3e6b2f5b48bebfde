//! BMP-24 encoder: header normalization and bottom-up padded rows.

use std::io::Write;

use enough::Stop;
use log::{trace, warn};

use super::header::{FileHeader, INFO_BLOCK_LEN, InfoBlock, PIXEL_DATA_OFFSET};
use super::utils::row_stride;
use crate::error::BmpError;
use crate::pixel::PixelGrid;

/// What to write into the `size_of_file` and `size_of_image` header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeFields {
    /// Echo the values carried by the headers, so an unmodified image
    /// round-trips byte for byte.
    #[default]
    Preserve,

    /// Write the sizes of the stream actually produced.
    Recompute,
}

/// Headers as they will be written.
///
/// The pixel offset and info block size always describe the layout this
/// encoder emits (54 and 40); the size fields follow `size_fields`.
pub(crate) fn output_headers(
    file: &FileHeader,
    info: &InfoBlock,
    size_fields: SizeFields,
) -> Result<(FileHeader, InfoBlock), BmpError> {
    let (width, height) = (info.width, info.height);
    let mut file = *file;
    let mut info = *info;

    if file.offset_to_pixel_data != PIXEL_DATA_OFFSET {
        warn!(
            "rewriting BMP pixel data offset {} as {PIXEL_DATA_OFFSET}",
            file.offset_to_pixel_data
        );
        file.offset_to_pixel_data = PIXEL_DATA_OFFSET;
    }
    if info.size_of_info_block as usize != INFO_BLOCK_LEN {
        warn!(
            "rewriting BMP info block size {} as {INFO_BLOCK_LEN}",
            info.size_of_info_block
        );
        info.size_of_info_block = INFO_BLOCK_LEN as u32;
    }

    if size_fields == SizeFields::Recompute {
        let image = row_stride(width)
            .and_then(|stride| stride.checked_mul(height as usize))
            .and_then(|len| u32::try_from(len).ok())
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        let total = image
            .checked_add(PIXEL_DATA_OFFSET)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        file.size_of_file = total;
        info.size_of_image = image;
    }

    Ok((file, info))
}

/// Encode headers and pixels to `out`. Returns the number of bytes written.
pub(crate) fn encode_bmp<W: Write + ?Sized>(
    file: &FileHeader,
    info: &InfoBlock,
    pixels: &PixelGrid,
    size_fields: SizeFields,
    out: &mut W,
    stop: &dyn Stop,
) -> Result<u64, BmpError> {
    check_parts(file, info, pixels)?;

    let (width, height) = (info.width, info.height);
    let stride = row_stride(width).ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let (file, info) = output_headers(file, info, size_fields)?;

    stop.check()?;

    out.write_all(&file.to_bytes()).map_err(BmpError::IoWrite)?;
    out.write_all(&info.to_bytes()).map_err(BmpError::IoWrite)?;

    // Padding bytes past `width * 3` stay zero for every row.
    let mut row_buf = vec![0u8; stride];
    let h = pixels.height();
    for row in (0..h).rev() {
        if row % 16 == 0 {
            stop.check()?;
        }
        for (dst, color) in row_buf.chunks_exact_mut(3).zip(pixels.row(row)) {
            dst.copy_from_slice(&color.to_bgr());
        }
        out.write_all(&row_buf).map_err(BmpError::IoWrite)?;
    }

    let written = u64::from(PIXEL_DATA_OFFSET) + (stride as u64) * (h as u64);
    trace!("encoded {h} rows, {written} bytes");
    Ok(written)
}

/// Size in bytes of the stream `encode_bmp` produces for these headers.
pub(crate) fn encoded_len(info: &InfoBlock) -> Option<usize> {
    row_stride(info.width)
        .and_then(|stride| stride.checked_mul(info.height as usize))
        .and_then(|len| len.checked_add(PIXEL_DATA_OFFSET as usize))
}

fn check_parts(file: &FileHeader, info: &InfoBlock, pixels: &PixelGrid) -> Result<(), BmpError> {
    if !file.has_bmp_magic() {
        return Err(BmpError::InvalidState(
            "file header does not carry the BM magic".into(),
        ));
    }
    if info.color_depth_in_bits != 24 {
        return Err(BmpError::InvalidState(format!(
            "cannot encode {}-bit headers, only 24-bit",
            info.color_depth_in_bits
        )));
    }
    if info.type_of_compression != 0 {
        return Err(BmpError::InvalidState(format!(
            "cannot encode compression type {}",
            info.type_of_compression
        )));
    }
    if pixels.width() != info.width as usize || pixels.height() != info.height as usize {
        return Err(BmpError::InvalidState(format!(
            "pixel grid is {}x{} but headers say {}x{}",
            pixels.width(),
            pixels.height(),
            info.width,
            info.height
        )));
    }
    Ok(())
}
