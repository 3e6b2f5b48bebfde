//! Uncompressed 24-bit BMP codec.
//!
//! Most callers want [`crate::decode_bytes`] and [`crate::encode_to_vec`]. This module
//! exposes the header records, row geometry, and a parts-level encoder for
//! callers that assemble headers and pixels themselves.

mod decode;
mod encode;
mod header;
mod utils;

pub use decode::Strictness;
pub use encode::SizeFields;
pub use header::{
    BMP_MAGIC, FILE_HEADER_LEN, FileHeader, INFO_BLOCK_LEN, InfoBlock, PIXEL_DATA_OFFSET,
};
pub use utils::row_stride;

pub(crate) use decode::{check_strict, decode_pixels, read_headers};
pub(crate) use encode::{encode_bmp, encoded_len, output_headers};

use std::io::Write;

use enough::Stop;

use crate::error::BmpError;
use crate::pixel::PixelGrid;

/// Encode separately held headers and pixels.
///
/// Fails with [`BmpError::InvalidState`] when the grid does not match the
/// header dimensions or the headers do not describe uncompressed 24-bit data.
pub fn encode_parts<W: Write>(
    file: &FileHeader,
    info: &InfoBlock,
    pixels: &PixelGrid,
    size_fields: SizeFields,
    mut out: W,
    stop: impl Stop,
) -> Result<u64, BmpError> {
    encode_bmp(file, info, pixels, size_fields, &mut out, &stop)
}
