//! # bmp24
//!
//! Byte-exact decoder, editor and encoder for uncompressed 24-bit BMP images.
//!
//! Decoding turns the bottom-up, 4-byte-padded rows of a BMP into a top-down
//! [`PixelGrid`] of packed [`Color`]s. Encoding reverses the transform. An
//! unmodified image round-trips byte for byte.
//!
//! ## Supported input
//!
//! - `BITMAPINFOHEADER` files with 24 bits per pixel and no compression
//! - Extra bytes between the headers and the pixel array (the declared pixel
//!   offset is always honored)
//!
//! ## Non-Goals
//!
//! - Palettes, 1/4/8/16/32-bit depths, RLE and bitfield compression
//! - Any format other than BMP
//!
//! ## Usage
//!
//! ```no_run
//! use bmp24::{Color, Unstoppable};
//!
//! let mut image = bmp24::decode_file("input.bmp", Unstoppable)?;
//! print!("{}", image.preview());
//!
//! image.draw_cross(Color::from_bgr(0, 165, 255));
//! bmp24::encode_file(&image, "output.bmp", Unstoppable)?;
//! # Ok::<(), bmp24::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod fs;
mod image;
mod info;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod encode;

use std::io::{Read, Seek, Write};
use std::path::Path;

// Re-exports
pub use bmp::{SizeFields, Strictness};
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BmpError;
pub use image::Bitmap;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{Color, PixelGrid};

/// Decode a BMP from a seekable source with default settings.
pub fn decode<R: Read + Seek>(reader: R, stop: impl Stop) -> Result<Bitmap, BmpError> {
    DecodeRequest::new().decode(reader, stop)
}

/// Decode an in-memory BMP with default settings.
pub fn decode_bytes(data: &[u8], stop: impl Stop) -> Result<Bitmap, BmpError> {
    DecodeRequest::new().decode_bytes(data, stop)
}

/// Open and decode a BMP file with default settings.
pub fn decode_file(path: impl AsRef<Path>, stop: impl Stop) -> Result<Bitmap, BmpError> {
    DecodeRequest::new().decode_file(path, stop)
}

/// Encode to a writer with default settings. Returns the number of bytes written.
pub fn encode<W: Write>(image: &Bitmap, out: W, stop: impl Stop) -> Result<u64, BmpError> {
    EncodeRequest::new().encode(image, out, stop)
}

/// Encode into a new buffer with default settings.
pub fn encode_to_vec(image: &Bitmap, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    EncodeRequest::new().encode_to_vec(image, stop)
}

/// Encode to a file with default settings, replacing it atomically.
pub fn encode_file(
    image: &Bitmap,
    path: impl AsRef<Path>,
    stop: impl Stop,
) -> Result<(), BmpError> {
    EncodeRequest::new().encode_file(image, path, stop)
}
