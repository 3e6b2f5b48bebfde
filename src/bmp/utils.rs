//! Row geometry and read helpers shared by the BMP decoder and encoder.

use std::io::{self, Read};

use crate::error::BmpError;

/// Bytes occupied by one 24-bit row on disk, rounded up to a 4-byte boundary.
///
/// Returns `None` only if the computation overflows `usize`.
pub fn row_stride(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

/// Zero bytes appended after each row of `width` pixels.
pub(crate) fn row_padding(width: u32) -> Option<usize> {
    row_stride(width).map(|stride| stride - width as usize * 3)
}

/// `read_exact`, with end-of-input mapped to `on_eof` and any other failure to `IoRead`.
pub(crate) fn read_exact_or<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    on_eof: BmpError,
) -> Result<(), BmpError> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(on_eof),
        Err(e) => Err(BmpError::IoRead(e)),
    }
}
