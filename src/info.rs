use std::io::Read;

use crate::bmp;
use crate::error::BmpError;

/// Header-level facts about a BMP, available without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Bytes per on-disk row, including padding.
    pub stride: usize,
    /// Declared offset of the pixel array from the start of the file.
    pub pixel_data_offset: u32,
}

impl ImageInfo {
    /// Probe headers from a byte slice.
    pub fn from_bytes(mut data: &[u8]) -> Result<Self, BmpError> {
        Self::from_reader(&mut data)
    }

    /// Read and validate both headers, leaving the reader just past them.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, BmpError> {
        let (file, info) = bmp::read_headers(&mut reader)?;
        let stride = bmp::row_stride(info.width).ok_or(BmpError::DimensionsTooLarge {
            width: info.width,
            height: info.height,
        })?;
        Ok(Self {
            width: info.width,
            height: info.height,
            stride,
            pixel_data_offset: file.offset_to_pixel_data,
        })
    }

    /// Size of the pixel array (`stride * height`) on disk.
    pub fn pixel_data_len(&self) -> Option<usize> {
        self.stride.checked_mul(self.height as usize)
    }
}
