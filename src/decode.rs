use std::io::{Read, Seek};
use std::path::Path;

use enough::Stop;

use crate::bmp::{self, Strictness};
use crate::error::BmpError;
use crate::fs;
use crate::image::Bitmap;
use crate::limits::Limits;

/// Decode configuration.
///
/// ```no_run
/// use bmp24::{DecodeRequest, Limits, Strictness, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let image = DecodeRequest::new()
///     .with_limits(&limits)
///     .with_strictness(Strictness::Strict)
///     .decode_file("input.bmp", Unstoppable)?;
/// println!("{}x{}", image.width(), image.height());
/// # Ok::<(), bmp24::BmpError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
    strictness: Strictness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Decode from a source positioned at the start of the BMP.
    pub fn decode<R: Read + Seek>(
        &self,
        mut reader: R,
        stop: impl Stop,
    ) -> Result<Bitmap, BmpError> {
        let (file, info) = bmp::read_headers(&mut reader)?;
        if self.strictness == Strictness::Strict {
            bmp::check_strict(&info)?;
        }
        stop.check()?;
        let pixels = bmp::decode_pixels(&mut reader, &file, &info, self.limits, &stop)?;
        Ok(Bitmap::from_parts(file, info, pixels))
    }

    /// Decode an in-memory BMP.
    pub fn decode_bytes(&self, data: &[u8], stop: impl Stop) -> Result<Bitmap, BmpError> {
        self.decode(std::io::Cursor::new(data), stop)
    }

    /// Open and decode a file. The handle is closed before returning.
    pub fn decode_file(
        &self,
        path: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<Bitmap, BmpError> {
        let reader = fs::open_source(path.as_ref())?;
        self.decode(reader, stop)
    }
}
