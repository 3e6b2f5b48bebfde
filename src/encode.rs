use std::io::Write;
use std::path::Path;

use enough::Stop;

use crate::bmp::{self, SizeFields};
use crate::error::BmpError;
use crate::fs;
use crate::image::Bitmap;

/// Encode configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    size_fields: SizeFields,
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose whether the file and image size header fields are echoed or
    /// recomputed. Defaults to [`SizeFields::Preserve`].
    pub fn with_size_fields(mut self, size_fields: SizeFields) -> Self {
        self.size_fields = size_fields;
        self
    }

    /// Encode to a writer. Returns the number of bytes written.
    ///
    /// On error the writer may hold a partial image; use
    /// [`encode_to_vec`](Self::encode_to_vec) or
    /// [`encode_file`](Self::encode_file) when that matters.
    pub fn encode<W: Write>(
        &self,
        image: &Bitmap,
        mut out: W,
        stop: impl Stop,
    ) -> Result<u64, BmpError> {
        self.encode_dyn(image, &mut out, &stop)
    }

    /// Encode into a new buffer.
    pub fn encode_to_vec(&self, image: &Bitmap, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
        let capacity =
            bmp::encoded_len(image.info_block()).ok_or(BmpError::DimensionsTooLarge {
                width: image.width(),
                height: image.height(),
            })?;
        let mut out = Vec::with_capacity(capacity);
        self.encode(image, &mut out, stop)?;
        Ok(out)
    }

    /// Encode to `path`, replacing it atomically.
    ///
    /// The image is written to a temporary file next to `path` and renamed
    /// over it only after every byte has been flushed. On failure `path` is
    /// left untouched and the temporary file is removed.
    pub fn encode_file(
        &self,
        image: &Bitmap,
        path: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<(), BmpError> {
        fs::write_atomic(path.as_ref(), |out| self.encode_dyn(image, out, &stop).map(|_| ()))
    }

    fn encode_dyn(
        &self,
        image: &Bitmap,
        out: &mut dyn Write,
        stop: &dyn Stop,
    ) -> Result<u64, BmpError> {
        bmp::encode_bmp(
            image.file_header(),
            image.info_block(),
            image.pixels(),
            self.size_fields,
            out,
            stop,
        )
    }
}
