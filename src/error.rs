use std::io;
use std::path::PathBuf;

use enough::StopReason;

/// Errors from BMP decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("cannot open {}: {source}", path.display())]
    IoOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not a BMP file (bad magic bytes)")]
    NotABmpFile,

    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported color depth: {0} bits per pixel (only 24 is supported)")]
    UnsupportedColorDepth(u16),

    #[error("unsupported compression type {0} (only uncompressed is supported)")]
    UnsupportedCompression(u32),

    #[error("pixel data is truncated")]
    TruncatedPixelData,

    #[error("read failed: {0}")]
    IoRead(#[source] io::Error),

    #[error("write failed: {0}")]
    IoWrite(#[source] io::Error),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
