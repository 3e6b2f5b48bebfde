use crate::error::BmpError;
use crate::pixel::Color;

/// Caps on what a decode may allocate, checked once the headers are read.
///
/// Every field defaults to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum `width * height`.
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded grid, `width * height * size_of::<Color>()`.
    /// Header and row buffers are not counted.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check the declared dimensions and the grid allocation they imply.
    pub(crate) fn check_grid(&self, width: u32, height: u32) -> Result<(), BmpError> {
        let pixels = u64::from(width) * u64::from(height);
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds("pixel count", pixels, self.max_pixels)?;
        let bytes = pixels.saturating_mul(size_of::<Color>() as u64);
        exceeds("grid allocation bytes", bytes, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), BmpError> {
    match limit {
        Some(max) if value > max => Err(BmpError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
