use core::fmt;
use core::ops::{Index, IndexMut};

use crate::error::BmpError;

/// A packed 24-bit color.
///
/// Blue lives in bits 16–23, green in bits 8–15 and red in bits 0–7.
/// The top byte is always zero.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x00_00_00);
    pub const WHITE: Color = Color(0xFF_FF_FF);

    /// Build a color from its on-disk channel order.
    pub const fn from_bgr(blue: u8, green: u8, red: u8) -> Self {
        Color(((blue as u32) << 16) | ((green as u32) << 8) | red as u32)
    }

    /// Build a color from a packed value. The top byte is discarded.
    pub const fn from_u32(packed: u32) -> Self {
        Color(packed & 0x00FF_FFFF)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    pub const fn blue(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn red(self) -> u8 {
        self.0 as u8
    }

    /// Channels in on-disk order: `[blue, green, red]`.
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.blue(), self.green(), self.red()]
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({:#08X})", self.0)
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Color::from_u32(packed)
    }
}

impl From<Color> for u32 {
    fn from(c: Color) -> Self {
        c.0
    }
}

#[cfg(feature = "rgb")]
impl From<Color> for rgb::RGB8 {
    fn from(c: Color) -> Self {
        rgb::RGB8::new(c.red(), c.green(), c.blue())
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Color {
    fn from(p: rgb::RGB8) -> Self {
        Color::from_bgr(p.b, p.g, p.r)
    }
}

/// Row-major grid of colors in top-down, left-to-right order.
///
/// Row 0 is the topmost displayed row. The grid cannot be resized after
/// construction.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl PixelGrid {
    /// Allocate a `height × width` grid filled with `color`.
    pub fn new(width: u32, height: u32, color: Color) -> Result<Self, BmpError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            width: width as usize,
            height: height as usize,
            cells: vec![color; len],
        })
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Color>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.offset(row, col).map(|i| self.cells[i])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Color> {
        self.offset(row, col).map(move |i| &mut self.cells[i])
    }

    /// Set one cell. Panics if `(row, col)` is out of range.
    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        self[(row, col)] = color;
    }

    pub fn fill(&mut self, color: Color) {
        self.cells.fill(color);
    }

    /// One row, left to right. Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &[Color] {
        assert!(row < self.height, "row {row} out of range (height {})", self.height);
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Color] {
        assert!(row < self.height, "row {row} out of range (height {})", self.height);
        &mut self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Color]> + ExactSizeIterator {
        // chunks_exact(0) panics; an empty grid of width 0 still has `height` rows.
        let width = self.width;
        (0..self.height).map(move |r| &self.cells[r * width..(r + 1) * width])
    }

    /// All cells in row-major order.
    pub fn as_slice(&self) -> &[Color] {
        &self.cells
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Color> {
        imgref::ImgRef::new(&self.cells, self.width, self.height)
    }

    /// Copy into an [`imgref::ImgVec`] of RGB pixels.
    #[cfg(feature = "imgref")]
    pub fn to_rgb_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        let pixels = self.cells.iter().map(|&c| rgb::RGB8::from(c)).collect();
        imgref::ImgVec::new(pixels, self.width, self.height)
    }

    /// Render as text, one line per row and two glyphs per pixel:
    /// `$$` for black, `..` for white, `??` for anything else.
    pub fn preview(&self) -> String {
        let mut out = String::with_capacity(self.height * (self.width * 2 + 1));
        // Writing into a String cannot fail.
        let _ = self.preview_into(&mut out);
        out
    }

    pub fn preview_into<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for row in self.rows() {
            for &c in row {
                out.write_str(match c {
                    Color::BLACK => "$$",
                    Color::WHITE => "..",
                    _ => "??",
                })?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }
}

impl fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Index<(usize, usize)> for PixelGrid {
    type Output = Color;

    fn index(&self, (row, col): (usize, usize)) -> &Color {
        let i = self.offset(row, col).unwrap_or_else(|| {
            panic!(
                "pixel ({row}, {col}) out of range for {}x{} grid",
                self.width, self.height
            )
        });
        &self.cells[i]
    }
}

impl IndexMut<(usize, usize)> for PixelGrid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Color {
        let (w, h) = (self.width, self.height);
        let i = self
            .offset(row, col)
            .unwrap_or_else(|| panic!("pixel ({row}, {col}) out of range for {w}x{h} grid"));
        &mut self.cells[i]
    }
}
