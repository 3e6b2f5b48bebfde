use core::ops::{Index, IndexMut};

use crate::bmp::{self, BMP_MAGIC, FileHeader, INFO_BLOCK_LEN, InfoBlock, PIXEL_DATA_OFFSET};
use crate::error::BmpError;
use crate::pixel::{Color, PixelGrid};

/// 72 DPI expressed in pixels per meter.
const DEFAULT_RESOLUTION: i32 = 2835;

/// A decoded 24-bit image: both headers plus the top-down pixel grid.
///
/// A `Bitmap` only comes from a successful decode or from [`Bitmap::new`],
/// so the grid always matches the header dimensions. Pixels are editable
/// one at a time, by row, or all at once; the grid itself is never handed
/// out mutably.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    file_header: FileHeader,
    info_block: InfoBlock,
    pixels: PixelGrid,
}

impl Bitmap {
    /// A blank `width × height` canvas with freshly computed headers.
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self, BmpError> {
        let pixels = PixelGrid::new(width, height, fill)?;
        let file_header = FileHeader {
            magic: BMP_MAGIC,
            size_of_file: 0,
            reserved_1: 0,
            reserved_2: 0,
            offset_to_pixel_data: PIXEL_DATA_OFFSET,
        };
        let info_block = InfoBlock {
            size_of_info_block: INFO_BLOCK_LEN as u32,
            width,
            height,
            count_of_planes: 1,
            color_depth_in_bits: 24,
            type_of_compression: 0,
            size_of_image: 0,
            horizontal_resolution: DEFAULT_RESOLUTION,
            vertical_resolution: DEFAULT_RESOLUTION,
            count_of_colors: 0,
            count_of_important_colors: 0,
        };
        let (file_header, info_block) =
            bmp::output_headers(&file_header, &info_block, bmp::SizeFields::Recompute)?;
        Ok(Self {
            file_header,
            info_block,
            pixels,
        })
    }

    pub(crate) fn from_parts(
        file_header: FileHeader,
        info_block: InfoBlock,
        pixels: PixelGrid,
    ) -> Self {
        debug_assert_eq!(pixels.width(), info_block.width as usize);
        debug_assert_eq!(pixels.height(), info_block.height as usize);
        Self {
            file_header,
            info_block,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.info_block.width
    }

    pub fn height(&self) -> u32 {
        self.info_block.height
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_block(&self) -> &InfoBlock {
        &self.info_block
    }

    pub fn pixels(&self) -> &PixelGrid {
        &self.pixels
    }

    /// Mutable access to one pixel, or `None` outside the grid.
    pub fn pixel_mut(&mut self, row: usize, col: usize) -> Option<&mut Color> {
        self.pixels.get_mut(row, col)
    }

    /// Set one pixel by canonical `(row, col)`. Panics if out of range.
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Color) {
        self.pixels.set(row, col, color);
    }

    /// One mutable row, left to right. Panics if `row` is out of range.
    pub fn row_mut(&mut self, row: usize) -> &mut [Color] {
        self.pixels.row_mut(row)
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Draw two diagonals in `color`, one from each top corner, each
    /// `min(width, height)` pixels long.
    pub fn draw_cross(&mut self, color: Color) {
        let w = self.pixels.width();
        let n = w.min(self.pixels.height());
        for i in 0..n {
            self.pixels[(i, i)] = color;
            self.pixels[(i, w - 1 - i)] = color;
        }
    }

    /// Text rendering of the pixel grid; see [`PixelGrid::preview`].
    pub fn preview(&self) -> String {
        self.pixels.preview()
    }

    pub fn into_parts(self) -> (FileHeader, InfoBlock, PixelGrid) {
        (self.file_header, self.info_block, self.pixels)
    }
}

impl Index<(usize, usize)> for Bitmap {
    type Output = Color;

    fn index(&self, at: (usize, usize)) -> &Color {
        &self.pixels[at]
    }
}

impl IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, at: (usize, usize)) -> &mut Color {
        &mut self.pixels[at]
    }
}
