//! Fixed-layout BMP headers.
//!
//! Both records are parsed and serialized field by field in little-endian
//! order. Nothing here depends on in-memory struct layout.

/// "BM"
pub const BMP_MAGIC: [u8; 2] = [0x42, 0x4D];

pub const FILE_HEADER_LEN: usize = 14;
pub const INFO_BLOCK_LEN: usize = 40;
/// Offset of the pixel array when nothing sits between the headers and the pixels.
pub const PIXEL_DATA_OFFSET: u32 = (FILE_HEADER_LEN + INFO_BLOCK_LEN) as u32;

/// The 14-byte file header at the start of every BMP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: [u8; 2],
    pub size_of_file: u32,
    pub reserved_1: u16,
    pub reserved_2: u16,
    pub offset_to_pixel_data: u32,
}

/// The 40-byte BITMAPINFOHEADER that follows the file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoBlock {
    pub size_of_info_block: u32,
    pub width: u32,
    pub height: u32,
    pub count_of_planes: u16,
    pub color_depth_in_bits: u16,
    pub type_of_compression: u32,
    pub size_of_image: u32,
    pub horizontal_resolution: i32,
    pub vertical_resolution: i32,
    pub count_of_colors: u32,
    pub count_of_important_colors: u32,
}

/// Little-endian field reader over a fixed buffer.
struct Fields<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Fields<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }
}

impl FileHeader {
    pub fn parse(bytes: &[u8; FILE_HEADER_LEN]) -> Self {
        let mut f = Fields::new(bytes);
        Self {
            magic: f.take(),
            size_of_file: f.u32(),
            reserved_1: f.u16(),
            reserved_2: f.u16(),
            offset_to_pixel_data: f.u32(),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_LEN] {
        let mut out = [0u8; FILE_HEADER_LEN];
        out[0..2].copy_from_slice(&self.magic);
        out[2..6].copy_from_slice(&self.size_of_file.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved_1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved_2.to_le_bytes());
        out[10..14].copy_from_slice(&self.offset_to_pixel_data.to_le_bytes());
        out
    }

    pub fn has_bmp_magic(&self) -> bool {
        self.magic == BMP_MAGIC
    }
}

impl InfoBlock {
    pub fn parse(bytes: &[u8; INFO_BLOCK_LEN]) -> Self {
        let mut f = Fields::new(bytes);
        Self {
            size_of_info_block: f.u32(),
            width: f.u32(),
            height: f.u32(),
            count_of_planes: f.u16(),
            color_depth_in_bits: f.u16(),
            type_of_compression: f.u32(),
            size_of_image: f.u32(),
            horizontal_resolution: f.i32(),
            vertical_resolution: f.i32(),
            count_of_colors: f.u32(),
            count_of_important_colors: f.u32(),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_BLOCK_LEN] {
        let mut out = [0u8; INFO_BLOCK_LEN];
        out[0..4].copy_from_slice(&self.size_of_info_block.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.count_of_planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.color_depth_in_bits.to_le_bytes());
        out[16..20].copy_from_slice(&self.type_of_compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.size_of_image.to_le_bytes());
        out[24..28].copy_from_slice(&self.horizontal_resolution.to_le_bytes());
        out[28..32].copy_from_slice(&self.vertical_resolution.to_le_bytes());
        out[32..36].copy_from_slice(&self.count_of_colors.to_le_bytes());
        out[36..40].copy_from_slice(&self.count_of_important_colors.to_le_bytes());
        out
    }
}
