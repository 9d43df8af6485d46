//! The variable-length DIB (device-independent bitmap) info header.
//!
//! The record is self-describing: the first 4 bytes give its total length,
//! so decoding is two-phase, reading the size field first and then the
//! remaining `size - 4` bytes. Only the classic 40-byte field set is interpreted; bytes
//! of extended variants (V4, V5) are preserved as an opaque tail.

use std::fmt;

use crate::cursor::ByteCursor;
use crate::error::BmpError;
use crate::header::FILE_HEADER_LEN;

/// Absolute byte offset of the DIB header within the file.
pub const DIB_HEADER_OFFSET: usize = FILE_HEADER_LEN;

/// Smallest header size carrying the classic field set.
pub const MIN_DIB_HEADER_SIZE: u32 = 40;

/// Compression code for uncompressed pixel data (BI_RGB).
pub const BI_RGB: u32 = 0;

/// Decoded DIB info header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DibHeader {
    /// Self-described total record length, including this field.
    pub header_size: u32,
    pub width: i32,
    /// Negative height flags top-down row order; recorded, not acted on.
    pub height: i32,
    /// Must be 1.
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    /// May be 0 for uncompressed images.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
    /// Bytes of extended header variants past the classic 40, kept verbatim.
    pub tail: Vec<u8>,
}

impl DibHeader {
    pub(crate) fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, BmpError> {
        cursor.seek(DIB_HEADER_OFFSET)?;
        let header_size = cursor.read_u32_le()?;
        if header_size < MIN_DIB_HEADER_SIZE {
            return Err(BmpError::UnsupportedHeaderVariant { header_size });
        }
        let width = cursor.read_i32_le()?;
        let height = cursor.read_i32_le()?;
        let planes = cursor.read_u16_le()?;
        let bit_count = cursor.read_u16_le()?;
        let compression = cursor.read_u32_le()?;
        let image_size = cursor.read_u32_le()?;
        let x_pixels_per_meter = cursor.read_i32_le()?;
        let y_pixels_per_meter = cursor.read_i32_le()?;
        let colors_used = cursor.read_u32_le()?;
        let colors_important = cursor.read_u32_le()?;
        let tail = cursor
            .read_bytes(header_size as usize - MIN_DIB_HEADER_SIZE as usize)?
            .to_vec();
        Ok(Self {
            header_size,
            width,
            height,
            planes,
            bit_count,
            compression,
            image_size,
            x_pixels_per_meter,
            y_pixels_per_meter,
            colors_used,
            colors_important,
            tail,
        })
    }

    /// Whether rows are stored top-down (negative height).
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Whether the pixel array is uncompressed (BI_RGB), making row
    /// geometry exact.
    pub fn is_uncompressed(&self) -> bool {
        self.compression == BI_RGB
    }

    /// Byte image of the resolution field pair as stored at offset 38.
    pub fn encode_resolution(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[4..].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out
    }

    /// Byte image of the colors-used/colors-important pair as stored at
    /// offset 46.
    pub fn encode_palette_usage(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.colors_used.to_le_bytes());
        out[4..].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }
}

impl fmt::Display for DibHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: {}", self.header_size)?;
        writeln!(f, "Width: {}", self.width)?;
        writeln!(f, "Height: {}", self.height)?;
        writeln!(f, "Planes: {}", self.planes)?;
        writeln!(f, "Bit count: {}", self.bit_count)?;
        writeln!(f, "Compression: {}", self.compression)?;
        writeln!(f, "Image size: {}", self.image_size)?;
        writeln!(f, "X pixels per meter: {}", self.x_pixels_per_meter)?;
        writeln!(f, "Y pixels per meter: {}", self.y_pixels_per_meter)?;
        writeln!(f, "Colors used: {}", self.colors_used)?;
        write!(f, "Important colors: {}", self.colors_important)
    }
}
