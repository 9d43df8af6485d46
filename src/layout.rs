//! Derived row and region geometry, and structural validation.

use crate::dib::{DIB_HEADER_OFFSET, DibHeader};
use crate::error::BmpError;
use crate::header::FileHeader;

/// Row stride for `(width, bit_count)`: raw row bits rounded up to a 4-byte
/// boundary. Always a multiple of 4.
pub fn row_stride(width: i32, bit_count: u16) -> u64 {
    let bits = u64::from(width.unsigned_abs()) * u64::from(bit_count);
    bits.div_ceil(32) * 4
}

/// Trailing alignment bytes per row, in `[0, 3]`.
pub fn padding_per_row(width: i32, bit_count: u16) -> u64 {
    let raw = u64::from(width.unsigned_abs()) * u64::from(bit_count) / 8;
    row_stride(width, bit_count) - raw
}

/// Geometry derived from the decoded headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Bytes per pixel row including alignment padding.
    pub row_stride: u64,
    /// Trailing alignment bytes per row.
    pub padding_per_row: u64,
    /// Row count (absolute value of the signed height).
    pub rows: u32,
    /// Start of the opaque metadata region, just past the color table.
    pub opaque_start: u64,
    /// Length of the opaque metadata region in bytes.
    pub opaque_len: u64,
}

impl Layout {
    /// Derive geometry and validate it against the declared offsets and the
    /// actual store size. The row-geometry bound is exact only for
    /// uncompressed images and is checked only there.
    pub(crate) fn compute(
        header: &FileHeader,
        dib: &DibHeader,
        palette_entries: usize,
        store_len: u64,
    ) -> Result<Self, BmpError> {
        if dib.planes != 1 {
            return Err(BmpError::LayoutInconsistency {
                offset: 26,
                detail: format!("planes field is {}, expected 1", dib.planes),
            });
        }
        if dib.bit_count == 0 {
            return Err(BmpError::LayoutInconsistency {
                offset: 28,
                detail: "bit count is zero".into(),
            });
        }

        let pixel_data_offset = u64::from(header.pixel_data_offset);
        let header_end = DIB_HEADER_OFFSET as u64 + u64::from(dib.header_size);
        if pixel_data_offset < header_end {
            return Err(BmpError::LayoutInconsistency {
                offset: 10,
                detail: format!(
                    "pixel data offset {pixel_data_offset} precedes end of DIB header at {header_end}"
                ),
            });
        }
        if pixel_data_offset > store_len {
            return Err(BmpError::LayoutInconsistency {
                offset: 10,
                detail: format!(
                    "pixel data offset {pixel_data_offset} past end of file ({store_len} bytes)"
                ),
            });
        }

        // The color table codec already rejected tables crossing the pixel
        // array, so the opaque region cannot underflow here.
        let opaque_start = header_end + 4 * palette_entries as u64;
        let opaque_len = pixel_data_offset - opaque_start;

        let row_stride = row_stride(dib.width, dib.bit_count);
        let padding = padding_per_row(dib.width, dib.bit_count);
        let rows = dib.height.unsigned_abs();

        if dib.is_uncompressed() {
            let pixel_end = row_stride
                .checked_mul(u64::from(rows))
                .and_then(|n| n.checked_add(pixel_data_offset));
            match pixel_end {
                Some(end) if end <= store_len => {}
                _ => {
                    return Err(BmpError::LayoutInconsistency {
                        offset: pixel_data_offset,
                        detail: format!(
                            "pixel array of {rows} rows x {row_stride} bytes runs past end of file ({store_len} bytes)"
                        ),
                    });
                }
            }
        }

        Ok(Self {
            row_stride,
            padding_per_row: padding,
            rows,
            opaque_start,
            opaque_len,
        })
    }
}
