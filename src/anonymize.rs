//! In-place zeroing of whitelisted metadata fields.
//!
//! Each field group is one bounded write at a fixed absolute offset; no
//! other byte is touched, the file never changes size, and the pixel array
//! never moves. Both operations are idempotent.

use std::fmt;

use crate::dib::DibHeader;
use crate::error::BmpError;
use crate::header::FileHeader;
use crate::layout::Layout;
use crate::store::ByteStore;

/// Offset of the reserved field pair within the file header.
const RESERVED_OFFSET: u64 = 6;
/// Offset of the x/y pixels-per-meter pair within the classic DIB header.
const RESOLUTION_OFFSET: u64 = 38;
/// Offset of the colors-used/colors-important pair.
const PALETTE_USAGE_OFFSET: u64 = 46;

/// Whitelisted metadata field groups, each rewritten as one bounded write,
/// in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    /// `reserved1` and `reserved2` (offset 6, 4 bytes).
    Reserved,
    /// Horizontal and vertical resolution (offset 38, 8 bytes).
    Resolution,
    /// `colors_used` and `colors_important` (offset 46, 8 bytes).
    PaletteUsage,
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldGroup::Reserved => "reserved fields",
            FieldGroup::Resolution => "resolution fields",
            FieldGroup::PaletteUsage => "palette usage fields",
        })
    }
}

/// Zero the whitelisted header fields on disk, then commit the same values
/// to the in-memory records.
///
/// On failure the records are left pre-mutation and the error names the
/// groups whose writes reached disk; the file is not rolled back.
pub(crate) fn scrub_metadata<S: ByteStore>(
    store: &mut S,
    header: &mut FileHeader,
    dib: &mut DibHeader,
) -> Result<(), BmpError> {
    let mut new_header = *header;
    new_header.reserved1 = 0;
    new_header.reserved2 = 0;
    let mut new_dib = dib.clone();
    new_dib.x_pixels_per_meter = 0;
    new_dib.y_pixels_per_meter = 0;
    new_dib.colors_used = 0;
    new_dib.colors_important = 0;

    let reserved = new_header.encode_reserved();
    let resolution = new_dib.encode_resolution();
    let palette_usage = new_dib.encode_palette_usage();
    let groups: [(FieldGroup, u64, &[u8]); 3] = [
        (FieldGroup::Reserved, RESERVED_OFFSET, &reserved),
        (FieldGroup::Resolution, RESOLUTION_OFFSET, &resolution),
        (FieldGroup::PaletteUsage, PALETTE_USAGE_OFFSET, &palette_usage),
    ];

    let mut completed = Vec::new();
    for (group, offset, bytes) in groups {
        if let Err(err) = store.write_at(offset, bytes) {
            return Err(BmpError::PartialAnonymization {
                completed,
                source: Box::new(err),
            });
        }
        completed.push(group);
    }

    *header = new_header;
    *dib = new_dib;
    Ok(())
}

/// Zero the opaque metadata region (vendor profile bytes / inter-header
/// padding) on disk and in the in-memory copy.
pub(crate) fn scrub_padding<S: ByteStore>(
    store: &mut S,
    layout: &Layout,
    profile_bytes: &mut [u8],
) -> Result<(), BmpError> {
    if layout.opaque_len == 0 {
        return Ok(());
    }
    let zeros = vec![0u8; layout.opaque_len as usize];
    store.write_at(layout.opaque_start, &zeros)?;
    profile_bytes.fill(0);
    Ok(())
}
