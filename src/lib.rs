//! # bmpscrub
//!
//! BMP (Windows bitmap) header decoder and in-place metadata scrubber.
//!
//! Parses the 14-byte file header, the variable-length DIB info header, and
//! the optional color table, derives the per-row padding geometry, and
//! supports anonymizing privacy-sensitive metadata fields in place without
//! corrupting pixel data or shifting the file layout. The pixel array is
//! treated as opaque: it is never read unless explicitly requested, and
//! never rewritten.
//!
//! ## Scrubbing
//!
//! Two independent operations, both idempotent:
//!
//! - [`BitmapFile::anonymize_metadata`] zeroes the reserved fields, the x/y
//!   resolution, and the colors-used/-important counts, each at its fixed
//!   byte offset.
//! - [`BitmapFile::anonymize_padding`] zeroes the opaque metadata region
//!   (vendor profile bytes between the color table and the pixel array).
//!
//! ## Non-Goals
//!
//! - Pixel decoding, recompression, or color-space conversion
//! - Rendering, or spectral/statistical analysis of pixel content
//! - Concurrent access to one file from multiple callers (serialize
//!   externally; there is no internal locking and writes are not
//!   transactional)
//!
//! ## Usage
//!
//! ```no_run
//! let mut bmp = bmpscrub::parse("photo.bmp")?;
//! println!("{}", bmp.file_header());
//! println!("{}", bmp.dib_header());
//!
//! bmp.anonymize_metadata()?;
//! bmp.anonymize_padding()?;
//! # Ok::<(), bmpscrub::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod anonymize;
mod bitmap;
mod cursor;
mod dib;
mod error;
mod header;
mod layout;
mod limits;
mod palette;
mod store;

// Re-exports
pub use anonymize::FieldGroup;
pub use bitmap::BitmapFile;
pub use dib::{BI_RGB, DIB_HEADER_OFFSET, DibHeader, MIN_DIB_HEADER_SIZE};
pub use error::BmpError;
pub use header::{FILE_HEADER_LEN, FileHeader};
pub use layout::{Layout, padding_per_row, row_stride};
pub use limits::Limits;
pub use palette::{ColorTable, PaletteEntry};
pub use store::{ByteStore, FileStore, MemStore};

use std::path::Path;

/// Parse the BMP file at `path`, reading only the bytes ahead of the pixel
/// array.
pub fn parse(path: impl AsRef<Path>) -> Result<BitmapFile<FileStore>, BmpError> {
    BitmapFile::parse(FileStore::new(path.as_ref()))
}

/// Parse a BMP byte image already held in memory.
pub fn parse_bytes(data: Vec<u8>) -> Result<BitmapFile<MemStore>, BmpError> {
    BitmapFile::parse(MemStore::new(data))
}
