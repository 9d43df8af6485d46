use crate::anonymize::FieldGroup;

/// Errors from BMP parsing and in-place anonymization.
///
/// Parse-time variants carry the byte offset at which the inconsistency was
/// detected; no partial [`crate::BitmapFile`] is ever returned on failure.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("invalid signature: expected \"BM\", found {found:?}")]
    InvalidSignature { found: [u8; 2] },

    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("unsupported DIB header variant: size {header_size}, minimum is 40")]
    UnsupportedHeaderVariant { header_size: u32 },

    #[error("color table ends at offset {palette_end}, past pixel data offset {pixel_data_offset}")]
    PaletteOutOfBounds {
        palette_end: u64,
        pixel_data_offset: u32,
    },

    #[error("inconsistent layout at offset {offset}: {detail}")]
    LayoutInconsistency { offset: u64, detail: String },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("i/o failure at the storage boundary")]
    Io(#[from] std::io::Error),

    /// A field-group write failed mid-sequence. The groups in `completed`
    /// reached disk; the on-disk file is not rolled back.
    #[error("anonymization incomplete: wrote {completed:?}, then failed")]
    PartialAnonymization {
        completed: Vec<FieldGroup>,
        source: Box<BmpError>,
    },
}
