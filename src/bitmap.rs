//! The parsed bitmap aggregate and its parse pipeline.

use crate::anonymize;
use crate::cursor::ByteCursor;
use crate::dib::{DIB_HEADER_OFFSET, DibHeader};
use crate::error::BmpError;
use crate::header::FileHeader;
use crate::layout::Layout;
use crate::limits::Limits;
use crate::palette::ColorTable;
use crate::store::ByteStore;

/// A parsed bitmap: decoded headers, derived layout, the verbatim opaque
/// metadata region, and the backing store.
///
/// The pixel array stays in the store; it is only read when explicitly
/// requested through [`BitmapFile::pixel_bytes`] or
/// [`BitmapFile::row_padding_bytes`]. Anonymization is the only mutator and
/// writes back through the same store.
#[derive(Debug)]
pub struct BitmapFile<S: ByteStore> {
    store: S,
    file_header: FileHeader,
    dib_header: DibHeader,
    color_table: ColorTable,
    layout: Layout,
    profile_bytes: Vec<u8>,
}

impl<S: ByteStore> BitmapFile<S> {
    /// Parse a bitmap from `store`, leaving the pixel array unread.
    pub fn parse(store: S) -> Result<Self, BmpError> {
        Self::parse_with_limits(store, None)
    }

    /// Parse with resource limits applied before any sizable read.
    pub fn parse_with_limits(store: S, limits: Option<&Limits>) -> Result<Self, BmpError> {
        let store_len = store.len()?;
        if let Some(limits) = limits {
            limits.check_file_bytes(store_len)?;
        }

        // First pass: the file header plus the DIB size field, enough to
        // learn how far the metadata prefix extends.
        let head = store.read_prefix(DIB_HEADER_OFFSET + 4)?;
        let mut cursor = ByteCursor::new(&head);
        let file_header = FileHeader::decode(&mut cursor)?;
        let header_size = cursor.read_u32_le()?;

        // Second pass: everything ahead of the pixel array in one bounded
        // read: DIB record, color table, and opaque profile bytes.
        let meta_end = (DIB_HEADER_OFFSET as u64 + u64::from(header_size))
            .max(u64::from(file_header.pixel_data_offset));
        let prefix = store.read_prefix(meta_end.min(store_len) as usize)?;
        let mut cursor = ByteCursor::new(&prefix);
        let file_header = FileHeader::decode(&mut cursor)?;
        let dib_header = DibHeader::decode(&mut cursor)?;
        let color_table = ColorTable::decode(&mut cursor, &file_header, &dib_header)?;

        if let Some(limits) = limits {
            limits.check(
                dib_header.width.unsigned_abs(),
                dib_header.height.unsigned_abs(),
            )?;
        }

        let layout = Layout::compute(&file_header, &dib_header, color_table.len(), store_len)?;
        let profile_bytes = prefix
            [layout.opaque_start as usize..file_header.pixel_data_offset as usize]
            .to_vec();

        Ok(Self {
            store,
            file_header,
            dib_header,
            color_table,
            layout,
            profile_bytes,
        })
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn dib_header(&self) -> &DibHeader {
        &self.dib_header
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The opaque metadata region between the color table (or DIB header)
    /// and the pixel array, byte-for-byte as stored.
    pub fn profile_bytes(&self) -> &[u8] {
        &self.profile_bytes
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Materialize the pixel array. The parse itself never reads it.
    ///
    /// For uncompressed images the length is the exact row geometry; for
    /// compressed ones it is the declared `image_size`, falling back to the
    /// rest of the store when that field is 0.
    pub fn pixel_bytes(&self) -> Result<Vec<u8>, BmpError> {
        let start = u64::from(self.file_header.pixel_data_offset);
        let len = if self.dib_header.is_uncompressed() {
            self.layout.row_stride * u64::from(self.layout.rows)
        } else if self.dib_header.image_size != 0 {
            u64::from(self.dib_header.image_size)
        } else {
            self.store.len()?.saturating_sub(start)
        };
        let mut buf = vec![0u8; len as usize];
        self.store.read_at(start, &mut buf)?;
        Ok(buf)
    }

    /// Trailing alignment bytes of each pixel row, concatenated in row
    /// order. The walk skips the content bytes of every row and reads only
    /// the padding; pixel values are never decoded.
    ///
    /// Row geometry is exact only for uncompressed images; for compressed
    /// ones (and for rows with no padding) this returns an empty buffer.
    pub fn row_padding_bytes(&self) -> Result<Vec<u8>, BmpError> {
        let pad = self.layout.padding_per_row;
        if pad == 0 || !self.dib_header.is_uncompressed() {
            return Ok(Vec::new());
        }
        let content = self.layout.row_stride - pad;
        let base = u64::from(self.file_header.pixel_data_offset);
        let mut out = Vec::with_capacity((pad * u64::from(self.layout.rows)) as usize);
        let mut buf = vec![0u8; pad as usize];
        for row in 0..u64::from(self.layout.rows) {
            self.store
                .read_at(base + row * self.layout.row_stride + content, &mut buf)?;
            out.extend_from_slice(&buf);
        }
        Ok(out)
    }

    /// Zero the whitelisted metadata fields in place: both reserved fields,
    /// the x/y resolution, and the colors-used/-important counts.
    ///
    /// Writes each field group at its fixed offset without touching any
    /// other byte, then updates the in-memory records so re-reads are
    /// consistent. Idempotent. On a mid-sequence write failure the in-memory
    /// state stays pre-mutation and the error reports which groups reached
    /// disk ([`BmpError::PartialAnonymization`]).
    pub fn anonymize_metadata(&mut self) -> Result<(), BmpError> {
        anonymize::scrub_metadata(&mut self.store, &mut self.file_header, &mut self.dib_header)
    }

    /// Zero the opaque metadata region in place. Idempotent; a no-op when
    /// the region is empty. The color table and the pixel array are never
    /// touched.
    pub fn anonymize_padding(&mut self) -> Result<(), BmpError> {
        anonymize::scrub_padding(&mut self.store, &self.layout, &mut self.profile_bytes)
    }
}
