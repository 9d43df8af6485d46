//! Backing byte stores: a path-backed file and an in-memory buffer.
//!
//! Every operation is scoped: acquire the underlying resource, perform one
//! bounded read or write, release on every exit path. No handle outlives the
//! call that opened it, and no write ever lands partially: a short write
//! surfaces as [`BmpError::Io`] instead.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::BmpError;

/// A seekable byte store a bitmap is parsed from and anonymized in.
pub trait ByteStore {
    /// Total size of the store in bytes.
    fn len(&self) -> Result<u64, BmpError>;

    /// Read the full byte image of the store.
    fn read_all(&self) -> Result<Vec<u8>, BmpError>;

    /// Read at most `n` bytes from the start of the store. Shorter stores
    /// return what they have; the cursor layer turns a short prefix into a
    /// [`BmpError::Truncated`] at the offset that actually ran dry.
    fn read_prefix(&self, n: usize) -> Result<Vec<u8>, BmpError> {
        let mut bytes = self.read_all()?;
        bytes.truncate(n);
        Ok(bytes)
    }

    /// Fill `buf` from the bytes starting at `offset`.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), BmpError>;

    /// Overwrite `bytes.len()` bytes starting at `offset`, in full or not at
    /// all. Never grows the store.
    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<(), BmpError>;
}

/// Path-backed store. Each operation opens the file, performs bounded I/O,
/// and releases the handle when the scope ends, on success and failure alike.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteStore for FileStore {
    fn len(&self) -> Result<u64, BmpError> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    fn read_all(&self) -> Result<Vec<u8>, BmpError> {
        Ok(std::fs::read(&self.path)?)
    }

    fn read_prefix(&self, n: usize) -> Result<Vec<u8>, BmpError> {
        let file = File::open(&self.path)?;
        let mut bytes = Vec::new();
        file.take(n as u64).read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), BmpError> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(buf)?;
        Ok(())
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<(), BmpError> {
        let end = offset
            .checked_add(bytes.len() as u64)
            .ok_or_else(|| overflow_error(offset))?;
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        if end > file.metadata()?.len() {
            return Err(BmpError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "write would extend past end of file",
            )));
        }
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }
}

/// In-memory store over an owned byte buffer. Used by tests and by callers
/// that already hold the file bytes.
#[derive(Debug, Clone)]
pub struct MemStore {
    bytes: Vec<u8>,
}

impl MemStore {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl ByteStore for MemStore {
    fn len(&self) -> Result<u64, BmpError> {
        Ok(self.bytes.len() as u64)
    }

    fn read_all(&self) -> Result<Vec<u8>, BmpError> {
        Ok(self.bytes.clone())
    }

    fn read_prefix(&self, n: usize) -> Result<Vec<u8>, BmpError> {
        Ok(self.bytes[..n.min(self.bytes.len())].to_vec())
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), BmpError> {
        let start = usize::try_from(offset).map_err(|_| overflow_error(offset))?;
        let available = self.bytes.len().saturating_sub(start);
        if buf.len() > available {
            return Err(BmpError::Truncated {
                offset: start.min(self.bytes.len()),
                needed: buf.len(),
                available,
            });
        }
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
        Ok(())
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<(), BmpError> {
        let start = usize::try_from(offset).map_err(|_| overflow_error(offset))?;
        let end = start.checked_add(bytes.len()).filter(|&e| e <= self.bytes.len());
        match end {
            Some(end) => {
                self.bytes[start..end].copy_from_slice(bytes);
                Ok(())
            }
            None => Err(BmpError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "write would extend past end of buffer",
            ))),
        }
    }
}

fn overflow_error(offset: u64) -> BmpError {
    BmpError::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("offset {offset} out of addressable range"),
    ))
}
