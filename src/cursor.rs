//! Little-endian reader over an in-memory byte image.

use crate::error::BmpError;

/// Read cursor over the metadata prefix of a bitmap.
///
/// Every failed read reports the absolute offset at which input ran out.
/// The write side of the store abstraction lives in [`crate::store`].
pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn seek(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(BmpError::Truncated {
                offset: self.data.len(),
                needed: pos - self.data.len(),
                available: 0,
            });
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        let available = self.data.len() - self.pos;
        if n > available {
            return Err(BmpError::Truncated {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    pub(crate) fn read_u16_le(&mut self) -> Result<u16, BmpError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32, BmpError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_i32_le(&mut self) -> Result<i32, BmpError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }
}
