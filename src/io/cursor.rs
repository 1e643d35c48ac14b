use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::error::{Error, Result};

/// Byte cursor over an in-memory buffer.
///
/// Every read checks the remaining length up front and fails with
/// [`Error::Truncated`] instead of returning a short read.
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Move to an absolute offset. Seeking past the end is rejected.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        if offset > self.len() {
            return Err(Error::truncated(
                self.position(),
                offset - self.position(),
                self.remaining(),
            ));
        }
        self.inner.set_position(offset);
        Ok(())
    }

    /// Total buffer length
    pub fn len(&self) -> u64 {
        self.inner.get_ref().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left after the current position
    pub fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.position())
    }

    fn require(&self, needed: u64) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(Error::truncated(self.position(), needed, available));
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1)?;
        self.inner.read_u8().map_err(|_| self.short_read(1))
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.require(2)?;
        self.inner
            .read_u16::<LittleEndian>()
            .map_err(|_| self.short_read(2))
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.require(2)?;
        self.inner
            .read_u16::<BigEndian>()
            .map_err(|_| self.short_read(2))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.require(4)?;
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(|_| self.short_read(4))
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.require(4)?;
        self.inner
            .read_u32::<BigEndian>()
            .map_err(|_| self.short_read(4))
    }

    /// Read exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.require(len as u64)?;
        let mut buf = vec![0u8; len];
        self.inner
            .read_exact(&mut buf)
            .map_err(|_| self.short_read(len as u64))?;
        Ok(buf)
    }

    /// Read `len` raw bytes and render them as lowercase hex.
    pub fn read_hex(&mut self, len: usize) -> Result<String> {
        Ok(hex::encode(self.read_bytes(len)?))
    }

    /// Read a NUL-terminated string, consuming the terminator.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. A missing terminator
    /// is a truncation.
    pub fn read_cstring(&mut self) -> Result<String> {
        let start = self.position() as usize;
        let data = *self.inner.get_ref();
        let rest = &data[start.min(data.len())..];

        let Some(nul) = rest.iter().position(|&b| b == 0) else {
            return Err(Error::truncated(
                start as u64,
                rest.len() as u64 + 1,
                rest.len() as u64,
            ));
        };

        let value = String::from_utf8_lossy(&rest[..nul]).into_owned();
        self.inner.set_position((start + nul + 1) as u64);
        Ok(value)
    }

    fn short_read(&self, needed: u64) -> Error {
        Error::truncated(self.position(), needed, self.remaining())
    }
}
