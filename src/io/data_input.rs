//! Data input abstractions
//!
//! Structured reads over byte slices. The only streams parsed through this
//! trait are serialized artifacts, so running out of data maps to
//! `CorruptStream` rather than a generic I/O failure.

use crate::error::{PixoraError, Result};
use crate::io::var_int::VarInt;

/// Trait for reading structured data from a source
pub trait DataInput {
    /// Read a single byte
    fn read_u8(&mut self) -> Result<u8>;

    /// Read a 16-bit unsigned integer in little-endian format
    fn read_u16(&mut self) -> Result<u16>;

    /// Read a 32-bit unsigned integer in little-endian format
    fn read_u32(&mut self) -> Result<u32>;

    /// Read a variable-length encoded integer
    fn read_var_int(&mut self) -> Result<u64>;

    /// Read exact number of bytes into the provided buffer
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Read a vector of bytes with the specified length
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }

    /// Read a length-prefixed byte vector (length as varint)
    fn read_length_prefixed_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_var_int()? as usize;
        self.read_vec(len)
    }
}

/// DataInput implementation for byte slices
pub struct SliceDataInput<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceDataInput<'a> {
    /// Create a new SliceDataInput from a byte slice
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get the number of remaining bytes
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are more bytes to read
    pub fn has_more(&self) -> bool {
        self.position < self.data.len()
    }
}

impl<'a> DataInput for SliceDataInput<'a> {
    fn read_u8(&mut self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(PixoraError::corrupt_stream("unexpected end of data"));
        }
        let value = self.data[self.position];
        self.position += 1;
        Ok(value)
    }

    fn read_u16(&mut self) -> Result<u16> {
        if self.position + 2 > self.data.len() {
            return Err(PixoraError::corrupt_stream("unexpected end of data"));
        }
        let bytes = &self.data[self.position..self.position + 2];
        self.position += 2;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&mut self) -> Result<u32> {
        if self.position + 4 > self.data.len() {
            return Err(PixoraError::corrupt_stream("unexpected end of data"));
        }
        let bytes = &self.data[self.position..self.position + 4];
        self.position += 4;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_var_int(&mut self) -> Result<u64> {
        VarInt::read_from(self)
    }

    // Length-checked before allocating, so a hostile length prefix cannot
    // demand more memory than the stream can back
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        if len > self.remaining() {
            return Err(PixoraError::corrupt_stream("unexpected end of data"));
        }
        let mut buf = vec![0u8; len];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.position + buf.len() > self.data.len() {
            return Err(PixoraError::corrupt_stream("unexpected end of data"));
        }
        buf.copy_from_slice(&self.data[self.position..self.position + buf.len()]);
        self.position += buf.len();
        Ok(())
    }
}
