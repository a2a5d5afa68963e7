//! Variable-length integer encoding
//!
//! LEB128 (Little Endian Base 128) encoding for the container's length and
//! dimension fields. Space-efficient for small values while still covering
//! the full 64-bit range.

use crate::error::{PixoraError, Result};
use crate::io::data_input::DataInput;

/// Utility struct for variable-length integer encoding/decoding
pub struct VarInt;

impl VarInt {
    /// Maximum number of bytes needed to encode a u64 as a varint
    pub const MAX_ENCODED_LEN: usize = 10;

    /// Write a u64 value as a variable-length integer to a byte vector
    ///
    /// Returns the number of bytes written.
    pub fn write_to_vec(buffer: &mut Vec<u8>, mut value: u64) -> usize {
        let mut bytes_written = 0;

        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;

            if value != 0 {
                byte |= 0x80; // Set continuation bit
            }

            buffer.push(byte);
            bytes_written += 1;

            if value == 0 {
                break;
            }
        }

        bytes_written
    }

    /// Read a variable-length integer from a DataInput implementation
    pub fn read_from<R: DataInput + ?Sized>(reader: &mut R) -> Result<u64> {
        let mut result = 0u64;
        let mut shift = 0;

        for _ in 0..Self::MAX_ENCODED_LEN {
            let byte = reader.read_u8()?;

            if shift >= 64 {
                return Err(PixoraError::corrupt_stream("varint too long"));
            }

            result |= ((byte & 0x7F) as u64) << shift;

            // If continuation bit is not set, we're done
            if (byte & 0x80) == 0 {
                return Ok(result);
            }

            shift += 7;
        }

        Err(PixoraError::corrupt_stream("varint too long"))
    }
}
