//! Artifact container format
//!
//! One encode call produces one `CompressionArtifact`; its serialized form is
//! the single unit the surrounding application persists and later hands back
//! for decoding. The layout is self-describing and versioned:
//!
//! ```text
//! magic    u32 le         "PIXA"
//! version  u8             format version, currently 1
//! algo     u8             algorithm tag
//! rank     varint         number of shape dimensions
//! dims     varint each    dimension sizes, outermost first
//! bit_len  varint         exact payload length in bits
//! entries  u16 le         code table entry count (0 for RLE)
//!   symbol   u8
//!   code_len u8           bits in the code, >= 1
//!   code     packed bytes LSB-first, zero-padded to a byte
//! payload  varint + bytes length-prefixed packed payload
//! ```
//!
//! The code table is the explicit symbol -> code mapping, written in
//! ascending symbol order so identical inputs serialize byte-identically in
//! any process. Fixed-width fields are little-endian. Every parse failure is
//! a `CorruptStream`.

use crate::entropy::Algorithm;
use crate::error::{PixoraError, Result};
use crate::image::ImageShape;
use crate::io::bit_stream::{BitReader, BitWriter};
use crate::io::data_input::{DataInput, SliceDataInput};
use crate::io::data_output::{DataOutput, VecDataOutput};

/// Magic tag identifying a serialized artifact
pub const MAGIC: u32 = u32::from_le_bytes(*b"PIXA");

/// Current artifact format version
pub const FORMAT_VERSION: u8 = 1;

// Image shapes are (height, width, channels)-like; anything deeper is not a
// pixel buffer this codec produced.
const MAX_RANK: usize = 8;

/// The self-describing result of one encode call
///
/// Immutable once built; consumed by exactly one decode call. Holds
/// everything needed to reconstruct the original pixels: the algorithm, the
/// image shape, the exact payload bit count, the explicit code table (empty
/// for run-length artifacts) and the packed payload bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionArtifact {
    algorithm: Algorithm,
    shape: ImageShape,
    bit_len: u64,
    table: Vec<(u8, Vec<bool>)>,
    payload: Vec<u8>,
}

impl CompressionArtifact {
    /// Assemble an artifact from its parts
    pub fn new(
        algorithm: Algorithm,
        shape: ImageShape,
        bit_len: u64,
        table: Vec<(u8, Vec<bool>)>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            algorithm,
            shape,
            bit_len,
            table,
            payload,
        }
    }

    /// Algorithm the payload was encoded with
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Declared image shape
    pub fn shape(&self) -> &ImageShape {
        &self.shape
    }

    /// Exact number of data bits in the payload
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Explicit symbol -> code entries, ascending by symbol
    pub fn table(&self) -> &[(u8, Vec<bool>)] {
        &self.table
    }

    /// Packed payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serialize into the versioned wire form
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = VecDataOutput::with_capacity(
            16 + self.table.len() * 4 + self.payload.len(),
        );

        output.write_u32(MAGIC)?;
        output.write_u8(FORMAT_VERSION)?;
        output.write_u8(self.algorithm.tag())?;

        output.write_var_int(self.shape.rank() as u64)?;
        for &dim in self.shape.dims() {
            output.write_var_int(u64::from(dim))?;
        }

        output.write_var_int(self.bit_len)?;

        output.write_u16(self.table.len() as u16)?;
        for (symbol, code) in &self.table {
            output.write_u8(*symbol)?;
            output.write_u8(code.len() as u8)?;
            let mut bits = BitWriter::with_capacity(code.len());
            bits.push_bits(code);
            let (packed, _) = bits.finish();
            output.write_bytes(&packed)?;
        }

        output.write_length_prefixed_bytes(&self.payload)?;

        Ok(output.into_vec())
    }

    /// Deserialize the versioned wire form
    ///
    /// Every malformation fails with `CorruptStream`: bad magic, unknown
    /// version or algorithm, truncation anywhere, trailing bytes, or a
    /// payload length that disagrees with the declared bit count.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut input = SliceDataInput::new(bytes);

        let magic = input.read_u32()?;
        if magic != MAGIC {
            return Err(PixoraError::corrupt_stream("bad artifact magic"));
        }

        let version = input.read_u8()?;
        if version != FORMAT_VERSION {
            return Err(PixoraError::corrupt_stream(format!(
                "unsupported artifact version {}",
                version
            )));
        }

        let tag = input.read_u8()?;
        let algorithm = Algorithm::from_tag(tag).ok_or_else(|| {
            PixoraError::corrupt_stream(format!("unknown algorithm tag {}", tag))
        })?;

        let rank = input.read_var_int()? as usize;
        if rank > MAX_RANK {
            return Err(PixoraError::corrupt_stream(format!(
                "implausible shape rank {}",
                rank
            )));
        }
        let mut dims = Vec::with_capacity(rank);
        for _ in 0..rank {
            let dim = input.read_var_int()?;
            let dim = u32::try_from(dim).map_err(|_| {
                PixoraError::corrupt_stream(format!("dimension {} exceeds u32", dim))
            })?;
            dims.push(dim);
        }
        let shape = ImageShape::new(dims);

        let bit_len = input.read_var_int()?;

        let entry_count = input.read_u16()? as usize;
        if entry_count > 256 {
            return Err(PixoraError::corrupt_stream(format!(
                "code table claims {} entries",
                entry_count
            )));
        }
        let mut table = Vec::with_capacity(entry_count);
        for _ in 0..entry_count {
            let symbol = input.read_u8()?;
            let code_len = input.read_u8()? as usize;
            if code_len == 0 {
                return Err(PixoraError::corrupt_stream(format!(
                    "empty code for symbol {}",
                    symbol
                )));
            }
            let packed = input.read_vec((code_len + 7) / 8)?;
            let mut bits = BitReader::new(&packed, code_len as u64)?;
            let mut code = Vec::with_capacity(code_len);
            while let Some(bit) = bits.next_bit() {
                code.push(bit);
            }
            table.push((symbol, code));
        }

        let payload = input.read_length_prefixed_bytes()?;
        if input.has_more() {
            return Err(PixoraError::corrupt_stream("trailing bytes after payload"));
        }
        if payload.len() as u64 != bit_len.div_ceil(8) {
            return Err(PixoraError::corrupt_stream(format!(
                "payload of {} bytes disagrees with bit count {}",
                payload.len(),
                bit_len
            )));
        }

        Ok(Self {
            algorithm,
            shape,
            bit_len,
            table,
            payload,
        })
    }
}
