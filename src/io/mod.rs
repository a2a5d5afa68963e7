//! I/O primitives for the artifact wire format
//!
//! This module provides the structured byte readers/writers used by the
//! container serializer and the packed bitstream types used by the entropy
//! coders.

pub mod bit_stream;
pub mod data_input;
pub mod data_output;
pub mod var_int;

// Re-export core types
pub use bit_stream::{BitReader, BitWriter};
pub use data_input::{DataInput, SliceDataInput};
pub use data_output::{DataOutput, VecDataOutput};
pub use var_int::VarInt;
