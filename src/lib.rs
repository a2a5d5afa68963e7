//! # Pixora: Image Pixel Compression
//!
//! This crate compresses flattened image pixel buffers with entropy coding
//! and reconstructs them bit-exactly from a single self-describing artifact.
//!
//! ## Key Features
//!
//! - **Huffman Coding**: Deterministic prefix-code construction with a
//!   documented tie-break rule, so identical inputs always produce identical
//!   artifacts
//! - **Run-Length Coding**: A second selectable algorithm for run-heavy data,
//!   with data-driven automatic selection
//! - **Versioned Container**: One magic-tagged wire format carrying shape,
//!   code table, exact bit count and packed payload
//! - **Strict Decoding**: Truncated or tampered artifacts fail with typed
//!   errors, never wrong pixels and never an unbounded loop
//! - **Parallel Batches**: One-call-per-image parallel encode/decode helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use pixora::{decode, encode, ImageShape};
//!
//! let pixels = vec![120u8, 120, 120, 120, 64, 64, 7];
//! let shape = ImageShape::flat(7);
//!
//! let artifact = encode(&pixels, &shape).unwrap();
//! let bytes = artifact.to_bytes().unwrap();
//!
//! // ... persist `bytes`, load them back later ...
//!
//! let restored = pixora::CompressionArtifact::from_bytes(&bytes).unwrap();
//! let (decoded, decoded_shape) = decode(&restored).unwrap();
//! assert_eq!(decoded, pixels);
//! assert_eq!(decoded_shape, shape);
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod container;
pub mod entropy;
pub mod error;
pub mod image;
pub mod io;

// Re-export core types
pub use codec::{decode, decode_batch, encode, encode_auto, encode_batch, encode_with, stats};
pub use container::CompressionArtifact;
pub use entropy::{
    shannon_entropy, Algorithm, CodeTable, CompressionStats, FrequencyTable, HuffmanDecoder,
    HuffmanEncoder, HuffmanTree,
};
pub use error::{PixoraError, Result};
pub use image::ImageShape;
pub use io::{BitReader, BitWriter, DataInput, DataOutput, SliceDataInput, VarInt, VecDataOutput};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing pixora v{}", VERSION);
}
