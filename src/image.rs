//! Image shape handling
//!
//! The codec works on flattened pixel buffers; `ImageShape` carries the
//! dimensions needed to reshape a decoded symbol stream back into an image.

use crate::error::{PixoraError, Result};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dimensions of an image buffer, outermost dimension first
///
/// A shape is an ordered list of dimension sizes, e.g. `[height, width,
/// channels]` for an interleaved RGB image or `[n]` for an already-flat
/// buffer. A shape of rank zero, or with any zero dimension, describes an
/// empty buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageShape {
    dims: Vec<u32>,
}

impl ImageShape {
    /// Create a shape from a dimension list
    pub fn new(dims: Vec<u32>) -> Self {
        Self { dims }
    }

    /// Shape of a flat one-dimensional buffer
    pub fn flat(len: u32) -> Self {
        Self { dims: vec![len] }
    }

    /// Shape of a single-channel height x width image
    pub fn hw(height: u32, width: u32) -> Self {
        Self {
            dims: vec![height, width],
        }
    }

    /// Shape of a height x width x channels image
    pub fn hwc(height: u32, width: u32, channels: u32) -> Self {
        Self {
            dims: vec![height, width, channels],
        }
    }

    /// The dimension list, outermost first
    pub fn dims(&self) -> &[u32] {
        &self.dims
    }

    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of pixel samples the shape describes
    ///
    /// A rank-zero shape holds no elements. Products that would overflow
    /// saturate at `u64::MAX`, which can never match a real buffer length.
    pub fn element_count(&self) -> u64 {
        if self.dims.is_empty() {
            return 0;
        }
        self.dims.iter().fold(1u64, |acc, &d| {
            acc.saturating_mul(u64::from(d))
        })
    }

    /// Check whether the shape describes an empty buffer
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Validate that a pixel buffer has exactly the length this shape implies
    pub fn check_buffer(&self, pixels: &[u8]) -> Result<()> {
        let expected = self.element_count();
        if expected != pixels.len() as u64 {
            return Err(PixoraError::invalid_input(format!(
                "shape {} implies {} elements, buffer holds {}",
                self,
                expected,
                pixels.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ImageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dims.is_empty() {
            return write!(f, "()");
        }
        let joined: Vec<String> = self.dims.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", joined.join("x"))
    }
}
