//! Run-length coding for run-heavy pixel data
//!
//! Flat images with long constant runs (masks, screenshots, rendered charts)
//! compress better as `(value, run length)` pairs than through a prefix code.
//! Runs are capped at 255 so each pair packs into two bytes; longer runs
//! simply emit consecutive pairs.

use crate::error::{PixoraError, Result};

/// Longest run a single `(value, count)` pair can describe
pub const MAX_RUN: usize = u8::MAX as usize;

/// Encode a flattened pixel buffer as `(value, run length)` byte pairs
pub fn rle_compress(pixels: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::new();
    let Some((&first, rest)) = pixels.split_first() else {
        return encoded;
    };

    let mut value = first;
    let mut run = 1usize;

    for &pixel in rest {
        if pixel == value && run < MAX_RUN {
            run += 1;
        } else {
            encoded.push(value);
            encoded.push(run as u8);
            value = pixel;
            run = 1;
        }
    }
    encoded.push(value);
    encoded.push(run as u8);

    encoded
}

/// Decode `(value, run length)` pairs back into at most `expected` pixels
///
/// Fails with `CorruptStream` on a dangling half pair, a zero-length run, or
/// when the runs expand past `expected`. Expanding to fewer than `expected`
/// pixels is left to the caller to diagnose as a shape mismatch.
pub fn rle_decompress(data: &[u8], expected: usize) -> Result<Vec<u8>> {
    if data.len() % 2 != 0 {
        return Err(PixoraError::corrupt_stream(
            "run-length stream holds a dangling half pair",
        ));
    }

    let mut pixels = Vec::with_capacity(expected);
    for pair in data.chunks_exact(2) {
        let (value, run) = (pair[0], pair[1] as usize);
        if run == 0 {
            return Err(PixoraError::corrupt_stream("zero-length run"));
        }
        if pixels.len() + run > expected {
            return Err(PixoraError::corrupt_stream(
                "runs expand past the declared shape",
            ));
        }
        pixels.resize(pixels.len() + run, value);
    }

    Ok(pixels)
}
