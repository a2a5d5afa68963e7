//! Entropy coding for flattened pixel data
//!
//! This module provides the codec internals: frequency tallies, Huffman
//! prefix coding, and run-length coding, plus the algorithm selection and
//! statistics shared by both.

pub mod frequency;
pub mod huffman;
pub mod rle;

// Re-export main types
pub use frequency::FrequencyTable;
pub use huffman::{CodeTable, HuffmanDecoder, HuffmanEncoder, HuffmanTree};
pub use rle::{rle_compress, rle_decompress};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entropy coding algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// Huffman prefix coding, the default for general pixel data
    Huffman,
    /// Run-length coding for data dominated by constant runs
    Rle,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Huffman
    }
}

impl Algorithm {
    /// Get the name of the algorithm
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Huffman => "Huffman",
            Algorithm::Rle => "RLE",
        }
    }

    /// Wire tag stored in the artifact header
    pub fn tag(self) -> u8 {
        match self {
            Algorithm::Huffman => 0,
            Algorithm::Rle => 1,
        }
    }

    /// Resolve a wire tag back to an algorithm
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Algorithm::Huffman),
            1 => Some(Algorithm::Rle),
            _ => None,
        }
    }

    /// Select an algorithm from the data itself
    ///
    /// Run-length coding only wins when runs dominate; a mean run length of
    /// four bytes is where its two-byte pairs clearly beat prefix codes on
    /// typical pixel data. Everything else goes to Huffman.
    pub fn select_for_pixels(pixels: &[u8]) -> Self {
        if pixels.is_empty() {
            return Algorithm::Huffman;
        }

        let mut runs = 1usize;
        for window in pixels.windows(2) {
            if window[0] != window[1] {
                runs += 1;
            }
        }

        let mean_run = pixels.len() as f64 / runs as f64;
        if mean_run >= 4.0 {
            Algorithm::Rle
        } else {
            Algorithm::Huffman
        }
    }
}

/// Shannon entropy of a pixel buffer in bits per symbol
pub fn shannon_entropy(pixels: &[u8]) -> f64 {
    if pixels.is_empty() {
        return 0.0;
    }

    let table = FrequencyTable::from_pixels(pixels);
    let total = table.total() as f64;
    let mut entropy = 0.0;

    for (_, count) in table.iter_present() {
        let p = count as f64 / total;
        entropy -= p * p.log2();
    }

    entropy
}

/// Statistics for one compression operation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompressionStats {
    /// Original size in bytes
    pub input_size: usize,
    /// Serialized artifact size in bytes
    pub output_size: usize,
    /// Compression ratio (output/input)
    pub compression_ratio: f64,
    /// Bits per symbol achieved
    pub bits_per_symbol: f64,
    /// Theoretical entropy of the input
    pub entropy: f64,
    /// Encoding efficiency (theoretical / actual)
    pub efficiency: f64,
}

impl CompressionStats {
    /// Create statistics from measured sizes and input entropy
    pub fn new(input_size: usize, output_size: usize, entropy: f64) -> Self {
        let compression_ratio = if input_size > 0 {
            output_size as f64 / input_size as f64
        } else {
            0.0
        };

        let bits_per_symbol = if input_size > 0 {
            (output_size * 8) as f64 / input_size as f64
        } else {
            0.0
        };

        let efficiency = if bits_per_symbol > 0.0 {
            entropy / bits_per_symbol
        } else {
            0.0
        };

        Self {
            input_size,
            output_size,
            compression_ratio,
            bits_per_symbol,
            entropy,
            efficiency,
        }
    }

    /// Calculate space savings as a percentage
    pub fn space_savings(&self) -> f64 {
        (1.0 - self.compression_ratio) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_tags() {
        for algorithm in [Algorithm::Huffman, Algorithm::Rle] {
            assert_eq!(Algorithm::from_tag(algorithm.tag()), Some(algorithm));
        }
        assert_eq!(Algorithm::from_tag(7), None);
        assert_eq!(Algorithm::default(), Algorithm::Huffman);
    }

    #[test]
    fn test_selection_prefers_rle_for_runs() {
        let runs: Vec<u8> = [vec![0u8; 500], vec![255u8; 500]].concat();
        assert_eq!(Algorithm::select_for_pixels(&runs), Algorithm::Rle);
    }

    #[test]
    fn test_selection_prefers_huffman_for_mixed_data() {
        let mixed: Vec<u8> = (0..=255u8).cycle().take(1024).collect();
        assert_eq!(Algorithm::select_for_pixels(&mixed), Algorithm::Huffman);
        assert_eq!(Algorithm::select_for_pixels(&[]), Algorithm::Huffman);
    }

    #[test]
    fn test_shannon_entropy() {
        // Uniform distribution reaches the 8-bit maximum
        let uniform: Vec<u8> = (0..=255u8).collect();
        assert!((shannon_entropy(&uniform) - 8.0).abs() < 0.001);

        // A single repeated symbol carries no information
        let constant = vec![42u8; 100];
        assert!(shannon_entropy(&constant) < 0.001);

        assert_eq!(shannon_entropy(&[]), 0.0);
    }

    #[test]
    fn test_stats_calculation() {
        let stats = CompressionStats::new(1000, 600, 4.5);
        assert!((stats.compression_ratio - 0.6).abs() < 0.001);
        assert!((stats.bits_per_symbol - 4.8).abs() < 0.001);
        assert!((stats.efficiency - 0.9375).abs() < 0.001);
        assert!((stats.space_savings() - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_stats_empty_input() {
        let stats = CompressionStats::new(0, 0, 0.0);
        assert_eq!(stats.compression_ratio, 0.0);
        assert_eq!(stats.bits_per_symbol, 0.0);
        assert_eq!(stats.efficiency, 0.0);
    }
}
