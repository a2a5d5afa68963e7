//! Top-level encode/decode operations
//!
//! The facade the surrounding application calls: it owns the pipeline from
//! flattened pixels to a self-describing artifact and back. Each call is
//! single-threaded and transforms one complete in-memory buffer; the batch
//! helpers parallelize strictly at one-call-per-image granularity.

use crate::container::CompressionArtifact;
use crate::entropy::{
    rle_compress, rle_decompress, shannon_entropy, Algorithm, CodeTable, CompressionStats,
    HuffmanDecoder, HuffmanEncoder, HuffmanTree,
};
use crate::error::{PixoraError, Result};
use crate::image::ImageShape;
use rayon::prelude::*;

/// Encode a flattened pixel buffer with the default Huffman algorithm
///
/// Fails with `InvalidInput` when the buffer length disagrees with the
/// shape's element count. An empty buffer with an empty shape yields an
/// empty artifact rather than an error.
pub fn encode(pixels: &[u8], shape: &ImageShape) -> Result<CompressionArtifact> {
    encode_with(pixels, shape, Algorithm::Huffman)
}

/// Encode with an algorithm chosen from the data itself
pub fn encode_auto(pixels: &[u8], shape: &ImageShape) -> Result<CompressionArtifact> {
    let algorithm = Algorithm::select_for_pixels(pixels);
    log::info!(
        "selected {} for {} pixels (entropy {:.2} bits/symbol)",
        algorithm.name(),
        pixels.len(),
        shannon_entropy(pixels)
    );
    encode_with(pixels, shape, algorithm)
}

/// Encode a flattened pixel buffer with an explicit algorithm
pub fn encode_with(
    pixels: &[u8],
    shape: &ImageShape,
    algorithm: Algorithm,
) -> Result<CompressionArtifact> {
    shape.check_buffer(pixels)?;

    if pixels.is_empty() {
        return Ok(CompressionArtifact::new(
            algorithm,
            shape.clone(),
            0,
            Vec::new(),
            Vec::new(),
        ));
    }

    let artifact = match algorithm {
        Algorithm::Huffman => {
            let tree = HuffmanTree::from_pixels(pixels)?;
            let encoder = HuffmanEncoder::from_table(CodeTable::from_tree(&tree));
            let (payload, bit_len) = encoder.encode(pixels)?;
            CompressionArtifact::new(
                Algorithm::Huffman,
                shape.clone(),
                bit_len,
                encoder.table().entries(),
                payload,
            )
        }
        Algorithm::Rle => {
            let payload = rle_compress(pixels);
            let bit_len = payload.len() as u64 * 8;
            CompressionArtifact::new(Algorithm::Rle, shape.clone(), bit_len, Vec::new(), payload)
        }
    };

    log::debug!(
        "encoded {} pixels of shape {} into {} payload bits via {}",
        pixels.len(),
        shape,
        artifact.bit_len(),
        algorithm.name()
    );

    Ok(artifact)
}

/// Decode an artifact back into the original pixels and shape
///
/// Fails with `CorruptStream` when the payload cannot be resolved against
/// the embedded code table, and with `ShapeMismatch` when the decoded
/// element count disagrees with the declared shape.
pub fn decode(artifact: &CompressionArtifact) -> Result<(Vec<u8>, ImageShape)> {
    let shape = artifact.shape().clone();
    let expected = usize::try_from(shape.element_count()).map_err(|_| {
        PixoraError::corrupt_stream("declared shape exceeds addressable memory")
    })?;

    if expected == 0 && artifact.bit_len() == 0 && artifact.payload().is_empty() {
        return Ok((Vec::new(), shape));
    }

    let pixels = match artifact.algorithm() {
        Algorithm::Huffman => {
            let table = CodeTable::from_codes(artifact.table())?;
            let decoder = HuffmanDecoder::from_code_table(&table)?;
            decoder.decode(artifact.payload(), artifact.bit_len(), expected)?
        }
        Algorithm::Rle => rle_decompress(artifact.payload(), expected)?,
    };

    if pixels.len() != expected {
        return Err(PixoraError::shape_mismatch(
            expected as u64,
            pixels.len() as u64,
        ));
    }

    log::debug!(
        "decoded {} pixels of shape {} via {}",
        pixels.len(),
        shape,
        artifact.algorithm().name()
    );

    Ok((pixels, shape))
}

/// Encode many images in parallel, one call per image
pub fn encode_batch(images: &[(&[u8], ImageShape)]) -> Result<Vec<CompressionArtifact>> {
    images
        .par_iter()
        .map(|(pixels, shape)| encode(pixels, shape))
        .collect()
}

/// Decode many artifacts in parallel, one call per artifact
pub fn decode_batch(artifacts: &[CompressionArtifact]) -> Result<Vec<(Vec<u8>, ImageShape)>> {
    artifacts.par_iter().map(decode).collect()
}

/// Compression statistics for an encoded artifact
///
/// Output size is measured over the full serialized artifact, table and
/// header included, matching what the caller actually persists.
pub fn stats(pixels: &[u8], artifact: &CompressionArtifact) -> Result<CompressionStats> {
    let output_size = artifact.to_bytes()?.len();
    Ok(CompressionStats::new(
        pixels.len(),
        output_size,
        shannon_entropy(pixels),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_round_trip() {
        let shape = ImageShape::new(vec![0]);
        let artifact = encode(&[], &shape).unwrap();
        assert_eq!(artifact.bit_len(), 0);

        let (pixels, decoded_shape) = decode(&artifact).unwrap();
        assert!(pixels.is_empty());
        assert_eq!(decoded_shape, shape);
    }

    #[test]
    fn test_shape_buffer_disagreement_rejected() {
        let err = encode(&[1, 2, 3], &ImageShape::flat(4)).unwrap_err();
        assert_eq!(err.category(), "input");

        // Empty buffer against a non-empty shape
        let err = encode(&[], &ImageShape::flat(4)).unwrap_err();
        assert_eq!(err.category(), "input");
    }

    #[test]
    fn test_rle_round_trip() {
        let pixels = [vec![7u8; 40], vec![9u8; 24]].concat();
        let shape = ImageShape::hw(8, 8);
        let artifact = encode_with(&pixels, &shape, Algorithm::Rle).unwrap();
        assert_eq!(artifact.algorithm(), Algorithm::Rle);
        assert!(artifact.table().is_empty());

        let (decoded, decoded_shape) = decode(&artifact).unwrap();
        assert_eq!(decoded, pixels);
        assert_eq!(decoded_shape, shape);
    }

    #[test]
    fn test_auto_selects_rle_for_runs() {
        let pixels = vec![0u8; 64];
        let artifact = encode_auto(&pixels, &ImageShape::hw(8, 8)).unwrap();
        assert_eq!(artifact.algorithm(), Algorithm::Rle);
        assert_eq!(decode(&artifact).unwrap().0, pixels);
    }

    #[test]
    fn test_batch_round_trip() {
        let a: Vec<u8> = (0..=255u8).collect();
        let b = vec![3u8; 100];
        let images: Vec<(&[u8], ImageShape)> = vec![
            (a.as_slice(), ImageShape::flat(256)),
            (b.as_slice(), ImageShape::hwc(5, 5, 4)),
        ];

        let artifacts = encode_batch(&images).unwrap();
        let decoded = decode_batch(&artifacts).unwrap();

        assert_eq!(decoded[0].0, a);
        assert_eq!(decoded[1].0, b);
        assert_eq!(decoded[1].1, ImageShape::hwc(5, 5, 4));
    }

    #[test]
    fn test_stats() {
        let pixels = vec![1u8; 1000];
        let artifact = encode(&pixels, &ImageShape::flat(1000)).unwrap();
        let stats = stats(&pixels, &artifact).unwrap();

        assert_eq!(stats.input_size, 1000);
        assert!(stats.output_size < 1000);
        assert!(stats.space_savings() > 0.0);
    }
}
