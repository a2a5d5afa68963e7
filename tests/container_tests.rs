//! Artifact container and corruption-handling tests
//!
//! The container is the trust boundary: artifacts come back from external
//! storage, so every malformation must surface as a typed error rather than
//! wrong pixels or an unbounded decode loop.

use pixora::{decode, encode, Algorithm, CompressionArtifact, ImageShape, PixoraError};
use std::io::{Read, Write};

fn sample_pixels() -> Vec<u8> {
    let mut pixels = vec![10u8; 300];
    pixels.extend((0..200).map(|i| (i % 17) as u8));
    pixels
}

#[test]
fn test_wire_round_trip_through_file() {
    let pixels = sample_pixels();
    let shape = ImageShape::flat(pixels.len() as u32);
    let artifact = encode(&pixels, &shape).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&artifact.to_bytes().unwrap()).unwrap();
    file.flush().unwrap();

    let mut bytes = Vec::new();
    std::fs::File::open(file.path())
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();

    let restored = CompressionArtifact::from_bytes(&bytes).unwrap();
    assert_eq!(restored, artifact);
    assert_eq!(decode(&restored).unwrap().0, pixels);
}

#[test]
fn test_truncated_artifact_is_corrupt() {
    let pixels = sample_pixels();
    let artifact = encode(&pixels, &ImageShape::flat(pixels.len() as u32)).unwrap();
    let bytes = artifact.to_bytes().unwrap();

    // Dropping the final byte must never decode to wrong data or hang
    let err = CompressionArtifact::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(matches!(err, PixoraError::CorruptStream { .. }));
}

#[test]
fn test_every_truncation_point_is_corrupt() {
    let pixels = sample_pixels();
    let artifact = encode(&pixels, &ImageShape::flat(pixels.len() as u32)).unwrap();
    let bytes = artifact.to_bytes().unwrap();

    for cut in 0..bytes.len() {
        let err = CompressionArtifact::from_bytes(&bytes[..cut]).unwrap_err();
        assert!(
            matches!(err, PixoraError::CorruptStream { .. }),
            "truncation to {} bytes must be CorruptStream",
            cut
        );
    }
}

#[test]
fn test_truncated_payload_is_corrupt() {
    let pixels = sample_pixels();
    let artifact = encode(&pixels, &ImageShape::flat(pixels.len() as u32)).unwrap();

    let mut shortened = artifact.payload().to_vec();
    shortened.pop();
    let tampered = CompressionArtifact::new(
        Algorithm::Huffman,
        artifact.shape().clone(),
        artifact.bit_len(),
        artifact.table().to_vec(),
        shortened,
    );

    let err = decode(&tampered).unwrap_err();
    assert!(matches!(err, PixoraError::CorruptStream { .. }));
}

#[test]
fn test_shape_larger_than_stream_is_mismatch() {
    let pixels = [1u8, 1, 1, 1, 2, 2, 3];
    let artifact = encode(&pixels, &ImageShape::flat(7)).unwrap();

    // Same table and payload, but the header claims an extra element:
    // the bits run out cleanly one symbol short
    let tampered = CompressionArtifact::new(
        Algorithm::Huffman,
        ImageShape::flat(8),
        artifact.bit_len(),
        artifact.table().to_vec(),
        artifact.payload().to_vec(),
    );

    let err = decode(&tampered).unwrap_err();
    assert!(matches!(err, PixoraError::ShapeMismatch { expected: 8, actual: 7 }));
}

#[test]
fn test_shape_smaller_than_stream_is_corrupt() {
    let pixels = [1u8, 1, 1, 1, 2, 2, 3];
    let artifact = encode(&pixels, &ImageShape::flat(7)).unwrap();

    let tampered = CompressionArtifact::new(
        Algorithm::Huffman,
        ImageShape::flat(6),
        artifact.bit_len(),
        artifact.table().to_vec(),
        artifact.payload().to_vec(),
    );

    let err = decode(&tampered).unwrap_err();
    assert!(matches!(err, PixoraError::CorruptStream { .. }));
}

#[test]
fn test_bad_magic_version_and_algorithm() {
    let pixels = sample_pixels();
    let artifact = encode(&pixels, &ImageShape::flat(pixels.len() as u32)).unwrap();
    let bytes = artifact.to_bytes().unwrap();

    let mut bad_magic = bytes.clone();
    bad_magic[0] = b'X';
    assert!(CompressionArtifact::from_bytes(&bad_magic).is_err());

    let mut bad_version = bytes.clone();
    bad_version[4] = 200;
    assert!(CompressionArtifact::from_bytes(&bad_version).is_err());

    let mut bad_algorithm = bytes;
    bad_algorithm[5] = 9;
    assert!(CompressionArtifact::from_bytes(&bad_algorithm).is_err());
}

#[test]
fn test_trailing_garbage_is_corrupt() {
    let pixels = sample_pixels();
    let artifact = encode(&pixels, &ImageShape::flat(pixels.len() as u32)).unwrap();
    let mut bytes = artifact.to_bytes().unwrap();
    bytes.extend_from_slice(b"junk");

    let err = CompressionArtifact::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, PixoraError::CorruptStream { .. }));
}

#[test]
fn test_rle_artifact_wire_round_trip() {
    let pixels = vec![42u8; 1000];
    let shape = ImageShape::hw(25, 40);
    let artifact = pixora::encode_with(&pixels, &shape, Algorithm::Rle).unwrap();

    let bytes = artifact.to_bytes().unwrap();
    let restored = CompressionArtifact::from_bytes(&bytes).unwrap();
    assert_eq!(restored.algorithm(), Algorithm::Rle);

    let (decoded, decoded_shape) = decode(&restored).unwrap();
    assert_eq!(decoded, pixels);
    assert_eq!(decoded_shape, shape);
}
