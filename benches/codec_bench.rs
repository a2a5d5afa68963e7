use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pixora::{decode, encode, encode_with, Algorithm, ImageShape};

fn generate_test_data(size: usize, entropy_level: f64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);

    if entropy_level < 1.0 {
        // Low entropy - mostly repeated bytes
        let pattern = (entropy_level * 256.0) as u8;
        for _ in 0..size {
            data.push(pattern);
        }
    } else if entropy_level < 4.0 {
        // Medium entropy - short repeating pattern
        let pattern_size = (8.0 / entropy_level) as usize;
        let pattern: Vec<u8> = (0..pattern_size).map(|i| i as u8).collect();
        for i in 0..size {
            data.push(pattern[i % pattern.len()]);
        }
    } else {
        // High entropy - hash-mixed bytes
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        for i in 0..size {
            let mut hasher = DefaultHasher::new();
            i.hash(&mut hasher);
            entropy_level.to_bits().hash(&mut hasher);
            data.push((hasher.finish() % 256) as u8);
        }
    }

    data
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let sizes = [1024, 65536];
    let entropy_levels = [0.5, 2.0, 6.0];

    for &size in &sizes {
        for &entropy in &entropy_levels {
            let data = generate_test_data(size, entropy);
            let shape = ImageShape::flat(size as u32);

            group.bench_with_input(
                BenchmarkId::new("huffman", format!("{}_{}", size, entropy)),
                &data,
                |b, data| {
                    b.iter(|| {
                        let artifact = encode(data, &shape).unwrap();
                        black_box(artifact);
                    });
                },
            );

            group.bench_with_input(
                BenchmarkId::new("rle", format!("{}_{}", size, entropy)),
                &data,
                |b, data| {
                    b.iter(|| {
                        let artifact = encode_with(data, &shape, Algorithm::Rle).unwrap();
                        black_box(artifact);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for &entropy in &[0.5, 2.0, 6.0] {
        let data = generate_test_data(65536, entropy);
        let shape = ImageShape::flat(65536);
        let artifact = encode(&data, &shape).unwrap();

        group.bench_with_input(
            BenchmarkId::new("huffman", format!("{}", entropy)),
            &artifact,
            |b, artifact| {
                b.iter(|| {
                    let (pixels, _) = decode(artifact).unwrap();
                    black_box(pixels);
                });
            },
        );
    }

    group.finish();
}

fn bench_wire_format(c: &mut Criterion) {
    let data = generate_test_data(65536, 2.0);
    let shape = ImageShape::flat(65536);
    let artifact = encode(&data, &shape).unwrap();
    let bytes = artifact.to_bytes().unwrap();

    c.bench_function("artifact_to_bytes", |b| {
        b.iter(|| black_box(artifact.to_bytes().unwrap()));
    });

    c.bench_function("artifact_from_bytes", |b| {
        b.iter(|| black_box(pixora::CompressionArtifact::from_bytes(&bytes).unwrap()));
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_wire_format);
criterion_main!(benches);
