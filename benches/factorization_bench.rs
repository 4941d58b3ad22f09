//! Criterion benchmarks for tree construction and factorization.

use batlz::{factorize, SuffixTree};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_text(len: usize, alphabet: u8, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| b'a' + rng.gen_range(0..alphabet)).collect()
}

fn periodic_text(len: usize, period: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % period) as u8).collect()
}

fn bench_tree_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_construction");
    for &len in &[1 << 10, 1 << 14, 1 << 16] {
        let text = random_text(len, 4, 7);
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| SuffixTree::build(black_box(text)).unwrap());
        });
    }
    group.finish();
}

fn bench_factorization(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorization");

    for &len in &[1 << 10, 1 << 14] {
        let text = random_text(len, 4, 42);
        group.bench_with_input(BenchmarkId::new("random", len), &text, |b, text| {
            b.iter(|| factorize(black_box(text), 8));
        });
    }

    let text = periodic_text(1 << 12, 3);
    group.bench_with_input(BenchmarkId::new("periodic", 1 << 12), &text, |b, text| {
        b.iter(|| factorize(black_box(text), 8));
    });

    group.finish();
}

criterion_group!(benches, bench_tree_construction, bench_factorization);
criterion_main!(benches);
