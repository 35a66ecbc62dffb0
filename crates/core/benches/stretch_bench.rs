//! Benchmark for the stretchhash engine

use std::num::NonZeroU64;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stretchhash_core::{
    Blake3Hash, DerivationRequest, Difficulty, Engine, FixedClock, Miner, Seed, Sha256Hash,
    expand, stretch,
};

fn bench_stretch(c: &mut Criterion) {
    let rounds = NonZeroU64::new(10_000).unwrap_or(NonZeroU64::MIN);

    c.bench_function("stretch_sha256_10k", |b| {
        b.iter(|| stretch::<Sha256Hash>(black_box(b"salt.ish"), black_box(b"giam"), rounds))
    });
    c.bench_function("stretch_blake3_10k", |b| {
        b.iter(|| stretch::<Blake3Hash>(black_box(b"salt.ish"), black_box(b"giam"), rounds))
    });
}

fn bench_expand(c: &mut Criterion) {
    let seed = Seed::from_bytes([0x5A; 32]);

    c.bench_function("expand_128_bytes", |b| {
        b.iter(|| expand::<Sha256Hash>(black_box(&seed), 128))
    });
}

fn bench_derive(c: &mut Criterion) {
    let engine: Engine = Engine::new();
    let request = DerivationRequest::new("salt.ish", "giam", 1_000, 64);

    c.bench_function("derive_1k_64hex", |b| {
        b.iter(|| engine.derive(black_box(&request)))
    });
}

fn bench_mine_genesis(c: &mut Criterion) {
    let Ok(difficulty) = Difficulty::new(1) else {
        return;
    };
    let miner = Miner::new(difficulty).with_clock(FixedClock(1_700_000_000));

    c.bench_function("mine_genesis_d1", |b| b.iter(|| miner.mine_genesis()));
}

criterion_group!(
    benches,
    bench_stretch,
    bench_expand,
    bench_derive,
    bench_mine_genesis
);
criterion_main!(benches);
