//! Benchmarks for signal mixing operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use chiptune_dsp::dsp::mix;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let signal_a: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let signal_b: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();

        let mut buffer = signal_a.clone();
        group.bench_with_input(BenchmarkId::new("sum_in_place", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&signal_a);
                mix::sum_in_place(black_box(&mut buffer), black_box(&signal_b));
            })
        });

        // Master gain then clip, as applied once per block
        let mut buffer = signal_a.clone();
        group.bench_with_input(BenchmarkId::new("gain_and_clip", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&signal_a);
                mix::apply_gain(black_box(&mut buffer), black_box(1.7));
                mix::hard_clip_in_place(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
