//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use chiptune_dsp::dsp::{
    oscillator::{NoiseOscillator, PulseOscillator, TriangleOscillator},
    NoiseMode,
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Pulse - compare per sample, broadcast params
        let mut osc = PulseOscillator::new();
        group.bench_with_input(BenchmarkId::new("pulse", size), &size, |b, _| {
            b.iter(|| {
                osc.render(
                    black_box(&mut buffer),
                    SAMPLE_RATE,
                    black_box(&[440.0]),
                    black_box(&[0.25]),
                    black_box(&[0.8]),
                );
            })
        });

        // Pulse with a per-sample frequency sweep
        let sweep: Vec<f32> = (0..size).map(|i| 220.0 + i as f32).collect();
        let mut osc = PulseOscillator::new();
        group.bench_with_input(BenchmarkId::new("pulse_sweep", size), &size, |b, _| {
            b.iter(|| {
                osc.render(
                    black_box(&mut buffer),
                    SAMPLE_RATE,
                    black_box(&sweep),
                    black_box(&[0.5]),
                    black_box(&[0.8]),
                );
            })
        });

        let mut osc = TriangleOscillator::new();
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| {
                osc.render(
                    black_box(&mut buffer),
                    SAMPLE_RATE,
                    black_box(&[440.0]),
                    black_box(&[1.0]),
                );
            })
        });

        // Noise - register clocked well above the sample rate
        let mut osc = NoiseOscillator::new(NoiseMode::Long);
        group.bench_with_input(BenchmarkId::new("noise", size), &size, |b, _| {
            b.iter(|| {
                osc.render(
                    black_box(&mut buffer),
                    SAMPLE_RATE,
                    black_box(&[20_000.0]),
                    black_box(&[1.0]),
                    black_box(&[NoiseMode::Long]),
                );
            })
        });
    }

    group.finish();
}
