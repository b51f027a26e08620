//! Benchmarks for low-level DSP primitives.

mod mix;
mod noise;
mod oscillator;

pub use mix::bench_mix;
pub use noise::bench_noise_sequence;
pub use oscillator::bench_oscillator;
