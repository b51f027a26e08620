//! Benchmarks for the noise shift register.

use std::hint::black_box;

use criterion::Criterion;
use chiptune_dsp::dsp::{NoiseMode, NoiseSequence};

pub fn bench_noise_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise_sequence");

    for mode in [NoiseMode::Long, NoiseMode::Short] {
        let mut sequence = NoiseSequence::new(mode);
        group.bench_function(format!("{mode:?}").to_lowercase(), |b| {
            b.iter(|| {
                let mut ones = 0u32;
                for _ in 0..1024 {
                    ones += black_box(sequence.next()) as u32;
                }
                ones
            })
        });
    }

    group.finish();
}
