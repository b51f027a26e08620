//! Benchmarks for complete mixer renders.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use chiptune_dsp::{
    dsp::NoiseMode,
    io::{converter, ChannelEvent},
    synth::{self, ChannelMixer, MixerHandle},
    MixerConfig,
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn playing_mixer(block_size: usize) -> (MixerHandle, ChannelMixer) {
    let config = MixerConfig::default().block_size(block_size);
    let (handle, mut mixer, init) = synth::mixer(SAMPLE_RATE, config).expect("loader spawns");
    init.wait().expect("channels load");
    mixer.process_messages();

    handle.dispatch(
        1,
        ChannelEvent::SquareNote {
            hz: 440.0,
            duty: 0.5,
            volume: 0.5,
        },
    );
    handle.dispatch(
        2,
        ChannelEvent::SquareNote {
            hz: 660.0,
            duty: 0.25,
            volume: 0.5,
        },
    );
    handle.dispatch(3, ChannelEvent::TriangleNote { hz: 110.0 });
    handle.set_channel_volume(3, 0.8);
    handle.dispatch(
        4,
        ChannelEvent::NoiseNote {
            hz: converter::noise_hz(4),
            volume: 0.3,
            mode: NoiseMode::Long,
        },
    );
    (handle, mixer)
}

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mixer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === STEADY: all four channels sounding, no new events ===
        let (_handle, mut mixer) = playing_mixer(size);
        group.bench_with_input(BenchmarkId::new("4_channel", size), &size, |b, _| {
            b.iter(|| {
                mixer.render_block(black_box(&mut buffer));
            })
        });

        // === BUSY: a pitch change on every pulse channel each block ===
        let (handle, mut mixer) = playing_mixer(size);
        let mut timer = 200u16;
        group.bench_with_input(BenchmarkId::new("4_channel_events", size), &size, |b, _| {
            b.iter(|| {
                timer = if timer > 1_000 { 200 } else { timer + 7 };
                let hz = converter::timer_to_hz(timer);
                for channel in [1, 2] {
                    handle.dispatch(
                        channel,
                        ChannelEvent::SquareNote {
                            hz,
                            duty: 0.5,
                            volume: 0.5,
                        },
                    );
                }
                mixer.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
