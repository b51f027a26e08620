//! chiptune - plays a short demo through the default output device
//!
//! Run with: cargo run --bin chiptune
//! Set CHIPTUNE_LOG=debug for lifecycle logging.

use std::{thread::sleep, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{info, LevelFilter};

use chiptune_dsp::{
    io::{converter, ChannelEvent},
    synth::{self, InitOutcome, MixerHandle},
    MixerConfig, MAX_BLOCK_SIZE,
};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    setup_logger()?;

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    info!("Output: {sample_rate} Hz, {channels} channel(s)");

    let (handle, mut mixer, init) = synth::mixer(sample_rate, MixerConfig::default())?;

    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                let block = &mut render_buf[..frames_to_render];
                mixer.render_block(block);

                // Copy to output (mono to all channels)
                let out_off = frames_written * channels;
                for (i, &s) in block.iter().enumerate() {
                    for ch in 0..channels {
                        data[out_off + i * channels + ch] = s;
                    }
                }

                frames_written += frames_to_render;
            }
        },
        |err| log::error!("Audio error: {err}"),
        None,
    )?;
    stream.play().wrap_err("failed to start output stream")?;

    match init.wait()? {
        InitOutcome::Delivered => info!("Channels ready"),
        InitOutcome::Superseded => return Err(eyre!("channel initialization was superseded")),
    }

    play_demo(&handle);
    Ok(())
}

fn play_demo(handle: &MixerHandle) {
    let second = Duration::from_millis(1000);

    // Noise powers on audible
    handle.set_channel_volume(4, 0.0);

    info!("Square 440 Hz, 50% duty");
    handle.dispatch(
        1,
        ChannelEvent::SquareNote {
            hz: 440.0,
            duty: 0.5,
            volume: 0.5,
        },
    );
    sleep(second);

    info!("Square 380 Hz, 25% duty");
    handle.dispatch(
        1,
        ChannelEvent::SquareNote {
            hz: 380.0,
            duty: 0.25,
            volume: 0.5,
        },
    );
    sleep(second);
    handle.set_channel_volume(1, 0.0);

    info!("Long noise");
    handle.dispatch(
        4,
        ChannelEvent::NoiseNote {
            hz: converter::noise_hz(2),
            volume: 0.5,
            mode: converter::noise_mode_from_flag(false),
        },
    );
    sleep(second);

    info!("Short noise");
    handle.dispatch(
        4,
        ChannelEvent::NoiseNote {
            hz: converter::noise_hz(9),
            volume: 0.5,
            mode: converter::noise_mode_from_flag(true),
        },
    );
    sleep(second);
    handle.set_channel_volume(4, 0.0);

    info!("Triangle 440 Hz");
    handle.set_channel_volume(3, 0.5);
    handle.dispatch(3, ChannelEvent::TriangleNote { hz: 440.0 });
    sleep(second);

    info!("Arpeggio at half master volume");
    handle.set_master_volume(0.5);
    let start = handle.current_frame();
    let step = 6_000;
    for (i, timer) in [253u16, 200, 168, 126].into_iter().enumerate() {
        let hz = converter::timer_to_hz(timer);
        handle.dispatch_at(3, ChannelEvent::TriangleNote { hz }, start + step * i as u64);
    }
    sleep(second);
}

fn setup_logger() -> EyreResult<()> {
    let level = std::env::var("CHIPTUNE_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .wrap_err("failed to install logger")
}
