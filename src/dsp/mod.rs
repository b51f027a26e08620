//! Low-level DSP primitives used by the channel nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside channel structs. They stay focused on the
//! signal-generation math; scheduling and routing live in `graph` and `synth`.

/// Bus summing, gain and clipping.
pub mod mix;
/// 15-bit linear feedback shift register for the noise channel.
pub mod noise;
/// Pulse, triangle and noise oscillator kernels.
pub mod oscillator;
/// Phase accumulator shared by every oscillator.
pub mod phase;

pub use noise::{NoiseMode, NoiseSequence};
pub use phase::Phase;
