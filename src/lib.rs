pub mod config;
pub mod dsp;
pub mod error;
pub mod graph; // Channel nodes and parameter automation
pub mod io; // Inbound events and producer-side conversions
pub mod synth; // Channel lifecycle, routing and mixing

pub use config::MixerConfig;
pub use error::MixerError;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_BLOCK_SIZE: usize = 128;
pub const CHANNEL_COUNT: usize = 4;
