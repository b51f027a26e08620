//! Real-world scenario benchmarks.
//!
//! These drive the full mixer the way an audio callback does: control
//! messages queued between blocks, four channels rendered and summed.

mod mixer;

pub use mixer::bench_mixer;
