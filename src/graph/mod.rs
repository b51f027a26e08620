//! Channel nodes: oscillator kernels paired with automated parameters.
//!
//! Nodes wrap the low-level DSP primitives with what a mixer slot needs:
//! event scheduling, sample-accurate parameter changes, and block-based
//! rendering behind one `ChannelNode` trait.

/// Noise channel node.
pub mod noise;
/// Core trait shared by all channel nodes.
pub mod node;
/// Step-function parameter timelines.
pub mod param;
/// Pulse channel node.
pub mod pulse;
/// Triangle channel node.
pub mod triangle;

pub use node::{ChannelNode, RenderCtx};
pub use param::AutomatedParam;
