use crate::io::event::{ChannelEvent, ChannelKind};

/// Context passed to channel nodes during rendering
///
/// - sample_rate: Sink sample rate (e.g., 44100.0)
/// - block_start: Render-clock frame of the first sample in the block
pub struct RenderCtx {
    pub sample_rate: f32,
    pub block_start: u64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32, block_start: u64) -> Self {
        Self {
            sample_rate,
            block_start,
        }
    }
}

/// Core trait for the sound-generating voice in a channel slot
///
/// A node owns its oscillator and automated parameters. Scheduling happens
/// between blocks; `render_block` applies whatever became effective inside
/// the block at sample accuracy.
pub trait ChannelNode: Send {
    fn kind(&self) -> ChannelKind;

    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Schedule the event's parameters to take effect at `frame`.
    ///
    /// Returns false (and changes nothing) when the event belongs to another
    /// kind of channel.
    fn schedule(&mut self, event: &ChannelEvent, frame: u64) -> bool;

    /// Schedule a volume jump independent of any note event.
    fn schedule_volume(&mut self, volume: f32, frame: u64);
}

/// Allow boxed nodes to be used as nodes (for dynamic dispatch)
impl ChannelNode for Box<dyn ChannelNode> {
    fn kind(&self) -> ChannelKind {
        (**self).kind()
    }

    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn schedule(&mut self, event: &ChannelEvent, frame: u64) -> bool {
        (**self).schedule(event, frame)
    }

    fn schedule_volume(&mut self, volume: f32, frame: u64) {
        (**self).schedule_volume(volume, frame)
    }
}

/// Clamp a level parameter (volume, duty) into [0, 1].
#[inline]
pub(crate) fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Frequencies that are not finite and positive are scheduled as 0 Hz.
#[inline]
pub(crate) fn hertz(value: f32) -> f32 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        0.0
    }
}
