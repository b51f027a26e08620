use crate::{
    error::MixerError,
    graph::{node::ChannelNode, noise::NoiseNode, pulse::PulseNode, triangle::TriangleNode},
    io::event::ChannelKind,
};

/// Builds the node for a channel slot
///
/// This is the "module load" step of channel initialization. It runs on the
/// loader thread, never on the render path, and may fail; a failure aborts
/// the whole initialization attempt.
pub trait ChannelFactory: Send + Sync {
    fn create(&self, channel: u8, kind: ChannelKind) -> Result<Box<dyn ChannelNode>, MixerError>;
}

impl<F> ChannelFactory for F
where
    F: Fn(u8, ChannelKind) -> Result<Box<dyn ChannelNode>, MixerError> + Send + Sync,
{
    fn create(&self, channel: u8, kind: ChannelKind) -> Result<Box<dyn ChannelNode>, MixerError> {
        self(channel, kind)
    }
}

/// Pulse, pulse, triangle, noise with their power-on defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChannels;

impl ChannelFactory for StandardChannels {
    fn create(&self, _channel: u8, kind: ChannelKind) -> Result<Box<dyn ChannelNode>, MixerError> {
        let node: Box<dyn ChannelNode> = match kind {
            ChannelKind::Pulse => Box::new(PulseNode::new()),
            ChannelKind::Triangle => Box::new(TriangleNode::new()),
            ChannelKind::Noise => Box::new(NoiseNode::new()),
        };
        Ok(node)
    }
}
