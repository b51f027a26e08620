use crate::{io::event::ChannelEvent, synth::channel::ChannelBank};

/// Control → render messages carried by the mixer's ring buffer.
#[derive(Debug)]
pub enum MixerMessage {
    Dispatch {
        channel: u8,
        event: ChannelEvent,
        frame: u64,
    },
    SetChannelVolume {
        channel: u8,
        volume: f32,
        frame: u64,
    },
    /// A fully built bank for initialization `generation`.
    Install {
        generation: u64,
        bank: Box<ChannelBank>,
    },
}
