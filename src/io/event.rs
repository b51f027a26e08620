#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::noise::NoiseMode;

/// Parameter change sent by the emulator for one channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelEvent {
    SquareNote { hz: f32, duty: f32, volume: f32 },
    TriangleNote { hz: f32 },
    NoiseNote { hz: f32, volume: f32, mode: NoiseMode },
}

impl ChannelEvent {
    /// Kind of channel this event is addressed to.
    pub fn kind(&self) -> ChannelKind {
        match self {
            ChannelEvent::SquareNote { .. } => ChannelKind::Pulse,
            ChannelEvent::TriangleNote { .. } => ChannelKind::Triangle,
            ChannelEvent::NoiseNote { .. } => ChannelKind::Noise,
        }
    }
}

/// What a channel slot generates. Fixed by the slot index.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Pulse,
    Triangle,
    Noise,
}

impl ChannelKind {
    /// Channels 1 and 2 are pulse, 3 is triangle, 4 is noise.
    pub fn for_channel(channel: u8) -> Option<Self> {
        match channel {
            1 | 2 => Some(ChannelKind::Pulse),
            3 => Some(ChannelKind::Triangle),
            4 => Some(ChannelKind::Noise),
            _ => None,
        }
    }

    pub fn accepts(&self, event: &ChannelEvent) -> bool {
        event.kind() == *self
    }
}
