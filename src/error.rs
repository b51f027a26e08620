use snafu::prelude::*;

use crate::io::event::ChannelKind;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MixerError {
    #[snafu(display("Failed to load channel {} ({:?}): {}", channel, kind, reason))]
    ChannelLoad {
        channel: u8,
        kind: ChannelKind,
        reason: String,
    },
    #[snafu(display("Failed to spawn channel loader thread"))]
    SpawnLoader { source: std::io::Error },
    #[snafu(display("Channel loader thread panicked"))]
    LoaderPanicked,
    #[snafu(display("Render side of the mixer has been dropped"))]
    Disconnected,
}
