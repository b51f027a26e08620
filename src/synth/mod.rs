// Purpose: Channel lifecycle, event routing and mixing
// This layer sits above graph nodes and owns the four mixer slots

pub mod channel;
pub mod factory;
pub mod handle;
pub mod message;
pub mod mixer;

use std::sync::Arc;

use rtrb::RingBuffer;

use crate::{config::MixerConfig, error::MixerError};

pub use channel::{ChannelBank, ChannelSlot, SlotState};
pub use factory::{ChannelFactory, StandardChannels};
pub use handle::{InitOutcome, MixerHandle, PendingInit};
pub use message::MixerMessage;
pub use mixer::ChannelMixer;

/// Create a connected control/render pair using the standard channel set.
///
/// Channel initialization starts right away on a loader thread; the returned
/// `PendingInit` reports how it ends. Until the bank arrives the render side
/// produces silence.
pub fn mixer(
    sample_rate: f32,
    config: MixerConfig,
) -> Result<(MixerHandle, ChannelMixer, PendingInit), MixerError> {
    mixer_with_factory(sample_rate, config, StandardChannels)
}

/// Like [`mixer`], with a custom node factory.
pub fn mixer_with_factory<F>(
    sample_rate: f32,
    config: MixerConfig,
    factory: F,
) -> Result<(MixerHandle, ChannelMixer, PendingInit), MixerError>
where
    F: ChannelFactory + 'static,
{
    let (tx, rx) = RingBuffer::new(config.queue_capacity.max(1));
    let shared = Arc::new(mixer::SharedState::new(0.0));

    let handle = handle::MixerHandle::new(tx, Arc::clone(&shared), Arc::new(factory));
    handle.set_master_volume(config.master_volume);

    let mixer = ChannelMixer::new(rx, shared, sample_rate, config.effective_block_size());
    let init = handle.create_channels()?;
    Ok((handle, mixer, init))
}
