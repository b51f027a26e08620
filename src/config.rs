#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE};

/// Tunables for a mixer pair.
///
/// - block_size: frames rendered per internal quantum (1..=MAX_BLOCK_SIZE)
/// - queue_capacity: control messages the ring buffer can hold between blocks
/// - master_volume: initial master gain (0.0-1.0)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixerConfig {
    pub block_size: usize,
    pub queue_capacity: usize,
    pub master_volume: f32,
}

impl MixerConfig {
    pub fn block_size(mut self, frames: usize) -> Self {
        self.block_size = frames;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn master_volume(mut self, volume: f32) -> Self {
        self.master_volume = volume;
        self
    }

    /// Block size actually used by the renderer.
    pub(crate) fn effective_block_size(&self) -> usize {
        self.block_size.clamp(1, MAX_BLOCK_SIZE)
    }
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            queue_capacity: 256,
            master_volume: 1.0,
        }
    }
}
