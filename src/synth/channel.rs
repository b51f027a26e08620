use std::fmt;

use crate::{
    error::MixerError,
    graph::node::ChannelNode,
    io::event::{ChannelEvent, ChannelKind},
    synth::factory::ChannelFactory,
    CHANNEL_COUNT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Uninitialized, // No node yet (startup, reset, failed load)
    Ready,         // Node installed, accepting events
}

/// One mixer slot and, when ready, the node that renders it.
pub enum ChannelSlot {
    Uninitialized,
    Ready(Box<dyn ChannelNode>),
}

impl ChannelSlot {
    pub fn state(&self) -> SlotState {
        match self {
            ChannelSlot::Uninitialized => SlotState::Uninitialized,
            ChannelSlot::Ready(_) => SlotState::Ready,
        }
    }

    pub fn node_mut(&mut self) -> Option<&mut Box<dyn ChannelNode>> {
        match self {
            ChannelSlot::Uninitialized => None,
            ChannelSlot::Ready(node) => Some(node),
        }
    }
}

impl fmt::Debug for ChannelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelSlot::Uninitialized => f.write_str("Uninitialized"),
            ChannelSlot::Ready(node) => write!(f, "Ready({:?})", node.kind()),
        }
    }
}

/// The four slots, replaced as a unit on (re)initialization.
#[derive(Debug)]
pub struct ChannelBank {
    slots: [ChannelSlot; CHANNEL_COUNT],
}

impl ChannelBank {
    pub fn uninitialized() -> Self {
        Self {
            slots: std::array::from_fn(|_| ChannelSlot::Uninitialized),
        }
    }

    /// Build a ready node for every slot. The first failure aborts the whole
    /// bank so a partial set is never produced.
    pub fn load(factory: &dyn ChannelFactory) -> Result<Self, MixerError> {
        let mut bank = Self::uninitialized();

        for (index, slot) in bank.slots.iter_mut().enumerate() {
            let channel = index as u8 + 1;
            let Some(kind) = ChannelKind::for_channel(channel) else {
                continue;
            };

            let node = factory.create(channel, kind)?;
            if node.kind() != kind {
                return Err(MixerError::ChannelLoad {
                    channel,
                    kind,
                    reason: format!("factory produced a {:?} node", node.kind()),
                });
            }

            *slot = ChannelSlot::Ready(node);
        }

        Ok(bank)
    }

    /// Slot for a 1-based channel index.
    pub fn slot(&self, channel: u8) -> Option<&ChannelSlot> {
        let index = (channel as usize).checked_sub(1)?;
        self.slots.get(index)
    }

    fn slot_mut(&mut self, channel: u8) -> Option<&mut ChannelSlot> {
        let index = (channel as usize).checked_sub(1)?;
        self.slots.get_mut(index)
    }

    pub fn state(&self, channel: u8) -> SlotState {
        self.slot(channel)
            .map_or(SlotState::Uninitialized, ChannelSlot::state)
    }

    pub fn is_ready(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| slot.state() == SlotState::Ready)
    }

    /// Drop every node and return all slots to `Uninitialized`.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = ChannelSlot::Uninitialized;
        }
    }

    pub fn ready_nodes_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ChannelNode>> {
        self.slots.iter_mut().filter_map(ChannelSlot::node_mut)
    }

    /// Route an event to its channel. Returns false when the slot is not
    /// ready, the index is unknown, or the variant does not match the slot.
    pub fn dispatch(&mut self, channel: u8, event: &ChannelEvent, frame: u64) -> bool {
        let accepted = ChannelKind::for_channel(channel).is_some_and(|kind| kind.accepts(event));
        if !accepted {
            return false;
        }

        match self.slot_mut(channel).and_then(ChannelSlot::node_mut) {
            Some(node) => node.schedule(event, frame),
            None => false,
        }
    }

    pub fn set_volume(&mut self, channel: u8, volume: f32, frame: u64) -> bool {
        match self.slot_mut(channel).and_then(ChannelSlot::node_mut) {
            Some(node) => {
                node.schedule_volume(volume, frame);
                true
            }
            None => false,
        }
    }
}

impl Default for ChannelBank {
    fn default() -> Self {
        Self::uninitialized()
    }
}
