use std::sync::{
    atomic::{AtomicU32, AtomicU64, Ordering},
    Arc,
};

use rtrb::Consumer;

use crate::{
    dsp::mix,
    graph::node::RenderCtx,
    synth::{
        channel::{ChannelBank, SlotState},
        message::MixerMessage,
    },
    MAX_BLOCK_SIZE,
};

/// State both sides read without locking.
///
/// - generation: latest requested initialization; slots from older ones are stale
/// - master_volume: f32 bits, read at the start of every render call
/// - frame: render clock, frames rendered so far
#[derive(Debug)]
pub(crate) struct SharedState {
    pub generation: AtomicU64,
    pub master_volume: AtomicU32,
    pub frame: AtomicU64,
}

impl SharedState {
    pub fn new(master_volume: f32) -> Self {
        Self {
            generation: AtomicU64::new(0),
            master_volume: AtomicU32::new(master_volume.to_bits()),
            frame: AtomicU64::new(0),
        }
    }

    pub fn master_volume(&self) -> f32 {
        f32::from_bits(self.master_volume.load(Ordering::Acquire))
    }
}

/// Render side of the mixer. Owned by the audio callback.
///
/// Every call drains pending control messages, then renders the four slots
/// in quanta of `block_size` frames and sums them into the output. Slots
/// that are not ready contribute silence; nothing here can fail.
pub struct ChannelMixer {
    rx: Consumer<MixerMessage>,
    shared: Arc<SharedState>,
    bank: ChannelBank,
    bank_generation: u64,
    sample_rate: f32,
    block_size: usize,
    channel_buf: Vec<f32>,
    frame_counter: u64,
}

impl ChannelMixer {
    pub(crate) fn new(
        rx: Consumer<MixerMessage>,
        shared: Arc<SharedState>,
        sample_rate: f32,
        block_size: usize,
    ) -> Self {
        Self {
            rx,
            shared,
            bank: ChannelBank::uninitialized(),
            bank_generation: 0,
            sample_rate,
            block_size: block_size.clamp(1, MAX_BLOCK_SIZE),
            channel_buf: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        }
    }

    /// Fill `out` with the next `out.len()` mono frames.
    pub fn render_block(&mut self, out: &mut [f32]) {
        self.process_messages();

        let master = self.shared.master_volume();
        for chunk in out.chunks_mut(self.block_size) {
            self.render_quantum(chunk, master);
        }

        self.shared.frame.store(self.frame_counter, Ordering::Release);
    }

    /// Apply pending lifecycle changes and control messages without
    /// rendering. `render_block` does this on every call.
    pub fn process_messages(&mut self) {
        self.sync_generation();

        while let Ok(msg) = self.rx.pop() {
            match msg {
                MixerMessage::Dispatch {
                    channel,
                    event,
                    frame,
                } => {
                    // Mismatched variants and unready slots are dropped
                    self.bank.dispatch(channel, &event, frame);
                }
                MixerMessage::SetChannelVolume {
                    channel,
                    volume,
                    frame,
                } => {
                    self.bank.set_volume(channel, volume, frame);
                }
                MixerMessage::Install { generation, bank } => {
                    self.sync_generation();
                    if generation == self.bank_generation {
                        self.bank = *bank;
                    }
                }
            }
        }
    }

    /// Clear the slots when a newer initialization has been requested.
    fn sync_generation(&mut self) {
        let generation = self.shared.generation.load(Ordering::Acquire);
        if generation != self.bank_generation {
            self.bank.clear();
            self.bank_generation = generation;
        }
    }

    fn render_quantum(&mut self, out: &mut [f32], master: f32) {
        out.fill(0.0);

        let ctx = RenderCtx::new(self.sample_rate, self.frame_counter);
        let scratch = &mut self.channel_buf[..out.len()];
        for node in self.bank.ready_nodes_mut() {
            node.render_block(scratch, &ctx);
            mix::sum_in_place(out, scratch);
        }

        mix::apply_gain(out, master);
        mix::hard_clip_in_place(out);

        self.frame_counter += out.len() as u64;
    }

    pub fn slot_state(&self, channel: u8) -> SlotState {
        self.bank.state(channel)
    }

    /// True once all four slots are ready.
    pub fn is_ready(&self) -> bool {
        self.bank.is_ready()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frame_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        io::event::ChannelEvent,
        synth::{factory::StandardChannels, message::MixerMessage},
    };
    use rtrb::RingBuffer;

    fn mixer_with_queue() -> (rtrb::Producer<MixerMessage>, Arc<SharedState>, ChannelMixer) {
        let (tx, rx) = RingBuffer::new(16);
        let shared = Arc::new(SharedState::new(1.0));
        let mixer = ChannelMixer::new(rx, Arc::clone(&shared), 44_100.0, 128);
        (tx, shared, mixer)
    }

    fn install(tx: &mut rtrb::Producer<MixerMessage>, generation: u64) {
        let bank = ChannelBank::load(&StandardChannels).expect("standard channels load");
        tx.push(MixerMessage::Install {
            generation,
            bank: Box::new(bank),
        })
        .expect("queue has room");
    }

    #[test]
    fn renders_silence_before_channels_exist() {
        let (_tx, _shared, mut mixer) = mixer_with_queue();
        let mut out = [1.0f32; 256];
        mixer.render_block(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(mixer.frames_rendered(), 256);
        assert_eq!(mixer.sample_rate(), 44_100.0);
    }

    #[test]
    fn installs_only_current_generation() {
        let (mut tx, shared, mut mixer) = mixer_with_queue();
        shared.generation.store(2, Ordering::Release);

        install(&mut tx, 1);
        mixer.process_messages();
        assert_eq!(mixer.slot_state(1), SlotState::Uninitialized);

        install(&mut tx, 2);
        mixer.process_messages();
        assert!(mixer.is_ready());
    }

    #[test]
    fn newer_generation_clears_slots() {
        let (mut tx, shared, mut mixer) = mixer_with_queue();
        shared.generation.store(1, Ordering::Release);
        install(&mut tx, 1);
        mixer.process_messages();
        assert!(mixer.is_ready());

        shared.generation.store(2, Ordering::Release);
        mixer.process_messages();
        assert_eq!(mixer.slot_state(4), SlotState::Uninitialized);
    }

    #[test]
    fn master_volume_scales_output() {
        let (mut tx, shared, mut mixer) = mixer_with_queue();
        shared.generation.store(1, Ordering::Release);
        install(&mut tx, 1);
        tx.push(MixerMessage::Dispatch {
            channel: 1,
            event: ChannelEvent::SquareNote {
                hz: 440.0,
                duty: 0.5,
                volume: 1.0,
            },
            frame: 0,
        })
        .expect("queue has room");
        shared
            .master_volume
            .store(0.5f32.to_bits(), Ordering::Release);

        let mut out = [0.0f32; 4];
        mixer.render_block(&mut out);
        assert_eq!(out, [0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn output_is_clipped() {
        let (mut tx, shared, mut mixer) = mixer_with_queue();
        shared.generation.store(1, Ordering::Release);
        install(&mut tx, 1);
        for channel in [1, 2] {
            tx.push(MixerMessage::Dispatch {
                channel,
                event: ChannelEvent::SquareNote {
                    hz: 440.0,
                    duty: 0.5,
                    volume: 1.0,
                },
                frame: 0,
            })
            .expect("queue has room");
        }

        let mut out = [0.0f32; 8];
        mixer.render_block(&mut out);
        assert!(out.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn large_requests_are_split_into_quanta() {
        let (_tx, _shared, mut mixer) = mixer_with_queue();
        let mut out = vec![0.0f32; MAX_BLOCK_SIZE * 2 + 7];
        mixer.render_block(&mut out);
        assert_eq!(mixer.frames_rendered(), out.len() as u64);
    }
}
