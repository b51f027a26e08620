use std::{
    sync::{
        atomic::Ordering,
        Arc, Mutex, MutexGuard, PoisonError,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, error, info, warn};
use rtrb::{Producer, PushError};
use snafu::ResultExt;

use crate::{
    error::{MixerError, SpawnLoaderSnafu},
    io::event::ChannelEvent,
    synth::{
        channel::ChannelBank, factory::ChannelFactory, message::MixerMessage,
        mixer::SharedState,
    },
    CHANNEL_COUNT,
};

const INSTALL_RETRY: Duration = Duration::from_millis(2);

/// Control side of the mixer. Cheap to clone; every clone talks to the same
/// render side.
///
/// Nothing here touches the audio thread directly: events and volume changes
/// travel through a lock-free ring buffer and are applied at the start of the
/// next rendered block.
#[derive(Clone)]
pub struct MixerHandle {
    tx: Arc<Mutex<Producer<MixerMessage>>>,
    shared: Arc<SharedState>,
    factory: Arc<dyn ChannelFactory>,
}

impl MixerHandle {
    pub(crate) fn new(
        tx: Producer<MixerMessage>,
        shared: Arc<SharedState>,
        factory: Arc<dyn ChannelFactory>,
    ) -> Self {
        Self {
            tx: Arc::new(Mutex::new(tx)),
            shared,
            factory,
        }
    }

    /// Start building all four channels on a loader thread.
    ///
    /// Any earlier initialization is superseded immediately: the render side
    /// drops its current slots on the next block, and a bank produced by an
    /// older request is discarded when it arrives.
    pub fn create_channels(&self) -> Result<PendingInit, MixerError> {
        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        debug!("Requesting channel initialization #{generation}");

        let tx = Arc::clone(&self.tx);
        let shared = Arc::clone(&self.shared);
        let factory = Arc::clone(&self.factory);

        let join = thread::Builder::new()
            .name(format!("channel-loader-{generation}"))
            .spawn(move || load_channels(generation, factory.as_ref(), &tx, &shared))
            .context(SpawnLoaderSnafu)?;

        Ok(PendingInit { generation, join })
    }

    /// Drop every channel and initialize again from scratch.
    pub fn reset(&self) -> Result<PendingInit, MixerError> {
        info!("Resetting mixer channels");
        self.create_channels()
    }

    /// Apply `event` to a channel at the start of the next rendered block.
    pub fn dispatch(&self, channel: u8, event: ChannelEvent) {
        self.dispatch_at(channel, event, self.current_frame());
    }

    /// Apply `event` at render-clock `frame`. Frames already rendered take
    /// effect at the start of the next block.
    pub fn dispatch_at(&self, channel: u8, event: ChannelEvent, frame: u64) {
        if !is_channel(channel) {
            debug!("Dropping {:?} for unknown channel {channel}", event.kind());
            return;
        }

        self.send(MixerMessage::Dispatch {
            channel,
            event,
            frame,
        });
    }

    pub fn set_channel_volume(&self, channel: u8, volume: f32) {
        if !is_channel(channel) {
            debug!("Dropping volume change for unknown channel {channel}");
            return;
        }

        self.send(MixerMessage::SetChannelVolume {
            channel,
            volume,
            frame: self.current_frame(),
        });
    }

    /// Overall output gain, clamped to 0.0-1.0. Takes effect on the next
    /// rendered block.
    pub fn set_master_volume(&self, volume: f32) {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.shared
            .master_volume
            .store(volume.to_bits(), Ordering::Release);
    }

    pub fn master_volume(&self) -> f32 {
        self.shared.master_volume()
    }

    /// Frames rendered so far, as last published by the render side.
    pub fn current_frame(&self) -> u64 {
        self.shared.frame.load(Ordering::Acquire)
    }

    /// Generation of the most recent `create_channels` request.
    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::Acquire)
    }

    fn send(&self, msg: MixerMessage) {
        match lock(&self.tx).push(msg) {
            Ok(()) => {}
            Err(PushError::Full(msg)) => warn!("Mixer queue full, dropping {msg:?}"),
        }
    }
}

fn is_channel(channel: u8) -> bool {
    (1..=CHANNEL_COUNT as u8).contains(&channel)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn load_channels(
    generation: u64,
    factory: &dyn ChannelFactory,
    tx: &Mutex<Producer<MixerMessage>>,
    shared: &SharedState,
) -> Result<InitOutcome, MixerError> {
    let superseded = || shared.generation.load(Ordering::Acquire) != generation;

    let bank = match ChannelBank::load(factory) {
        Ok(bank) => bank,
        Err(err) => {
            error!("Channel initialization #{generation} failed: {err}");
            return Err(err);
        }
    };

    let mut msg = MixerMessage::Install {
        generation,
        bank: Box::new(bank),
    };

    loop {
        if superseded() {
            debug!("Channel initialization #{generation} superseded");
            return Ok(InitOutcome::Superseded);
        }

        let mut producer = lock(tx);
        if producer.is_abandoned() {
            return Err(MixerError::Disconnected);
        }

        match producer.push(msg) {
            Ok(()) => {
                info!("Channel initialization #{generation} delivered");
                return Ok(InitOutcome::Delivered);
            }
            Err(PushError::Full(returned)) => {
                msg = returned;
                drop(producer);
                thread::sleep(INSTALL_RETRY);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The bank is queued for the render side; its slots turn ready on the
    /// next rendered block.
    Delivered,
    /// A newer `create_channels` or `reset` replaced this request.
    Superseded,
}

/// An initialization in flight.
#[derive(Debug)]
pub struct PendingInit {
    generation: u64,
    join: JoinHandle<Result<InitOutcome, MixerError>>,
}

impl PendingInit {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Block until the loader thread finishes.
    ///
    /// Delivery needs room in the control queue. When the queue is full the
    /// loader keeps retrying until the render side drains it, a newer
    /// initialization supersedes it, or the render side is dropped; waiting
    /// with a full queue and no running render callback never returns.
    pub fn wait(self) -> Result<InitOutcome, MixerError> {
        self.join.join().map_err(|_| MixerError::LoaderPanicked)?
    }
}
