use crate::{
    dsp::oscillator::PulseOscillator,
    graph::{
        node::{hertz, unit, ChannelNode, RenderCtx},
        param::AutomatedParam,
    },
    io::event::{ChannelEvent, ChannelKind},
    MAX_BLOCK_SIZE,
};

/// Pulse channel (slots 1 and 2).
///
/// Defaults: 440 Hz, duty 0.5, volume 0 (silent until the first note).
pub struct PulseNode {
    osc: PulseOscillator,
    frequency: AutomatedParam,
    duty: AutomatedParam,
    volume: AutomatedParam,
    frequency_buf: Vec<f32>,
    duty_buf: Vec<f32>,
    volume_buf: Vec<f32>,
}

impl PulseNode {
    pub fn new() -> Self {
        Self {
            osc: PulseOscillator::new(),
            frequency: AutomatedParam::new(440.0),
            duty: AutomatedParam::new(0.5),
            volume: AutomatedParam::new(0.0),
            frequency_buf: vec![0.0; MAX_BLOCK_SIZE],
            duty_buf: vec![0.0; MAX_BLOCK_SIZE],
            volume_buf: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Parameters in force at `frame`: (frequency, duty, volume).
    pub fn params_at(&self, frame: u64) -> (f32, f32, f32) {
        (
            self.frequency.value_at(frame),
            self.duty.value_at(frame),
            self.volume.value_at(frame),
        )
    }
}

impl Default for PulseNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelNode for PulseNode {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Pulse
    }

    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for (index, chunk) in out.chunks_mut(MAX_BLOCK_SIZE).enumerate() {
            let start = ctx.block_start + (index * MAX_BLOCK_SIZE) as u64;
            let frames = chunk.len();

            let frequency = self.frequency.process(start, &mut self.frequency_buf[..frames]);
            let duty = self.duty.process(start, &mut self.duty_buf[..frames]);
            let volume = self.volume.process(start, &mut self.volume_buf[..frames]);

            self.osc
                .render(chunk, ctx.sample_rate, frequency, duty, volume);
        }
    }

    fn schedule(&mut self, event: &ChannelEvent, frame: u64) -> bool {
        match *event {
            ChannelEvent::SquareNote { hz, duty, volume } => {
                self.frequency.set_value_at(hertz(hz), frame);
                self.duty.set_value_at(unit(duty), frame);
                self.volume.set_value_at(unit(volume), frame);
                true
            }
            _ => false,
        }
    }

    fn schedule_volume(&mut self, volume: f32, frame: u64) {
        self.volume.set_value_at(unit(volume), frame);
    }
}
