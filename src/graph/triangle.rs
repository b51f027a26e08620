use crate::{
    dsp::oscillator::TriangleOscillator,
    graph::{
        node::{hertz, unit, ChannelNode, RenderCtx},
        param::AutomatedParam,
    },
    io::event::{ChannelEvent, ChannelKind},
    MAX_BLOCK_SIZE,
};

/// Triangle channel (slot 3). No duty; `TriangleNote` only moves the pitch,
/// the volume starts at 0 and is changed through `schedule_volume`.
pub struct TriangleNode {
    osc: TriangleOscillator,
    frequency: AutomatedParam,
    volume: AutomatedParam,
    frequency_buf: Vec<f32>,
    volume_buf: Vec<f32>,
}

impl TriangleNode {
    pub fn new() -> Self {
        Self {
            osc: TriangleOscillator::new(),
            frequency: AutomatedParam::new(440.0),
            volume: AutomatedParam::new(0.0),
            frequency_buf: vec![0.0; MAX_BLOCK_SIZE],
            volume_buf: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn params_at(&self, frame: u64) -> (f32, f32) {
        (self.frequency.value_at(frame), self.volume.value_at(frame))
    }
}

impl Default for TriangleNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelNode for TriangleNode {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Triangle
    }

    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for (index, chunk) in out.chunks_mut(MAX_BLOCK_SIZE).enumerate() {
            let start = ctx.block_start + (index * MAX_BLOCK_SIZE) as u64;
            let frames = chunk.len();

            let frequency = self.frequency.process(start, &mut self.frequency_buf[..frames]);
            let volume = self.volume.process(start, &mut self.volume_buf[..frames]);

            self.osc.render(chunk, ctx.sample_rate, frequency, volume);
        }
    }

    fn schedule(&mut self, event: &ChannelEvent, frame: u64) -> bool {
        match *event {
            ChannelEvent::TriangleNote { hz } => {
                self.frequency.set_value_at(hertz(hz), frame);
                true
            }
            _ => false,
        }
    }

    fn schedule_volume(&mut self, volume: f32, frame: u64) {
        self.volume.set_value_at(unit(volume), frame);
    }
}
