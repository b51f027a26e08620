use crate::{
    dsp::{noise::NoiseMode, oscillator::NoiseOscillator},
    graph::{
        node::{hertz, unit, ChannelNode, RenderCtx},
        param::AutomatedParam,
    },
    io::event::{ChannelEvent, ChannelKind},
    MAX_BLOCK_SIZE,
};

/// Noise channel (slot 4).
///
/// Defaults: 440 Hz clock, volume 1.0, Long mode. The mode is automated like
/// any other parameter; the oscillator rebuilds its sequence on the sample
/// where the mode actually changes.
pub struct NoiseNode {
    osc: NoiseOscillator,
    frequency: AutomatedParam,
    volume: AutomatedParam,
    mode: AutomatedParam<NoiseMode>,
    frequency_buf: Vec<f32>,
    volume_buf: Vec<f32>,
    mode_buf: Vec<NoiseMode>,
}

impl NoiseNode {
    pub fn new() -> Self {
        Self {
            osc: NoiseOscillator::new(NoiseMode::Long),
            frequency: AutomatedParam::new(440.0),
            volume: AutomatedParam::new(1.0),
            mode: AutomatedParam::new(NoiseMode::Long),
            frequency_buf: vec![0.0; MAX_BLOCK_SIZE],
            volume_buf: vec![0.0; MAX_BLOCK_SIZE],
            mode_buf: vec![NoiseMode::Long; MAX_BLOCK_SIZE],
        }
    }

    pub fn params_at(&self, frame: u64) -> (f32, f32, NoiseMode) {
        (
            self.frequency.value_at(frame),
            self.volume.value_at(frame),
            self.mode.value_at(frame),
        )
    }

    /// Mode of the live noise sequence.
    pub fn sequence_mode(&self) -> NoiseMode {
        self.osc.mode()
    }
}

impl Default for NoiseNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelNode for NoiseNode {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Noise
    }

    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for (index, chunk) in out.chunks_mut(MAX_BLOCK_SIZE).enumerate() {
            let start = ctx.block_start + (index * MAX_BLOCK_SIZE) as u64;
            let frames = chunk.len();

            let frequency = self.frequency.process(start, &mut self.frequency_buf[..frames]);
            let volume = self.volume.process(start, &mut self.volume_buf[..frames]);
            let mode = self.mode.process(start, &mut self.mode_buf[..frames]);

            self.osc
                .render(chunk, ctx.sample_rate, frequency, volume, mode);
        }
    }

    fn schedule(&mut self, event: &ChannelEvent, frame: u64) -> bool {
        match *event {
            ChannelEvent::NoiseNote { hz, volume, mode } => {
                self.frequency.set_value_at(hertz(hz), frame);
                self.volume.set_value_at(unit(volume), frame);
                self.mode.set_value_at(mode, frame);
                true
            }
            _ => false,
        }
    }

    fn schedule_volume(&mut self, volume: f32, frame: u64) {
        self.volume.set_value_at(unit(volume), frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let node = NoiseNode::new();
        assert_eq!(node.params_at(0), (440.0, 1.0, NoiseMode::Long));
        assert_eq!(node.sequence_mode(), NoiseMode::Long);
    }

    #[test]
    fn mode_switch_rebuilds_sequence_on_its_frame() {
        let mut node = NoiseNode::new();
        let event = ChannelEvent::NoiseNote {
            hz: 500.0,
            volume: 1.0,
            mode: NoiseMode::Short,
        };
        assert!(node.schedule(&event, 16));

        let ctx = RenderCtx::new(1_000.0, 0);
        let mut out = [0.0f32; 8];
        node.render_block(&mut out, &ctx);
        assert_eq!(node.sequence_mode(), NoiseMode::Long);

        let mut out = [0.0f32; 32];
        node.render_block(&mut out, &RenderCtx::new(1_000.0, 8));
        assert_eq!(node.sequence_mode(), NoiseMode::Short);
        assert!(out.iter().all(|&s| s == 0.0 || s == 1.0));
    }

    #[test]
    fn rejects_pulse_and_triangle_notes() {
        let mut node = NoiseNode::new();
        assert!(!node.schedule(&ChannelEvent::TriangleNote { hz: 220.0 }, 0));
        assert!(!node.schedule(
            &ChannelEvent::SquareNote {
                hz: 220.0,
                duty: 0.5,
                volume: 0.0,
            },
            0
        ));
        assert_eq!(node.params_at(0), (440.0, 1.0, NoiseMode::Long));
    }
}
