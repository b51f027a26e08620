use super::{
    noise::{NoiseMode, NoiseSequence},
    phase::Phase,
};

/*
Chip Oscillators
================

Three phase-accumulator oscillators modelled after a classic four-voice sound
chip. None of them are band-limited: edges are hard and aliasing is part of
the character.

Parameter Slices
----------------

Every render call receives its parameters as slices:

  len == 1     the value is broadcast across the whole block
  len == N     one value per sample (automation landed inside the block)

`param_at` implements this rule so the kernels never branch on caller intent.


Pulse
-----

    sample = (phase < duty ? +1 : -1) × volume

  duty = 0.5     duty = 0.25
  ┌──┐  ┌──┐     ┌─┐   ┌─┐
  │  │  │  │     │ │   │ │
  ┘  └──┘  └     ┘ └───┘ └──


Triangle
--------

    base   = phase <= 0.5 ? phase : 1 - phase      (0 → 0.5 → 0)
    sample = (base × 4 - 1) × volume               (-1 → +1 → -1)

Continuous at the peak (phase 0.5 gives exactly +1 from both sides).


Noise
-----

The noise oscillator only changes level when its phase wraps. Each wrap steps
the LFSR once and the output holds `volume` or `0` until the next wrap. At
frequencies above the sample rate several periods can pass inside one sample;
the sequence still advances at most once per sample.
*/

/// Value for sample `index` under the broadcast/per-sample rule.
#[inline]
pub fn param_at<T: Copy + Default>(values: &[T], index: usize) -> T {
    match values {
        [single] => *single,
        _ => values.get(index).copied().unwrap_or_default(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct PulseOscillator {
    phase: Phase,
}

impl PulseOscillator {
    pub fn new() -> Self {
        Self {
            phase: Phase::new(),
        }
    }

    #[inline]
    pub fn next_sample(&mut self, increment: f32, duty: f32, volume: f32) -> f32 {
        let sample = if self.phase.value() < duty { 1.0 } else { -1.0 } * volume;
        self.phase.advance(increment);
        sample
    }

    pub fn render(
        &mut self,
        out: &mut [f32],
        sample_rate: f32,
        frequency: &[f32],
        duty: &[f32],
        volume: &[f32],
    ) {
        for (i, sample) in out.iter_mut().enumerate() {
            let increment = Phase::increment(param_at(frequency, i), sample_rate);
            *sample = self.next_sample(increment, param_at(duty, i), param_at(volume, i));
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase.value()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TriangleOscillator {
    phase: Phase,
}

impl TriangleOscillator {
    pub fn new() -> Self {
        Self {
            phase: Phase::new(),
        }
    }

    /// Triangle shape for a phase in [0, 1), before volume.
    #[inline]
    pub fn shape(phase: f32) -> f32 {
        let base = if phase <= 0.5 { phase } else { 1.0 - phase };
        base * 4.0 - 1.0
    }

    #[inline]
    pub fn next_sample(&mut self, increment: f32, volume: f32) -> f32 {
        let sample = Self::shape(self.phase.value()) * volume;
        self.phase.advance(increment);
        sample
    }

    pub fn render(&mut self, out: &mut [f32], sample_rate: f32, frequency: &[f32], volume: &[f32]) {
        for (i, sample) in out.iter_mut().enumerate() {
            let increment = Phase::increment(param_at(frequency, i), sample_rate);
            *sample = self.next_sample(increment, param_at(volume, i));
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase.value()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoiseOscillator {
    phase: Phase,
    level: bool,
    sequence: NoiseSequence,
}

impl NoiseOscillator {
    pub fn new(mode: NoiseMode) -> Self {
        Self {
            phase: Phase::new(),
            level: false,
            sequence: NoiseSequence::new(mode),
        }
    }

    /// Rebuild the sequence from its seed when the mode differs.
    pub fn set_mode(&mut self, mode: NoiseMode) {
        if self.sequence.mode() != mode {
            self.sequence = NoiseSequence::new(mode);
        }
    }

    #[inline]
    pub fn next_sample(&mut self, increment: f32, volume: f32) -> f32 {
        if self.phase.advance(increment) {
            self.level = self.sequence.next();
        }
        if self.level {
            volume
        } else {
            0.0
        }
    }

    pub fn render(
        &mut self,
        out: &mut [f32],
        sample_rate: f32,
        frequency: &[f32],
        volume: &[f32],
        mode: &[NoiseMode],
    ) {
        for (i, sample) in out.iter_mut().enumerate() {
            self.set_mode(param_at(mode, i));
            let increment = Phase::increment(param_at(frequency, i), sample_rate);
            *sample = self.next_sample(increment, param_at(volume, i));
        }
    }

    pub fn mode(&self) -> NoiseMode {
        self.sequence.mode()
    }

    pub fn phase(&self) -> f32 {
        self.phase.value()
    }
}
