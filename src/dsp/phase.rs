/// Position within one waveform period, always in [0, 1).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Phase(f32);

impl Phase {
    pub fn new() -> Self {
        Self(0.0)
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Per-sample increment for `frequency` Hz. Non-positive or non-finite
    /// frequencies hold the phase.
    #[inline]
    pub fn increment(frequency: f32, sample_rate: f32) -> f32 {
        if frequency > 0.0 && frequency.is_finite() && sample_rate > 0.0 {
            frequency / sample_rate
        } else {
            0.0
        }
    }

    /// Advance by `increment` and wrap into [0, 1).
    ///
    /// Returns true when the new phase is below the old one. Several periods
    /// elapsing inside one sample still count as a single wrap.
    #[inline]
    pub fn advance(&mut self, increment: f32) -> bool {
        let mut next = (self.0 + increment) % 1.0;
        if !(0.0..1.0).contains(&next) {
            next = 0.0;
        }
        let wrapped = next < self.0;
        self.0 = next;
        wrapped
    }
}
