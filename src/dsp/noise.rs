#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Noise Sequence (15-bit LFSR)
============================

The noise channel does not use a random number generator. It steps a 15-bit
linear feedback shift register (LFSR) and listens to the bit that falls off
the bottom. The result sounds like noise but is fully deterministic and
periodic.

Vocabulary
----------

  register    The 15 bits of state. Seeded with 1 and never allowed to be 0
              (an all-zero register feeds back zeros forever).

  tap         The second bit XORed into the feedback. Bit 0 is always the
              first input.

  mode        Long uses tap 1 and walks a 32767-step sequence (hiss).
              Short uses tap 6 and, from seed 1, a 93-step sequence (a
              metallic, almost pitched buzz).


One Step
--------

    feedback = bit0 XOR bit[tap]
    register = register >> 1
    bit14    = feedback
    output   = (bit0 == 0)

    register: 0b000_0000_0000_0001   (seed)
              tap=1: feedback = 1 ^ 0 = 1
              shift: 0b000_0000_0000_0000
              bit14: 0b100_0000_0000_0000
              bit0 == 0  → output high

The tap is fixed for the lifetime of a sequence. Switching modes means
building a new sequence from the seed; changing the tap on a live register
would land on an orbit whose period depends on the history.
*/

const SEED: u16 = 1;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseMode {
    #[default]
    Long,
    Short,
}

impl NoiseMode {
    /// Bit XORed with bit 0 to produce the feedback.
    pub fn tap_bit(self) -> u8 {
        match self {
            NoiseMode::Long => 1,
            NoiseMode::Short => 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NoiseSequence {
    register: u16,
    mode: NoiseMode,
}

impl NoiseSequence {
    pub fn new(mode: NoiseMode) -> Self {
        Self {
            register: SEED,
            mode,
        }
    }

    /// Step the register once. Returns true when the shifted-out state leaves
    /// bit 0 clear (the "high" sample).
    #[inline]
    pub fn next(&mut self) -> bool {
        let tap = self.mode.tap_bit();
        let feedback = (self.register & 0x01) ^ ((self.register >> tap) & 0x01);
        self.register = (self.register >> 1) | (feedback << 14);

        // Unreachable from the seed for either tap; reseed rather than go silent.
        if self.register == 0 {
            self.register = SEED;
        }

        self.register & 0x01 == 0
    }

    pub fn mode(&self) -> NoiseMode {
        self.mode
    }

    pub fn register(&self) -> u16 {
        self.register
    }
}

impl Default for NoiseSequence {
    fn default() -> Self {
        Self::new(NoiseMode::Long)
    }
}
