//! Conversions used by event producers to turn sound-chip register values
//! into `ChannelEvent` fields.

use crate::dsp::noise::NoiseMode;

/// CPU clock of the emulated console (1.789773 MHz).
pub const CPU_CLOCK_HZ: f32 = 1_789_773.0;

/// Noise timer periods in CPU cycles, indexed by the 4-bit period field.
pub const NOISE_PERIODS: [u16; 16] = [
    0x002, 0x004, 0x008, 0x010, 0x020, 0x030, 0x040, 0x050, 0x065, 0x07F, 0x0BE, 0x0FE, 0x17D,
    0x1FC, 0x3F9, 0x7F2,
];

const DUTY_CYCLES: [f32; 4] = [0.125, 0.25, 0.5, 0.75];

/// Pulse/triangle 11-bit timer value to tone frequency.
pub fn timer_to_hz(timer: u16) -> f32 {
    CPU_CLOCK_HZ / (16.0 * (timer as f32 + 1.0))
}

/// Two duty bits to the fraction of the period spent high.
pub fn duty_from_bits(bits: u8) -> f32 {
    DUTY_CYCLES[(bits & 0b11) as usize]
}

/// Four-bit volume field to linear volume.
pub fn volume_from_nibble(nibble: u8) -> f32 {
    (nibble & 0x0F) as f32 / 15.0
}

/// Noise period index to the rate at which the LFSR is clocked. The period
/// goes through the same timer divider as the tone channels.
pub fn noise_hz(index: u8) -> f32 {
    timer_to_hz(NOISE_PERIODS[(index & 0x0F) as usize])
}

pub fn noise_mode_from_flag(short: bool) -> NoiseMode {
    if short {
        NoiseMode::Short
    } else {
        NoiseMode::Long
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_to_hz_matches_concert_pitch() {
        // Timer 253 is the usual table entry for A4
        let hz = timer_to_hz(253);
        assert!((hz - 440.4).abs() < 0.1, "got {hz}");
    }

    #[test]
    fn duty_table() {
        assert_eq!(duty_from_bits(0), 0.125);
        assert_eq!(duty_from_bits(1), 0.25);
        assert_eq!(duty_from_bits(2), 0.5);
        assert_eq!(duty_from_bits(3), 0.75);
        assert_eq!(duty_from_bits(0b110), 0.5);
    }

    #[test]
    fn volume_range() {
        assert_eq!(volume_from_nibble(0), 0.0);
        assert_eq!(volume_from_nibble(15), 1.0);
        assert_eq!(volume_from_nibble(0xFF), 1.0);
    }

    #[test]
    fn noise_rate_from_period_index() {
        assert_eq!(noise_hz(0), CPU_CLOCK_HZ / 48.0);
        assert_eq!(noise_hz(2), CPU_CLOCK_HZ / 144.0);
        assert_eq!(noise_hz(0x12), noise_hz(2));

        // Every period index clocks below a 48 kHz output, so each one is distinct
        for index in 1..16 {
            assert!(noise_hz(index) < noise_hz(index - 1));
        }
        assert!(noise_hz(0) < 48_000.0);
        assert!((noise_hz(15) - 54.97).abs() < 0.01, "got {}", noise_hz(15));
        assert_eq!(noise_mode_from_flag(true), NoiseMode::Short);
        assert_eq!(noise_mode_from_flag(false), NoiseMode::Long);
    }
}
