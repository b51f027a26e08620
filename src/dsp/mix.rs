//! Bus summing and output-stage primitives.

/*
Channel Bus
===========

The four channels are summed into one mono bus, scaled by the master
volume, then clipped so the sink always receives samples in [-1.0, +1.0].

  summing       Adding signals at equal levels. Four channels at full volume
                can reach ±4.0 before the master stage.

  gain          A linear multiplier. 0.0 is silence, 1.0 is unity.

  hard clip     Clamping at ±1.0. Only reached when several loud channels
                line up; a single channel at volume ≤ 1.0 passes untouched.

    ch1  ─┐
    ch2  ─┤
    ch3  ─┼─(+)─→ × master ─→ clip ─→ sink
    ch4  ─┘
*/

/// Add signal B into signal A in-place (summing).
///
/// ⚠️ WARNING: Can exceed [-1.0, +1.0] range!
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

/// Multiply every sample by `gain`.
#[inline]
pub fn apply_gain(buffer: &mut [f32], gain: f32) {
    if gain == 1.0 {
        return;
    }

    if gain == 0.0 {
        buffer.fill(0.0);
        return;
    }

    for sample in buffer.iter_mut() {
        *sample *= gain;
    }
}

/// Clamp every sample into [-1.0, +1.0].
#[inline]
pub fn hard_clip_in_place(buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = sample.clamp(-1.0, 1.0);
    }
}
