//! Direction-dependent quantization of the encoder value
//!
//! The set value snaps toward the direction of travel: turning up rounds
//! down to the step, turning down rounds up to the step. Each detent then
//! lands on a clean step boundary no matter which edge of the step the raw
//! encoder value falls on.

/// Round down to a multiple of `step`
///
/// `step` must be positive. Values are expected to be non-negative (the
/// encoder range starts at zero).
pub const fn quantize_down(value: i32, step: i32) -> i32 {
    value - value.rem_euclid(step)
}

/// Round up to a multiple of `step`
pub const fn quantize_up(value: i32, step: i32) -> i32 {
    quantize_down(value + step - 1, step)
}

/// Snap a new encoder reading against the previous set value
///
/// Returns `Some(quantized)` when the reading moved, `None` when it is
/// unchanged.
pub fn snap(previous: i32, reading: i32, step: i32) -> Option<i32> {
    use core::cmp::Ordering;

    match reading.cmp(&previous) {
        Ordering::Greater => Some(quantize_down(reading, step)),
        Ordering::Less => Some(quantize_up(reading, step)),
        Ordering::Equal => None,
    }
}
