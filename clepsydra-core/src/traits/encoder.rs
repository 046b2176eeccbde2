//! Rotary encoder position trait

/// Bounded position of the rotary encoder
///
/// The quadrature decoding, step size and direction all live in the
/// implementation. The value handed to the controller is already clamped
/// to the configured range, so the controller never sees an out-of-range
/// reading.
pub trait Encoder {
    /// Current position
    fn read(&self) -> i32;

    /// Force the position, e.g. to lock it to a quantized value
    ///
    /// Values outside the configured range are clamped.
    fn set(&mut self, value: i32);

    /// Force the position to zero
    fn reset(&mut self) {
        self.set(0);
    }
}
