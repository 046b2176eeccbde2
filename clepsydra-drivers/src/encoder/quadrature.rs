//! Quadrature decoding for mechanical rotary encoders
//!
//! Decodes the CLK/DT pin pair with a state machine, which rejects contact
//! bounce and illegal jumps where both pins change at once.
//!
//! Clockwise rotation walks the pins `11 -> 10 -> 00 -> 01 -> 11`
//! (CLK/DT), counter-clockwise walks `11 -> 01 -> 00 -> 10 -> 11`.
//! Full-step encoders rest at `11` only; half-step encoders also have a
//! detent at `00`.

use super::Rotation;

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// At rest with both pins high
    RestHigh,
    /// At rest with both pins low (half-step detent)
    RestLow,
    /// Left a rest position clockwise
    CwBegin,
    /// Both pins low on the way round clockwise
    CwMiddle,
    /// Last quarter before completing a clockwise cycle
    CwEnd,
    /// Left a rest position counter-clockwise
    CcwBegin,
    CcwMiddle,
    CcwEnd,
}

/// Quadrature decoder
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: State,
    half_step: bool,
}

impl QuadratureDecoder {
    /// Create a decoder resting at `11`
    ///
    /// With `half_step`, one rotation is reported per half cycle (at each of
    /// the two detents); otherwise one per full cycle.
    pub const fn new(half_step: bool) -> Self {
        Self {
            state: State::RestHigh,
            half_step,
        }
    }

    /// Feed the current pin levels (`true` = high)
    ///
    /// Returns a rotation when a detent is reached.
    pub fn update(&mut self, clk: bool, dt: bool) -> Option<Rotation> {
        let (next, rotation) = if self.half_step {
            Self::half_step(self.state, clk, dt)
        } else {
            Self::full_step(self.state, clk, dt)
        };
        self.state = next;
        rotation
    }

    /// Transition table for full-step encoders
    fn full_step(state: State, clk: bool, dt: bool) -> (State, Option<Rotation>) {
        use State::*;

        let next = match (state, clk, dt) {
            (RestHigh, true, false) => CwBegin,
            (RestHigh, false, true) => CcwBegin,

            (CwBegin, false, false) => CwMiddle,
            (CwBegin, true, false) => CwBegin,
            (CwMiddle, false, true) => CwEnd,
            (CwMiddle, false, false) => CwMiddle,
            (CwMiddle, true, false) => CwBegin,
            (CwEnd, true, true) => return (RestHigh, Some(Rotation::Clockwise)),
            (CwEnd, false, false) => CwMiddle,
            (CwEnd, false, true) => CwEnd,

            (CcwBegin, false, false) => CcwMiddle,
            (CcwBegin, false, true) => CcwBegin,
            (CcwMiddle, true, false) => CcwEnd,
            (CcwMiddle, false, false) => CcwMiddle,
            (CcwMiddle, false, true) => CcwBegin,
            (CcwEnd, true, true) => return (RestHigh, Some(Rotation::CounterClockwise)),
            (CcwEnd, false, false) => CcwMiddle,
            (CcwEnd, true, false) => CcwEnd,

            // Bounce back to rest or an illegal jump: start over
            _ => RestHigh,
        };
        (next, None)
    }

    /// Transition table for half-step encoders
    fn half_step(state: State, clk: bool, dt: bool) -> (State, Option<Rotation>) {
        use State::*;

        match (state, clk, dt) {
            (RestHigh, true, true) => (RestHigh, None),
            (RestHigh, true, false) => (CwBegin, None),
            (RestHigh, false, true) => (CcwBegin, None),
            (CwBegin, true, false) | (CcwBegin, false, true) => (state, None),
            (CwBegin, false, false) => (RestLow, Some(Rotation::Clockwise)),
            (CcwBegin, false, false) => (RestLow, Some(Rotation::CounterClockwise)),

            (RestLow, false, false) => (RestLow, None),
            (RestLow, false, true) => (CwEnd, None),
            (RestLow, true, false) => (CcwEnd, None),
            (CwEnd, false, true) | (CcwEnd, true, false) => (state, None),
            (CwEnd, true, true) => (RestHigh, Some(Rotation::Clockwise)),
            (CcwEnd, true, true) => (RestHigh, Some(Rotation::CounterClockwise)),

            // Bounce back or an illegal jump: resync to the rest position the
            // pins show, or wait at the nearest one
            (_, true, true) => (RestHigh, None),
            (_, false, false) => (RestLow, None),
            (CwBegin | CcwBegin, _, _) => (RestHigh, None),
            _ => (RestLow, None),
        }
    }
}
