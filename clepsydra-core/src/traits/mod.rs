//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic
//! and hardware-specific implementations.

pub mod display;
pub mod encoder;
pub mod output;
pub mod power;

pub use display::TimeDisplay;
pub use encoder::Encoder;
pub use output::{Actuator, ToneSequencer};
pub use power::{Clock, PowerManager};

/// One implementation of every collaborator the controller drives
///
/// The clock doubles as the delay provider: every suspension point in the
/// control loop is a `delay_ms` on it.
pub struct Board<E, D, T, V, P, C> {
    /// Rotary encoder position
    pub encoder: E,
    /// Time display
    pub display: D,
    /// Alarm tone sequencer
    pub tone: T,
    /// Vibration motor
    pub vibration: V,
    /// Low-power entry
    pub power: P,
    /// Time base and delays
    pub clock: C,
}
