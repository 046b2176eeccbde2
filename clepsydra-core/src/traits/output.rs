//! Alarm output traits: tone sequencer and vibration actuator

/// Trait for a tone sequence player
///
/// A sequencer is built from a note sequence and played back one tick at a
/// time. The caller decides the tick cadence, which keeps playback a
/// cooperative wait instead of a blocking call.
pub trait ToneSequencer {
    /// Rewind to the start of the sequence
    fn restart(&mut self);

    /// Advance playback by one tick
    ///
    /// Returns `true` while playback continues and `false` once the
    /// sequence has finished (output is silent from then on).
    fn advance_tick(&mut self) -> bool;
}

/// Trait for on/off actuators (vibration motor)
pub trait Actuator {
    /// Turn the actuator on or off
    fn set(&mut self, on: bool);
}
