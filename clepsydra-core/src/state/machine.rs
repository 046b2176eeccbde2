//! Phase state machine
//!
//! The timer cycles through three phases forever. What happens inside a
//! phase lives in the controller; this module only decides which phase
//! comes next given how the previous one ended.

/// Controller phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Dialing in a duration with the encoder
    SetTime,
    /// Counting the duration down once per second
    Countdown,
    /// Sounding, vibrating and blinking until acknowledged or timed out
    Alarm,
}

/// How a phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Tap confirmed a duration (seconds)
    TimeSet(u16),
    /// Countdown stopped at this value; `<= 0` means it expired
    CountdownEnded(i32),
    /// Alarm finished; `acknowledged` if a gesture cut it short
    AlarmEnded { acknowledged: bool },
}

impl Outcome {
    /// Check if this outcome is an expired countdown
    pub fn is_expiry(&self) -> bool {
        matches!(self, Outcome::CountdownEnded(value) if *value <= 0)
    }
}

impl Phase {
    /// Process an outcome and return the next phase
    pub fn transition(self, outcome: Outcome) -> Self {
        use Outcome::*;
        use Phase::*;

        match (self, outcome) {
            (SetTime, TimeSet(_)) => Countdown,

            // An interrupted countdown goes straight back to setting the time
            (Countdown, CountdownEnded(value)) if value <= 0 => Alarm,
            (Countdown, CountdownEnded(_)) => SetTime,

            (Alarm, AlarmEnded { .. }) => SetTime,

            // Outcome from another phase: stay put
            _ => self,
        }
    }
}
