//! Bounded encoder position

use clepsydra_core::config::EncoderConfig;
use clepsydra_core::traits::Encoder;

use super::Rotation;

/// Encoder position clamped to a range
///
/// Each detent moves the position by `step`. Turning past either end of
/// the range leaves the position at that end.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundedCounter {
    value: i32,
    min: i32,
    max: i32,
    step: i32,
    reverse: bool,
}

impl BoundedCounter {
    /// Create a counter at `min`
    pub const fn new(min: i32, max: i32, step: i32, reverse: bool) -> Self {
        Self {
            value: min,
            min,
            max,
            step,
            reverse,
        }
    }

    /// Create a counter from the encoder configuration
    pub const fn from_config(config: &EncoderConfig) -> Self {
        Self::new(config.min, config.max, config.step, config.reverse)
    }

    /// Apply one detent of rotation
    ///
    /// Returns the new position.
    pub fn step(&mut self, rotation: Rotation) -> i32 {
        let up = matches!(rotation, Rotation::Clockwise) != self.reverse;
        let delta = if up { self.step } else { -self.step };
        self.value = self.value.saturating_add(delta).clamp(self.min, self.max);
        self.value
    }

    /// Lower end of the range
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper end of the range
    pub fn max(&self) -> i32 {
        self.max
    }
}

impl Encoder for BoundedCounter {
    fn read(&self) -> i32 {
        self.value
    }

    fn set(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }
}
