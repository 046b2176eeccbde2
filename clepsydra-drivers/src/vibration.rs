//! GPIO vibration motor
//!
//! Drives the motor through a transistor on a GPIO pin.

use clepsydra_core::traits::Actuator;
use embedded_hal::digital::OutputPin;

/// On/off actuator on a GPIO pin
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioActuator<P> {
    pin: P,
    /// If true, actuator ON = pin LOW
    inverted: bool,
}

impl<P: OutputPin> GpioActuator<P> {
    /// Create a new actuator, switched off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the actuator is ON when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut actuator = Self { pin, inverted };
        // Ensure the motor starts off
        actuator.set(false);
        actuator
    }

    /// Create an actuator with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create an actuator with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> Actuator for GpioActuator<P> {
    fn set(&mut self, on: bool) {
        // A failed pin write leaves the motor as it was
        let _ = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}
