//! Board-agnostic control logic for the countdown timer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (encoder, display, tone, actuator, power)
//! - Gesture flags shared between the button handler and the controller
//! - Idle watchdog for low-power entry
//! - Direction-dependent quantization of the encoder value
//! - Phase state machine and the timer controller
//! - Configuration type definitions and parsing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod format;
pub mod input;
pub mod quantize;
pub mod state;
pub mod traits;
pub mod watchdog;

#[cfg(test)]
pub(crate) mod testing;

pub use state::{Outcome, Phase, TimerController};

/// Largest duration the timer can hold (99:59)
pub const MAX_SECONDS: u16 = 5999;
