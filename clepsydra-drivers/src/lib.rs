//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in clepsydra-core for the parts of the timer that need no specific chip:
//!
//! - Alarm tone (song parsing and tick-driven playback)
//! - Vibration motor on a GPIO pin
//! - Rotary encoder (quadrature decoding, bounded position)
//! - Push button gesture classification

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod encoder;
pub mod tone;
pub mod vibration;
