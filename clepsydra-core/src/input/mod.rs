//! Input state shared between the input handlers and the controller
//!
//! The encoder position is read through [`crate::traits::Encoder`]; button
//! gestures arrive as independent flags in a [`GestureLatch`].

pub mod gestures;

pub use gestures::{Gesture, GestureFlags, GestureLatch};
