//! Timer control loop
//!
//! The phase state machine and the controller that runs each phase
//! against the board collaborators.

pub mod controller;
pub mod machine;

mod alarm;
mod countdown;
mod time_setter;

pub use controller::TimerController;
pub use machine::{Outcome, Phase};
