//! Inter-task communication
//!
//! Defines the statics shared between Embassy tasks. Uses embassy-sync
//! primitives for the parts that need locking or waking.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use clepsydra_core::input::GestureLatch;
use clepsydra_drivers::encoder::BoundedCounter;

/// Button gestures, written by the button task, read by the controller
pub static GESTURES: GestureLatch = GestureLatch::new();

/// Encoder position, stepped by the encoder task, read and forced by the
/// controller
///
/// Replaced with the configured range at boot.
pub static ENCODER: Mutex<CriticalSectionRawMutex, RefCell<BoundedCounter>> =
    Mutex::new(RefCell::new(BoundedCounter::new(0, clepsydra_core::MAX_SECONDS as i32, 5, false)));

/// Signal that the button saw an edge while the device was asleep
pub static WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Set while the controller is suspended in the power manager
pub static SLEEPING: AtomicBool = AtomicBool::new(false);
