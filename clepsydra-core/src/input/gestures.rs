//! Button gesture flags
//!
//! A press and the release of the same physical action can both be observed
//! within one debounce window, so gestures are kept as four independent
//! flags rather than as one enum value. Only the latest value per gesture
//! kind is kept: two gestures of the same kind between polls coalesce.

use core::sync::atomic::{AtomicBool, Ordering};

/// A classified button interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Button went down
    Press,
    /// Button came up after a plain tap
    Release,
    /// Second press shortly after a tap
    DoublePress,
    /// Button held past the long-press threshold
    LongPress,
}

/// Snapshot of the four gesture flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureFlags {
    pub press: bool,
    pub release: bool,
    pub double: bool,
    pub long: bool,
}

impl GestureFlags {
    /// No gesture seen
    pub const NONE: Self = Self::new(false, false, false, false);

    /// A plain tap: press and release, nothing else
    pub const CONFIRM: Self = Self::new(true, true, false, false);

    /// Button held down: press and long press, not yet released
    pub const HOLD_RESET: Self = Self::new(true, false, false, true);

    /// Build a flag record from its four fields
    pub const fn new(press: bool, release: bool, double: bool, long: bool) -> Self {
        Self {
            press,
            release,
            double,
            long,
        }
    }

    /// Check if any gesture flag is set
    pub const fn any(&self) -> bool {
        self.press || self.release || self.double || self.long
    }

    /// Check if the flags form exactly the tap pattern
    pub fn is_confirm(&self) -> bool {
        *self == Self::CONFIRM
    }

    /// Check if the flags form exactly the hold-to-reset pattern
    pub fn is_hold_reset(&self) -> bool {
        *self == Self::HOLD_RESET
    }

    /// Set the flag for one gesture
    pub fn set(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Press => self.press = true,
            Gesture::Release => self.release = true,
            Gesture::DoublePress => self.double = true,
            Gesture::LongPress => self.long = true,
        }
    }
}

/// Gesture flags written by the button handler and polled by the controller
///
/// There is a single writer (the gesture classifier) and a single reader
/// (the active controller state). Every flag is one atomic bool that is only
/// ever loaded or stored, never read-modify-written, so this also works on
/// cores without compare-and-swap (Cortex-M0+).
#[derive(Debug)]
pub struct GestureLatch {
    press: AtomicBool,
    release: AtomicBool,
    double: AtomicBool,
    long: AtomicBool,
}

impl Default for GestureLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureLatch {
    /// Create a latch with all flags cleared
    pub const fn new() -> Self {
        Self {
            press: AtomicBool::new(false),
            release: AtomicBool::new(false),
            double: AtomicBool::new(false),
            long: AtomicBool::new(false),
        }
    }

    fn flag(&self, gesture: Gesture) -> &AtomicBool {
        match gesture {
            Gesture::Press => &self.press,
            Gesture::Release => &self.release,
            Gesture::DoublePress => &self.double,
            Gesture::LongPress => &self.long,
        }
    }

    /// Record a gesture (called by the button handler)
    pub fn set(&self, gesture: Gesture) {
        self.flag(gesture).store(true, Ordering::Release);
    }

    /// Read all four flags
    pub fn snapshot(&self) -> GestureFlags {
        GestureFlags {
            press: self.press.load(Ordering::Acquire),
            release: self.release.load(Ordering::Acquire),
            double: self.double.load(Ordering::Acquire),
            long: self.long.load(Ordering::Acquire),
        }
    }

    /// Check if any gesture arrived since the last clear
    pub fn any(&self) -> bool {
        self.snapshot().any()
    }

    /// Reset every flag to false
    pub fn clear(&self) {
        for flag in [&self.press, &self.release, &self.double, &self.long] {
            flag.store(false, Ordering::Release);
        }
    }
}
