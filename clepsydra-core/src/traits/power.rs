//! Power management and time base traits

use core::future::Future;

/// Low-power entry and wake-up
pub trait PowerManager {
    /// Put the device to sleep until the wake pin sees an edge
    ///
    /// Nothing else in the control loop runs while this future is pending,
    /// including the idle watchdog's notion of time.
    fn sleep_until_wake(&mut self) -> impl Future<Output = ()>;
}

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&self) -> u64;
}
