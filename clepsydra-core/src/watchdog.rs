//! Idle watchdog
//!
//! A restartable single-shot timer that detects operator inactivity. The
//! watchdog itself has no side effects: the controller polls it and runs
//! the sleep sequence when it fires.

/// Watchdog timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum WatchdogState {
    /// Not armed; will not fire
    Idle,
    /// Armed; fires once `now >= deadline_ms`
    Armed { deadline_ms: u64 },
}

/// Inactivity watchdog
///
/// `trigger` arms (or re-arms) the timer, `stop` cancels it and `poll`
/// reports the deadline exactly once. After firing the watchdog is idle
/// again until the next `trigger`.
#[derive(Debug, Clone)]
pub struct IdleWatchdog {
    /// Inactivity period before firing (ms)
    timeout_ms: u32,
    state: WatchdogState,
}

impl IdleWatchdog {
    /// Create an idle watchdog with the given timeout
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            state: WatchdogState::Idle,
        }
    }

    /// Arm the watchdog for `timeout_ms` from `now_ms`
    ///
    /// Supersedes any pending deadline.
    pub fn trigger(&mut self, now_ms: u64) {
        self.state = WatchdogState::Armed {
            deadline_ms: now_ms.saturating_add(u64::from(self.timeout_ms)),
        };
    }

    /// Cancel a pending deadline
    pub fn stop(&mut self) {
        self.state = WatchdogState::Idle;
    }

    /// Check the deadline
    ///
    /// Returns `true` exactly once per arm cycle, when the deadline has been
    /// reached. A `stop` before that point means it never returns `true` for
    /// that cycle.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.state {
            WatchdogState::Armed { deadline_ms } if now_ms >= deadline_ms => {
                self.state = WatchdogState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Check if a deadline is pending
    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        matches!(self.state, WatchdogState::Armed { .. })
    }
}
