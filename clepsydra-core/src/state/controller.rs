//! Timer controller
//!
//! Owns the carried-over duration, the apply flag and the idle watchdog,
//! and runs one phase at a time against the board. Each phase clears the
//! gesture latch on entry so gestures never leak from one phase into the
//! next.

use embedded_hal_async::delay::DelayNs;

use super::machine::{Outcome, Phase};
use crate::config::{AlarmConfig, DeviceConfig, TimerConfig};
use crate::format::clamp_seconds;
use crate::input::GestureLatch;
use crate::traits::{Actuator, Board, Clock, Encoder, PowerManager, TimeDisplay, ToneSequencer};
use crate::watchdog::IdleWatchdog;

/// Top-level countdown timer state machine
///
/// Cycles `SetTime -> Countdown -> Alarm -> SetTime` forever. An interrupted
/// countdown skips the alarm.
pub struct TimerController<'a, E, D, T, V, P, C> {
    pub(super) timer: TimerConfig,
    pub(super) alarm: AlarmConfig,
    pub(super) gestures: &'a GestureLatch,
    pub(super) board: Board<E, D, T, V, P, C>,
    pub(super) watchdog: IdleWatchdog,
    pub(super) phase: Phase,
    /// Duration carried between phases (seconds)
    pub(super) duration: u16,
    /// Resynchronize the encoder to `duration` on the next SetTime entry
    pub(super) apply: bool,
}

impl<'a, E, D, T, V, P, C> TimerController<'a, E, D, T, V, P, C>
where
    E: Encoder,
    D: TimeDisplay,
    T: ToneSequencer,
    V: Actuator,
    P: PowerManager,
    C: Clock + DelayNs,
{
    /// Create a controller in the SetTime phase with a zero duration
    pub fn new(config: &DeviceConfig, gestures: &'a GestureLatch, board: Board<E, D, T, V, P, C>) -> Self {
        Self {
            timer: config.timer,
            alarm: config.alarm,
            gestures,
            board,
            watchdog: IdleWatchdog::new(config.timer.idle_timeout_ms),
            phase: Phase::SetTime,
            duration: 0,
            apply: false,
        }
    }

    /// Show the start-up screen
    ///
    /// Renders the splash value for `splash_ms`, then zeroes the encoder and
    /// drops any gesture made while the splash was up.
    pub async fn boot(&mut self) {
        self.board.display.render(self.timer.splash_s).await.ok();
        self.board.clock.delay_ms(self.timer.splash_ms).await;
        self.board.encoder.reset();
        self.gestures.clear();
    }

    /// Run the current phase to completion and move to the next one
    ///
    /// Returns how the phase ended and the phase that follows.
    pub async fn step(&mut self) -> (Outcome, Phase) {
        let outcome = match self.phase {
            Phase::SetTime => Outcome::TimeSet(self.set_time().await),
            Phase::Countdown => Outcome::CountdownEnded(self.countdown(self.duration).await),
            Phase::Alarm => Outcome::AlarmEnded {
                acknowledged: self.run_alarm().await,
            },
        };

        match outcome {
            Outcome::TimeSet(value) => self.duration = value,
            Outcome::CountdownEnded(value) => {
                // An expired countdown ends at -1; the display never sees it
                self.duration = clamp_seconds(value);
                self.apply = false;
            }
            Outcome::AlarmEnded { acknowledged } => self.apply = acknowledged,
        }

        self.phase = self.phase.transition(outcome);
        (outcome, self.phase)
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Duration carried into the next phase (seconds)
    pub fn duration(&self) -> u16 {
        self.duration
    }
}
