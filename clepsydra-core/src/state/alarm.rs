//! Alarm phase

use embedded_hal_async::delay::DelayNs;

use super::controller::TimerController;
use crate::traits::{Actuator, Clock, Encoder, PowerManager, TimeDisplay, ToneSequencer};

impl<E, D, T, V, P, C> TimerController<'_, E, D, T, V, P, C>
where
    E: Encoder,
    D: TimeDisplay,
    T: ToneSequencer,
    V: Actuator,
    P: PowerManager,
    C: Clock + DelayNs,
{
    /// Sound the alarm
    ///
    /// Each repetition renders `00:00`, plays the tone sequence to the end,
    /// then vibrates with the display inverted for `blink_on_ms` and rests
    /// for `blink_off_ms`. Gestures are checked between repetitions only,
    /// and once more after the last one.
    ///
    /// Returns `true` if a gesture arrived before the alarm ended, `false`
    /// if it ran all `repetitions` unanswered.
    pub async fn run_alarm(&mut self) -> bool {
        self.gestures.clear();

        for _ in 0..self.alarm.repetitions {
            if self.gestures.any() {
                return true;
            }

            self.board.display.render(0).await.ok();

            self.board.tone.restart();
            while self.board.tone.advance_tick() {
                self.board.clock.delay_ms(self.alarm.tone_tick_ms).await;
            }

            self.board.vibration.set(true);
            self.board.display.invert(true).await.ok();
            self.board.clock.delay_ms(self.alarm.blink_on_ms).await;

            self.board.vibration.set(false);
            self.board.display.invert(false).await.ok();
            self.board.clock.delay_ms(self.alarm.blink_off_ms).await;
        }

        self.gestures.any()
    }
}
