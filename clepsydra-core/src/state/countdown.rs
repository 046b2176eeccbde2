//! Countdown phase

use embedded_hal_async::delay::DelayNs;

use super::controller::TimerController;
use crate::format::clamp_seconds;
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
    /// Count down from `start` seconds
    ///
    /// Renders and decrements once per second. Any gesture stops the count.
    /// Returns the value at exit: `-1` when the count ran out, the remaining
    /// seconds when interrupted.
    pub async fn countdown(&mut self, start: u16) -> i32 {
        // Let the release of the confirming tap arrive before listening
        self.board.clock.delay_ms(self.timer.countdown_settle_ms).await;
        self.gestures.clear();

        let mut remaining = i32::from(start);
        while remaining >= 0 && !self.gestures.any() {
            self.board.display.render(clamp_seconds(remaining)).await.ok();
            self.board.clock.delay_ms(1000).await;
            remaining -= 1;
        }
        remaining
    }
}
