//! SetTime phase: dial in a duration
//!
//! The encoder is polled every `poll_ms`. Its reading snaps to the
//! quantization step in the direction of travel and the encoder is locked
//! to the snapped value. A tap confirms; holding the button zeroes the
//! encoder. This is the only phase in which the idle watchdog can put the
//! device to sleep.

use embedded_hal_async::delay::DelayNs;

use super::controller::TimerController;
use crate::format::clamp_seconds;
use crate::quantize::snap;
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
    /// Run the SetTime phase until a tap confirms the value
    ///
    /// Starts from the carried-over duration. If `apply` is set and the
    /// duration is non-zero the encoder is first forced to it; `apply` is
    /// cleared either way.
    pub async fn set_time(&mut self) -> u16 {
        let step = self.timer.step_s;
        let mut current = i32::from(self.duration);

        if self.apply && current > 0 {
            self.board.encoder.set(current);
        }
        self.apply = false;

        self.gestures.clear();
        self.watchdog.trigger(self.board.clock.now_ms());

        loop {
            if self.watchdog.poll(self.board.clock.now_ms()) {
                self.sleep().await;
            }

            let flags = self.gestures.snapshot();

            let reading = self.board.encoder.read();
            if let Some(snapped) = snap(current, reading, step) {
                current = snapped;
                self.watchdog.trigger(self.board.clock.now_ms());
            }
            if reading != current {
                self.board.encoder.set(current);
            }

            // A turn in the same poll as the tap still counts
            if flags.is_confirm() {
                break;
            }

            if flags.is_hold_reset() {
                self.board.encoder.reset();
                self.gestures.clear();
            }

            self.board.display.render(clamp_seconds(current)).await.ok();
            self.board.clock.delay_ms(self.timer.poll_ms).await;
        }

        self.watchdog.stop();
        clamp_seconds(current)
    }

    /// Idle sleep: a transparent pause inside SetTime
    ///
    /// The press that wakes the device is dropped: gestures are cleared only
    /// after `wake_settle_ms`, by which time the wake gesture has been fully
    /// reported.
    async fn sleep(&mut self) {
        self.watchdog.stop();
        self.board.display.power(false).await.ok();
        self.board.power.sleep_until_wake().await;
        self.board.clock.delay_ms(self.timer.wake_settle_ms).await;
        self.gestures.clear();
        self.board.display.power(true).await.ok();
        self.watchdog.trigger(self.board.clock.now_ms());
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DeviceConfig;
    use crate::input::Gesture;
    use crate::state::TimerController;
    use crate::testing::{Action, HwEvent, SimController, SimHandle};
    use embassy_futures::block_on;

    fn controller(sim: &SimHandle) -> SimController {
        TimerController::new(&DeviceConfig::default(), sim.gestures(), sim.board())
    }

    #[test]
    fn test_tap_confirms_immediately() {
        let sim = SimHandle::new();
        sim.at(0, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 0);
        assert_eq!(sim.renders(), vec![0]);
        assert!(!ctrl.watchdog.is_armed());
    }

    #[test]
    fn test_turn_and_tap_in_one_poll() {
        let sim = SimHandle::new();
        sim.at(101, Action::Turn(60)).at(102, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 60);
        assert_eq!(sim.position(), 60);
    }

    #[test]
    fn test_turn_and_tap_in_one_poll_locks_snapped_value() {
        let sim = SimHandle::new();
        sim.at(101, Action::Turn(62)).at(102, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 60);
        assert_eq!(sim.position(), 60);
        assert_eq!(sim.count(HwEvent::EncoderSet(60)), 1);
    }

    #[test]
    fn test_stale_gestures_are_cleared() {
        let sim = SimHandle::new();
        // A tap left over from the previous phase
        sim.gestures().set(Gesture::Press);
        sim.gestures().set(Gesture::Release);
        sim.at(200, Action::Turn(40)).at(500, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 40);
        assert!(sim.now_ms() >= 500);
    }

    #[test]
    fn test_snaps_toward_direction_of_travel() {
        let sim = SimHandle::new();
        sim.at(100, Action::Turn(37))
            .at(200, Action::Turn(33))
            .at(300, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 35);

        // Up to 37 rounds down, back down to 33 rounds up: both land on 35
        // and the encoder is locked there each time
        assert_eq!(sim.count(HwEvent::EncoderSet(35)), 2);
        assert_eq!(sim.position(), 35);
        assert!(sim.renders().iter().all(|v| v % 5 == 0));
    }

    #[test]
    fn test_on_step_reading_is_not_rewritten() {
        let sim = SimHandle::new();
        sim.at(100, Action::Turn(40)).at(200, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 40);
        assert!(!sim
            .events()
            .iter()
            .any(|e| matches!(e, HwEvent::EncoderSet(_))));
    }

    #[test]
    fn test_hold_resets_encoder() {
        let sim = SimHandle::new();
        sim.at(100, Action::Turn(120))
            .at(500, Action::Hold)
            .at(1_000, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 0);
        assert_eq!(sim.count(HwEvent::EncoderReset), 1);
        assert!(sim.renders().contains(&120));
        assert_eq!(sim.renders().last(), Some(&0));
    }

    #[test]
    fn test_double_press_does_not_confirm() {
        let sim = SimHandle::new();
        sim.at(100, Action::Turn(60))
            .at(200, Action::Gesture(Gesture::Press))
            .at(200, Action::Gesture(Gesture::DoublePress))
            .at(250, Action::Gesture(Gesture::Release))
            // Matches neither pattern and stays latched until the wake clear
            .at(20_000, Action::Gesture(Gesture::Press))
            .at(21_500, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 60);
        assert_eq!(sim.count(HwEvent::Sleep), 1);
    }

    #[test]
    fn test_apply_resyncs_encoder() {
        let sim = SimHandle::new();
        sim.at(100, Action::Tap);

        let mut ctrl = controller(&sim);
        ctrl.duration = 120;
        ctrl.apply = true;
        assert_eq!(block_on(ctrl.set_time()), 120);
        assert_eq!(sim.events().first(), Some(&HwEvent::EncoderSet(120)));
        assert!(!ctrl.apply);
    }

    #[test]
    fn test_stale_duration_is_not_applied() {
        let sim = SimHandle::new();
        sim.at(100, Action::Turn(45)).at(200, Action::Tap);

        let mut ctrl = controller(&sim);
        ctrl.duration = 120;
        ctrl.apply = false;

        // The encoder position wins over a stale duration
        assert_eq!(block_on(ctrl.set_time()), 45);
        assert_eq!(sim.count(HwEvent::EncoderSet(120)), 0);
    }

    #[test]
    fn test_idle_sleep_and_wake() {
        let sim = SimHandle::new();
        sim.at(30_000, Action::Gesture(Gesture::Press))
            .at(32_000, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 0);

        let timed = sim.timed_events();
        let sleep_at = timed
            .iter()
            .find(|(_, e)| *e == HwEvent::Sleep)
            .map(|(t, _)| *t);
        assert_eq!(sleep_at, Some(10_000));

        let power: Vec<_> = timed
            .iter()
            .filter(|(_, e)| matches!(e, HwEvent::DisplayPower(_)))
            .copied()
            .collect();
        // Display off before sleeping, on again after the settle delay
        assert_eq!(
            power,
            vec![
                (10_000, HwEvent::DisplayPower(false)),
                (31_000, HwEvent::DisplayPower(true)),
            ]
        );
        assert_eq!(sim.count(HwEvent::Sleep), 1);
    }

    #[test]
    fn test_activity_pushes_sleep_back() {
        let sim = SimHandle::new();
        sim.at(6_000, Action::Turn(10))
            .at(40_000, Action::Gesture(Gesture::Press))
            .at(45_000, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 10);

        let sleep_at = sim
            .timed_events()
            .iter()
            .find(|(_, e)| *e == HwEvent::Sleep)
            .map(|(t, _)| *t);
        assert_eq!(sleep_at, Some(16_000));
    }

    #[test]
    fn test_rendering_continues_without_display() {
        let sim = SimHandle::new();
        sim.fail_display();
        sim.at(100, Action::Turn(20)).at(200, Action::Tap);

        let mut ctrl = controller(&sim);
        assert_eq!(block_on(ctrl.set_time()), 20);
        assert!(sim.renders().is_empty());
    }
}
