//! Push button gesture classification
//!
//! Turns a sampled button level into press, release, double-press and
//! long-press gestures. The classifier is purely time driven: the caller
//! feeds it the raw level and a millisecond timestamp, so it runs the same
//! on the device and on the host.
//!
//! Release is suppressed for gestures that already mean something else:
//! after a long press or a double press the release is not reported, and
//! the release of a plain tap is held back until the double-click window
//! has passed.

use clepsydra_core::config::ButtonConfig;
use clepsydra_core::input::Gesture;

/// Button gesture classifier
#[derive(Debug, Clone)]
pub struct GestureDetector {
    debounce_ms: u64,
    double_click_ms: u64,
    long_press_ms: u64,
    /// Last raw level and when it was first seen
    raw: bool,
    raw_since: u64,
    /// Debounced level
    pressed: bool,
    /// Double-click window of the last first press
    double_deadline: Option<u64>,
    /// Long-press deadline of the current press
    long_deadline: Option<u64>,
    /// The current press completed a double press
    double_ran: bool,
}

impl GestureDetector {
    /// Create a classifier with the button released
    pub const fn new(config: &ButtonConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms as u64,
            double_click_ms: config.double_click_ms as u64,
            long_press_ms: config.long_press_ms as u64,
            raw: false,
            raw_since: 0,
            pressed: false,
            double_deadline: None,
            long_deadline: None,
            double_ran: false,
        }
    }

    /// Feed a raw level sample (`true` = pressed)
    ///
    /// Calls `emit` for each gesture recognized at this instant. Must be
    /// called at least every few milliseconds while [`Self::is_idle`] is
    /// false; timed gestures are only reported from here.
    pub fn update(&mut self, raw_pressed: bool, now_ms: u64, mut emit: impl FnMut(Gesture)) {
        self.poll_timers(now_ms, &mut emit);

        if raw_pressed != self.raw {
            self.raw = raw_pressed;
            self.raw_since = now_ms;
        }

        let stable_for = now_ms.saturating_sub(self.raw_since);
        if self.raw != self.pressed && stable_for >= self.debounce_ms {
            self.pressed = self.raw;
            if self.pressed {
                self.on_press(now_ms, &mut emit);
            } else {
                self.on_release(&mut emit);
            }
        }
    }

    /// Check if nothing is pending
    ///
    /// When idle, the caller may wait for the next pin edge instead of
    /// sampling.
    pub fn is_idle(&self) -> bool {
        !self.pressed
            && !self.raw
            && self.double_deadline.is_none()
            && self.long_deadline.is_none()
    }

    /// Debounced button state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn on_press(&mut self, now_ms: u64, emit: &mut impl FnMut(Gesture)) {
        emit(Gesture::Press);
        self.long_deadline = Some(now_ms + self.long_press_ms);

        if self.double_deadline.take().is_some() {
            // Second press inside the window
            self.double_ran = true;
            emit(Gesture::DoublePress);
        } else {
            self.double_deadline = Some(now_ms + self.double_click_ms);
        }
    }

    fn on_release(&mut self, emit: &mut impl FnMut(Gesture)) {
        // Report now only if the double-click window is over and no long
        // press or double press claimed this press
        let long_pending = self.long_deadline.take().is_some();
        if self.double_deadline.is_none() && !self.double_ran && long_pending {
            emit(Gesture::Release);
        }
        self.double_ran = false;
    }

    fn poll_timers(&mut self, now_ms: u64, emit: &mut impl FnMut(Gesture)) {
        if self.double_deadline.is_some_and(|d| now_ms >= d) {
            self.double_deadline = None;
            // Deferred release of a plain tap
            if !self.pressed && self.long_deadline.is_none() {
                emit(Gesture::Release);
            }
        }

        if self.long_deadline.is_some_and(|d| now_ms >= d) {
            self.long_deadline = None;
            emit(Gesture::LongPress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clepsydra_core::input::GestureLatch;

    const SAMPLE_MS: u64 = 10;

    /// Sample a scripted level every 10 ms and collect timed gestures
    ///
    /// `presses` lists (down_ms, up_ms) intervals of the raw level.
    fn run(presses: &[(u64, u64)], until_ms: u64) -> Vec<(u64, Gesture)> {
        let mut detector = GestureDetector::new(&ButtonConfig::default());
        let mut out = Vec::new();
        let mut now = 0;
        while now <= until_ms {
            let level = presses.iter().any(|&(down, up)| down <= now && now < up);
            detector.update(level, now, |g| out.push((now, g)));
            now += SAMPLE_MS;
        }
        assert!(detector.is_idle(), "gesture still pending at {until_ms} ms");
        out
    }

    fn kinds(events: &[(u64, Gesture)]) -> Vec<Gesture> {
        events.iter().map(|(_, g)| *g).collect()
    }

    #[test]
    fn test_tap_releases_after_double_window() {
        let events = run(&[(0, 150)], 1_000);
        assert_eq!(
            events,
            vec![(50, Gesture::Press), (450, Gesture::Release)]
        );
    }

    #[test]
    fn test_slow_tap_releases_immediately() {
        // Held past the double-click window but short of a long press
        let events = run(&[(0, 700)], 1_500);
        assert_eq!(
            events,
            vec![(50, Gesture::Press), (750, Gesture::Release)]
        );
    }

    #[test]
    fn test_long_press_suppresses_release() {
        let events = run(&[(0, 2_000)], 3_000);
        assert_eq!(
            events,
            vec![(50, Gesture::Press), (1_050, Gesture::LongPress)]
        );
    }

    #[test]
    fn test_double_press() {
        let events = run(&[(0, 100), (200, 300)], 1_500);
        assert_eq!(
            kinds(&events),
            vec![Gesture::Press, Gesture::Press, Gesture::DoublePress]
        );
        assert_eq!(events[2].0, 250);
    }

    #[test]
    fn test_bounce_is_filtered() {
        // 20 ms of chatter before the contact settles
        let events = run(&[(0, 10), (20, 30), (40, 200)], 1_000);
        assert_eq!(
            events,
            vec![(90, Gesture::Press), (490, Gesture::Release)]
        );

        // A glitch shorter than the debounce time is not a press
        assert!(run(&[(0, 30)], 500).is_empty());
    }

    #[test]
    fn test_second_tap_after_window_is_separate() {
        let events = run(&[(0, 100), (600, 700)], 2_000);
        assert_eq!(
            kinds(&events),
            vec![
                Gesture::Press,
                Gesture::Release,
                Gesture::Press,
                Gesture::Release
            ]
        );
    }

    #[test]
    fn test_latch_patterns() {
        let confirm = GestureLatch::new();
        for (_, g) in run(&[(0, 100)], 1_000) {
            confirm.set(g);
        }
        assert!(confirm.snapshot().is_confirm());

        // Reset pattern appears while the button is still held
        let mut detector = GestureDetector::new(&ButtonConfig::default());
        let hold = GestureLatch::new();
        let mut now = 0;
        while now <= 1_100 {
            detector.update(true, now, |g| hold.set(g));
            now += SAMPLE_MS;
        }
        assert!(hold.snapshot().is_hold_reset());
        assert!(detector.is_pressed());
    }
}
