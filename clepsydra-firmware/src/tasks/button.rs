//! Push button task
//!
//! Classifies the button into gestures for the controller and wakes the
//! power manager while the device sleeps.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Instant, Timer};
use portable_atomic::Ordering;

use clepsydra_core::config::ButtonConfig;
use clepsydra_drivers::button::GestureDetector;

use crate::channels::{GESTURES, SLEEPING, WAKE};

/// Sampling interval while a gesture is in progress
const SAMPLE_MS: u64 = 10;

/// Button task
///
/// Sleeps on a pin edge while nothing is pending and samples every
/// [`SAMPLE_MS`] while the classifier has debounce or gesture timers
/// running. The button is active low.
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, config: ButtonConfig) {
    info!("Button task started");

    let mut detector = GestureDetector::new(&config);

    loop {
        if detector.is_idle() {
            button.wait_for_any_edge().await;
            if SLEEPING.load(Ordering::Acquire) {
                WAKE.signal(());
            }
        } else {
            Timer::after_millis(SAMPLE_MS).await;
        }

        let now_ms = Instant::now().as_millis();
        detector.update(button.is_low(), now_ms, |gesture| {
            debug!("Gesture: {:?}", gesture);
            GESTURES.set(gesture);
        });
    }
}
