//! Main controller task
//!
//! Runs the timer controller: the start-up screen once, then one phase
//! after another, logging every transition.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;

use clepsydra_core::config::DeviceConfig;
use clepsydra_core::traits::Board;
use clepsydra_core::{Outcome, TimerController};
use clepsydra_drivers::tone::SongPlayer;
use clepsydra_drivers::vibration::GpioActuator;

use crate::channels::GESTURES;
use crate::display::OledDisplay;
use crate::platform::{EmbassyClock, PwmTone, SharedEncoder, WakePower};

/// The OLED on its I2C bus
pub type Display = OledDisplay<I2c<'static, I2C1, Async>>;

/// The alarm song on the buzzer
pub type Tone = SongPlayer<PwmTone>;

/// The vibration motor
pub type Vibration = GpioActuator<Output<'static>>;

/// Controller task - main control loop
#[embassy_executor::task]
pub async fn controller_task(
    config: &'static DeviceConfig,
    display: Display,
    tone: Tone,
    vibration: Vibration,
) {
    info!("Controller task started");

    let board = Board {
        encoder: SharedEncoder,
        display,
        tone,
        vibration,
        power: WakePower,
        clock: EmbassyClock,
    };
    let mut controller = TimerController::new(config, &GESTURES, board);

    controller.boot().await;
    info!("Boot complete, entering {:?}", controller.phase());

    loop {
        let (outcome, next) = controller.step().await;
        match outcome {
            Outcome::TimeSet(seconds) => info!("Time set to {}s", seconds),
            Outcome::CountdownEnded(remaining) if remaining <= 0 => {
                info!("Countdown expired")
            }
            Outcome::CountdownEnded(remaining) => {
                info!("Countdown interrupted with {}s left", remaining)
            }
            Outcome::AlarmEnded { acknowledged } => {
                info!("Alarm ended (acknowledged: {})", acknowledged)
            }
        }
        debug!("Phase -> {:?}, duration {}s", next, controller.duration());
    }
}
