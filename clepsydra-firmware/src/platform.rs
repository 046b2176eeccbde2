//! RP2040 implementations of the controller's collaborators
//!
//! The chip-independent pieces live in clepsydra-drivers; what remains here
//! needs embassy-rp peripherals or the embassy time driver.

use defmt::*;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Instant, Timer};
use embedded_hal_async::delay::DelayNs;
use portable_atomic::Ordering;

use clepsydra_core::traits::{Clock, Encoder, PowerManager};
use clepsydra_drivers::tone::ToneOutput;

use crate::board::BUZZER_PWM_DIVIDER;
use crate::channels::{ENCODER, SLEEPING, WAKE};

/// Piezo buzzer on a PWM slice channel B
pub struct PwmTone {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmTone {
    /// Take over a PWM slice, output silent
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = BUZZER_PWM_DIVIDER.into();
        config.compare_b = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl ToneOutput for PwmTone {
    fn play(&mut self, frequency_hz: u32) {
        if frequency_hz == 0 {
            self.mute();
            return;
        }
        let counter_hz = clk_sys_freq() / u32::from(BUZZER_PWM_DIVIDER);
        let top = (counter_hz / frequency_hz).saturating_sub(1).clamp(1, u32::from(u16::MAX));
        self.config.top = top as u16;
        // 50% duty
        self.config.compare_b = ((top + 1) / 2) as u16;
        self.pwm.set_config(&self.config);
    }

    fn mute(&mut self) {
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
    }
}

/// Low-power entry that waits for the button task's wake signal
///
/// Every task is parked on a GPIO edge or a timer while this is pending,
/// so the executor idles in WFE until the button is touched.
pub struct WakePower;

impl PowerManager for WakePower {
    async fn sleep_until_wake(&mut self) {
        info!("Idle timeout, sleeping until button edge");
        WAKE.reset();
        SLEEPING.store(true, Ordering::Release);
        WAKE.wait().await;
        SLEEPING.store(false, Ordering::Release);
        info!("Woken by button");
    }
}

/// Time base and delays on embassy-time
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

impl DelayNs for EmbassyClock {
    async fn delay_ns(&mut self, ns: u32) {
        Timer::after_nanos(u64::from(ns)).await
    }

    async fn delay_us(&mut self, us: u32) {
        Timer::after_micros(u64::from(us)).await
    }

    async fn delay_ms(&mut self, ms: u32) {
        Timer::after_millis(u64::from(ms)).await
    }
}

/// Handle on the encoder counter shared with the encoder task
pub struct SharedEncoder;

impl Encoder for SharedEncoder {
    fn read(&self) -> i32 {
        ENCODER.lock(|counter| counter.borrow().read())
    }

    fn set(&mut self, value: i32) {
        ENCODER.lock(|counter| counter.borrow_mut().set(value));
    }
}
