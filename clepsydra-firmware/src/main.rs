//! Clepsydra - Rotary Countdown Timer Firmware
//!
//! Main firmware binary for RP2040-based timer boards: turn the encoder to
//! set a duration, tap the button to start, and the buzzer and vibration
//! motor sound the alarm when it runs out.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use clepsydra_core::config::{parse_config, DeviceConfig, DEFAULT_SONG};
use clepsydra_drivers::encoder::BoundedCounter;
use clepsydra_drivers::tone::{Song, SongPlayer};
use clepsydra_drivers::vibration::GpioActuator;

use crate::board::{OLED_I2C_ADDR, OLED_I2C_FREQUENCY_HZ, VIBRATION_ACTIVE_LOW};
use crate::channels::ENCODER;
use crate::display::OledDisplay;
use crate::platform::PwmTone;

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

mod board;
mod channels;
mod display;
mod platform;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

/// Device configuration, alive for the program duration
static DEVICE_CONFIG: StaticCell<DeviceConfig> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Clepsydra firmware starting...");

    let p = embassy_rp::init(Default::default());

    let config: &'static DeviceConfig = DEVICE_CONFIG.init(load_config());

    // Encoder range and step come from the configuration
    ENCODER.lock(|counter| {
        *counter.borrow_mut() = BoundedCounter::from_config(&config.encoder);
    });

    // Rotary encoder (CLK GPIO3, DT GPIO4) and push button (GPIO7)
    let enc_clk = Input::new(p.PIN_3, Pull::Up);
    let enc_dt = Input::new(p.PIN_4, Pull::Up);
    let button = Input::new(p.PIN_7, Pull::Up);

    info!("Inputs initialized");

    // OLED on I2C1 (SDA GPIO26, SCL GPIO27)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = OLED_I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_27, p.PIN_26, Irqs, i2c_config);
    let display = OledDisplay::new(i2c, OLED_I2C_ADDR).await;

    // Buzzer on PWM slice 2 channel B (GPIO5)
    let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_5, PwmConfig::default());
    let tone = SongPlayer::new(load_song(config), PwmTone::new(pwm), config.tone.ticks_per_beat);
    info!(
        "Alarm song loaded: {} ticks at {}ms",
        tone.length_ticks(),
        config.alarm.tone_tick_ms
    );

    // Vibration motor (GPIO28)
    let vibration = GpioActuator::new(Output::new(p.PIN_28, Level::Low), VIBRATION_ACTIVE_LOW);

    info!("Outputs initialized");

    // Spawn tasks
    spawner
        .spawn(tasks::encoder_task(enc_clk, enc_dt, config.encoder.half_step))
        .unwrap();
    spawner
        .spawn(tasks::button_task(button, config.button))
        .unwrap();
    spawner
        .spawn(tasks::controller_task(config, display, tone, vibration))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse and validate the embedded configuration
///
/// Falls back to the built-in defaults if device.toml does not parse or
/// holds values the controller cannot run with.
fn load_config() -> DeviceConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            return DeviceConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Invalid embedded config: {:?}", e);
            error!("Using default configuration");
            DeviceConfig::default()
        }
    }
}

/// Parse the configured alarm song, falling back to the default one
fn load_song(config: &DeviceConfig) -> Song {
    match Song::parse(&config.tone.song) {
        Ok(song) => song,
        Err(e) => {
            warn!("Bad alarm song: {:?}, using default", e);
            Song::parse(DEFAULT_SONG).unwrap_or_default()
        }
    }
}
