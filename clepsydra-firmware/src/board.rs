//! Board wiring
//!
//! Pin and bus assignments of the reference board (Raspberry Pi Pico).
//! The peripherals themselves are taken in `main`; these constants document
//! which ones and carry the values the drivers need.

/// Rotary encoder CLK (A) input
pub const ENCODER_CLK_GPIO: u8 = 3;
/// Rotary encoder DT (B) input
pub const ENCODER_DT_GPIO: u8 = 4;

/// Push button input, pulled up, pressed = low
pub const BUTTON_GPIO: u8 = 7;

/// Piezo buzzer, PWM slice 2 channel B
pub const BUZZER_GPIO: u8 = 5;

/// Vibration motor driver input, active high
pub const VIBRATION_GPIO: u8 = 28;
pub const VIBRATION_ACTIVE_LOW: bool = false;

/// OLED on I2C1
pub const OLED_SDA_GPIO: u8 = 26;
pub const OLED_SCL_GPIO: u8 = 27;
pub const OLED_I2C_ADDR: u8 = 0x3C;
pub const OLED_I2C_FREQUENCY_HZ: u32 = 400_000;

/// Buzzer PWM clock divider
///
/// With a 125 MHz system clock the counter runs at ~1.95 MHz, so every
/// note of the alarm song fits the 16-bit top value.
pub const BUZZER_PWM_DIVIDER: u8 = 64;
