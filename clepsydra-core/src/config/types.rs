//! Configuration type definitions
//!
//! These types describe the device behavior. Defaults match the
//! reference hardware; a `device.toml` may override any of them.

use heapless::String;

use crate::MAX_SECONDS;

/// Maximum length of the alarm song text
pub const MAX_SONG_LEN: usize = 160;

/// Allowed range for the set-time poll interval (ms)
pub const POLL_MS_RANGE: core::ops::RangeInclusive<u32> = 10..=50;

/// Alarm song of the reference device
pub const DEFAULT_SONG: &str =
    "0 F5 1 34;1 C6 1 34;2 C6 1 34;2 E6 1 34;3 F6 1 34;4 C7 1 34;6 A6 1 34;7 E7 2 34";

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Encoder range is empty or exceeds 99:59
    EncoderRange,
    /// Encoder step or quantization step is zero or negative
    ZeroStep,
    /// Poll interval outside 10-50 ms
    PollInterval,
    /// Alarm needs at least one repetition
    NoRepetitions,
    /// A timing value that must be positive is zero
    ZeroTiming,
}

/// Rotary encoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Lowest position
    pub min: i32,
    /// Highest position
    pub max: i32,
    /// Position change per detent
    pub step: i32,
    /// Swap the rotation direction
    pub reverse: bool,
    /// Count on every half quadrature cycle instead of every full cycle
    pub half_step: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            min: 0,
            max: i32::from(MAX_SECONDS),
            step: 5,
            reverse: false,
            half_step: true,
        }
    }
}

/// Button gesture timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Time the level must be stable before it is accepted
    pub debounce_ms: u32,
    /// Window after a release in which a second press counts as a double press
    pub double_click_ms: u32,
    /// Hold time for a long press
    pub long_press_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            double_click_ms: 400,
            long_press_ms: 1000,
        }
    }
}

/// Set-time and countdown behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Quantization step of the set value (seconds)
    pub step_s: i32,
    /// Input poll interval while setting the time
    pub poll_ms: u32,
    /// Inactivity before the device goes to sleep
    pub idle_timeout_ms: u32,
    /// Pause after wake-up before gestures are accepted again
    pub wake_settle_ms: u32,
    /// Pause before the countdown starts listening for gestures
    pub countdown_settle_ms: u32,
    /// Value shown on the start-up screen
    pub splash_s: u16,
    /// Duration of the start-up screen
    pub splash_ms: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            step_s: 5,
            poll_ms: 10,
            idle_timeout_ms: 10_000,
            wake_settle_ms: 1000,
            countdown_settle_ms: 50,
            splash_s: MAX_SECONDS,
            splash_ms: 3000,
        }
    }
}

/// Alarm cycle behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmConfig {
    /// Number of tone/blink cycles before the alarm gives up
    pub repetitions: u8,
    /// Tone sequencer tick period
    pub tone_tick_ms: u32,
    /// Vibration on, display inverted
    pub blink_on_ms: u32,
    /// Vibration off, display normal
    pub blink_off_ms: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            repetitions: 11,
            tone_tick_ms: 30,
            blink_on_ms: 500,
            blink_off_ms: 500,
        }
    }
}

/// Alarm tone
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneConfig {
    /// Note sequence (`start note beats instrument;...`)
    pub song: String<MAX_SONG_LEN>,
    /// Sequencer ticks per beat
    pub ticks_per_beat: u8,
}

impl Default for ToneConfig {
    fn default() -> Self {
        let mut song = String::new();
        // DEFAULT_SONG is shorter than MAX_SONG_LEN
        let _ = song.push_str(DEFAULT_SONG);
        Self {
            song,
            ticks_per_beat: 4,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub encoder: EncoderConfig,
    pub button: ButtonConfig,
    pub timer: TimerConfig,
    pub alarm: AlarmConfig,
    pub tone: ToneConfig,
}

impl DeviceConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let enc = &self.encoder;
        if enc.min < 0 || enc.min >= enc.max || enc.max > i32::from(MAX_SECONDS) {
            return Err(ConfigError::EncoderRange);
        }
        if enc.step <= 0 || self.timer.step_s <= 0 {
            return Err(ConfigError::ZeroStep);
        }
        if !POLL_MS_RANGE.contains(&self.timer.poll_ms) {
            return Err(ConfigError::PollInterval);
        }
        if self.alarm.repetitions == 0 {
            return Err(ConfigError::NoRepetitions);
        }
        if self.alarm.tone_tick_ms == 0
            || self.timer.idle_timeout_ms == 0
            || self.tone.ticks_per_beat == 0
        {
            return Err(ConfigError::ZeroTiming);
        }
        Ok(())
    }
}
