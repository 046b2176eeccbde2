//! Simple TOML parser for the device configuration
//!
//! A minimal parser for the subset of TOML the device file uses. It does
//! NOT support the full TOML spec.
//!
//! Supported features:
//! - [section] headers
//! - Key = value pairs (string, integer, boolean)
//! - Comments (# ...), also after a value
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted keys

use core::str::FromStr;

use heapless::String;

use super::types::DeviceConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section header names no known section
    UnknownSection,
    /// Key is not valid for the current section
    UnknownKey,
    /// Value has the wrong type or is out of range for its field
    InvalidValue,
    /// Line is neither a header nor a `key = value` pair
    InvalidLine,
    /// Key/value pair before the first section header
    MissingSection,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Encoder,
    Button,
    Timer,
    Alarm,
    Tone,
}

/// Parse TOML configuration into a DeviceConfig
///
/// Keys that are absent keep their default value. The result is not
/// validated; call [`DeviceConfig::validate`] on it.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Parse a section header like "[timer]"
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = strip_comment(line)
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidLine)?;

    match header.trim() {
        "encoder" => Ok(Section::Encoder),
        "button" => Ok(Section::Button),
        "timer" => Ok(Section::Timer),
        "alarm" => Ok(Section::Alarm),
        "tone" => Ok(Section::Tone),
        _ => Err(ParseError::UnknownSection),
    }
}

/// Drop a trailing comment that is not inside a string
fn strip_comment(text: &str) -> &str {
    let mut in_string = false;
    for (i, c) in text.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return text[..i].trim(),
            _ => {}
        }
    }
    text.trim()
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = strip_comment(value);

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)?;
    String::try_from(inner).map_err(|_| ParseError::InvalidValue)
}

/// Parse an integer value (underscore separators allowed)
fn parse_int<T: FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::MissingSection),
        Section::Encoder => {
            let enc = &mut config.encoder;
            match key {
                "min" => enc.min = parse_int(value)?,
                "max" => enc.max = parse_int(value)?,
                "step" => enc.step = parse_int(value)?,
                "reverse" => enc.reverse = parse_bool(value)?,
                "half_step" => enc.half_step = parse_bool(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Button => {
            let btn = &mut config.button;
            match key {
                "debounce_ms" => btn.debounce_ms = parse_int(value)?,
                "double_click_ms" => btn.double_click_ms = parse_int(value)?,
                "long_press_ms" => btn.long_press_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Timer => {
            let timer = &mut config.timer;
            match key {
                "step_s" => timer.step_s = parse_int(value)?,
                "poll_ms" => timer.poll_ms = parse_int(value)?,
                "idle_timeout_ms" => timer.idle_timeout_ms = parse_int(value)?,
                "wake_settle_ms" => timer.wake_settle_ms = parse_int(value)?,
                "countdown_settle_ms" => timer.countdown_settle_ms = parse_int(value)?,
                "splash_s" => timer.splash_s = parse_int(value)?,
                "splash_ms" => timer.splash_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Alarm => {
            let alarm = &mut config.alarm;
            match key {
                "repetitions" => alarm.repetitions = parse_int(value)?,
                "tone_tick_ms" => alarm.tone_tick_ms = parse_int(value)?,
                "blink_on_ms" => alarm.blink_on_ms = parse_int(value)?,
                "blink_off_ms" => alarm.blink_off_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Tone => {
            let tone = &mut config.tone;
            match key {
                "song" => tone.song = parse_string(value)?,
                "ticks_per_beat" => tone.ticks_per_beat = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
    }
    Ok(())
}
