//! Duration formatting for the display

use core::fmt::Write;

use heapless::String;

use crate::MAX_SECONDS;

/// Format a duration as `MM:SS`
///
/// Durations above 99:59 are shown as 99:59.
pub fn format_mmss(seconds: u16) -> String<5> {
    let seconds = seconds.min(MAX_SECONDS);
    let mut out = String::new();
    // Five characters always fit
    let _ = write!(out, "{:02}:{:02}", seconds / 60, seconds % 60);
    out
}

/// Clamp a countdown value to a displayable duration
///
/// The countdown runs one past zero to signal expiry; that value (and any
/// other negative) maps to zero.
pub fn clamp_seconds(value: i32) -> u16 {
    value.clamp(0, i32::from(MAX_SECONDS)) as u16
}
