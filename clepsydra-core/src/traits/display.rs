//! Display driver trait for the countdown screen

use core::future::Future;

/// Trait for the time display
///
/// The display shows a single duration as `MM:SS`. All formatting of the
/// value happens in [`crate::format`]; implementations only put pixels on
/// the panel.
pub trait TimeDisplay {
    /// Driver-specific communication error
    type Error: core::fmt::Debug;

    /// Render a duration in seconds as `MM:SS`
    ///
    /// The argument is unsigned: a negative duration cannot reach the panel.
    fn render(&mut self, seconds: u16) -> impl Future<Output = Result<(), Self::Error>>;

    /// Fill the whole panel with lit (`true`) or dark (`false`) pixels
    fn clear(&mut self, on: bool) -> impl Future<Output = Result<(), Self::Error>>;

    /// Invert the panel colors in hardware
    fn invert(&mut self, on: bool) -> impl Future<Output = Result<(), Self::Error>>;

    /// Switch the panel on or off (frame buffer contents are kept)
    fn power(&mut self, on: bool) -> impl Future<Output = Result<(), Self::Error>>;
}
