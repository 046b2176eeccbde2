//! Alarm tone playback
//!
//! A song is parsed once from text and then played back tick by tick on a
//! single-voice output such as a PWM buzzer.

pub mod note;
pub mod sequencer;
pub mod song;

pub use note::Pitch;
pub use sequencer::SongPlayer;
pub use song::{Note, Song, SongError, MAX_NOTES};

/// Trait for a single-voice tone output
pub trait ToneOutput {
    /// Start (or retune) a square wave at the given frequency
    fn play(&mut self, frequency_hz: u32);

    /// Stop sounding
    fn mute(&mut self);
}
