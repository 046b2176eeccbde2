//! Tick-driven song playback

use clepsydra_core::traits::ToneSequencer;

use super::song::{Song, BEAT};
use super::ToneOutput;

/// Plays a [`Song`] on a single-voice output, one tick at a time
pub struct SongPlayer<O> {
    song: Song,
    output: O,
    ticks_per_beat: u32,
    tick: u32,
    /// Frequency currently sounding
    playing: Option<u32>,
}

impl<O: ToneOutput> SongPlayer<O> {
    /// Create a player, output muted
    ///
    /// `ticks_per_beat` of zero is treated as one.
    pub fn new(song: Song, output: O, ticks_per_beat: u8) -> Self {
        let mut player = Self {
            song,
            output,
            ticks_per_beat: u32::from(ticks_per_beat.max(1)),
            tick: 0,
            playing: None,
        };
        player.output.mute();
        player
    }

    /// Song position of a tick (hundredths of a beat)
    fn position(&self, tick: u32) -> u32 {
        tick.saturating_mul(BEAT) / self.ticks_per_beat
    }

    fn sound(&mut self, frequency: Option<u32>) {
        if frequency == self.playing {
            return;
        }
        match frequency {
            Some(hz) => self.output.play(hz),
            None => self.output.mute(),
        }
        self.playing = frequency;
    }

    /// Number of ticks a full playback takes
    pub fn length_ticks(&self) -> u32 {
        // Smallest tick whose position reaches the end of the song
        let ticks = (u64::from(self.song.end()) * u64::from(self.ticks_per_beat)).div_ceil(u64::from(BEAT));
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    /// Check if the song has finished
    pub fn is_finished(&self) -> bool {
        self.position(self.tick) >= self.song.end()
    }

    /// The output driver
    pub fn output(&self) -> &O {
        &self.output
    }
}

impl<O: ToneOutput> ToneSequencer for SongPlayer<O> {
    fn restart(&mut self) {
        self.tick = 0;
        self.sound(None);
    }

    fn advance_tick(&mut self) -> bool {
        if self.is_finished() {
            self.sound(None);
            return false;
        }

        let frequency = self.song.frequency_at(self.position(self.tick));
        self.sound(frequency);
        self.tick += 1;
        true
    }
}
