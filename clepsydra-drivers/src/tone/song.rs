//! Song text parsing
//!
//! Songs use the export format of common online step sequencers: notes
//! separated by `;`, each note `start pitch length instrument`, e.g.
//! `0 F5 1 34;1 C6 1 34`. Start and length are in beats and may carry up
//! to two decimals (`1.5`). The instrument number is kept but a buzzer has
//! only one voice.

use heapless::Vec;

use super::note::Pitch;

/// Maximum number of notes in a song
pub const MAX_NOTES: usize = 32;

/// Beat positions are stored in hundredths of a beat
pub const BEAT: u32 = 100;

/// Song parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SongError {
    /// A note does not have exactly four fields
    Format,
    /// Pitch is not a note name (rests are not supported)
    Pitch,
    /// Start, length or instrument is not a valid number
    Number,
    /// Note has zero length
    ZeroLength,
    /// More than [`MAX_NOTES`] notes
    TooManyNotes,
}

/// One note of a song
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Start position (hundredths of a beat)
    pub start: u32,
    /// Length (hundredths of a beat)
    pub length: u32,
    pub pitch: Pitch,
    pub instrument: u8,
}

impl Note {
    /// End position (hundredths of a beat)
    pub fn end(&self) -> u32 {
        self.start + self.length
    }

    /// Check if the note sounds at a position
    pub fn sounds_at(&self, position: u32) -> bool {
        self.start <= position && position < self.end()
    }
}

/// A parsed song
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    notes: Vec<Note, MAX_NOTES>,
}

impl Song {
    /// Parse song text
    ///
    /// Empty entries (e.g. a trailing `;`) are skipped.
    pub fn parse(text: &str) -> Result<Self, SongError> {
        let mut notes = Vec::new();

        for entry in text.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let note = parse_note(entry)?;
            notes.push(note).map_err(|_| SongError::TooManyNotes)?;
        }

        Ok(Self { notes })
    }

    /// Notes in the order they were written
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Position at which the last note ends (hundredths of a beat)
    pub fn end(&self) -> u32 {
        self.notes.iter().map(Note::end).max().unwrap_or(0)
    }

    /// Frequency to play at a position
    ///
    /// When notes overlap, the one written last wins.
    pub fn frequency_at(&self, position: u32) -> Option<u32> {
        self.notes
            .iter()
            .rev()
            .find(|n| n.sounds_at(position))
            .map(|n| n.pitch.frequency_hz())
    }
}

/// Parse "start pitch length instrument"
fn parse_note(entry: &str) -> Result<Note, SongError> {
    let mut fields = entry.split_whitespace();
    let (Some(start), Some(pitch), Some(length), Some(instrument), None) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Err(SongError::Format);
    };

    let length = parse_beats(length)?;
    if length == 0 {
        return Err(SongError::ZeroLength);
    }
    let start = parse_beats(start)?;
    // The end position must be representable
    start.checked_add(length).ok_or(SongError::Number)?;

    Ok(Note {
        start,
        length,
        pitch: Pitch::parse(pitch).ok_or(SongError::Pitch)?,
        instrument: instrument.parse().map_err(|_| SongError::Number)?,
    })
}

/// Parse a beat count with up to two decimals into hundredths
fn parse_beats(text: &str) -> Result<u32, SongError> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty() || fraction.len() > 2 {
        return Err(SongError::Number);
    }
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(SongError::Number);
    }

    let whole: u32 = whole.parse().map_err(|_| SongError::Number)?;
    let mut hundredths = 0;
    for (i, c) in fraction.chars().enumerate() {
        let digit = c.to_digit(10).ok_or(SongError::Number)?;
        hundredths += digit * if i == 0 { 10 } else { 1 };
    }

    whole
        .checked_mul(BEAT)
        .and_then(|w| w.checked_add(hundredths))
        .ok_or(SongError::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clepsydra_core::config::DEFAULT_SONG;

    #[test]
    fn test_parse_default_song() {
        let song = Song::parse(DEFAULT_SONG).unwrap();
        assert_eq!(song.notes().len(), 8);
        assert_eq!(song.end(), 9 * BEAT);

        let first = song.notes()[0];
        assert_eq!(first.start, 0);
        assert_eq!(first.length, BEAT);
        assert_eq!(first.instrument, 34);
        assert_eq!(first.pitch.frequency_hz(), 699);
    }

    #[test]
    fn test_overlap_last_note_wins() {
        let song = Song::parse(DEFAULT_SONG).unwrap();
        // C6 and E6 both start on beat 2
        assert_eq!(song.frequency_at(2 * BEAT), Some(1319));
        // Beat 5 is a gap
        assert_eq!(song.frequency_at(5 * BEAT), None);
        assert_eq!(song.frequency_at(9 * BEAT), None);
    }

    #[test]
    fn test_parse_beats() {
        assert_eq!(parse_beats("0"), Ok(0));
        assert_eq!(parse_beats("3"), Ok(300));
        assert_eq!(parse_beats("1.5"), Ok(150));
        assert_eq!(parse_beats("0.25"), Ok(25));
        assert_eq!(parse_beats("2."), Ok(200));
        assert_eq!(parse_beats(".5"), Err(SongError::Number));
        assert_eq!(parse_beats("0.125"), Err(SongError::Number));
        assert_eq!(parse_beats("1.x"), Err(SongError::Number));
        assert_eq!(parse_beats("-1"), Err(SongError::Number));
    }

    #[test]
    fn test_errors() {
        assert_eq!(Song::parse("0 C4 1"), Err(SongError::Format));
        assert_eq!(Song::parse("0 C4 1 0 7"), Err(SongError::Format));
        assert_eq!(Song::parse("0 R 1 0"), Err(SongError::Pitch));
        assert_eq!(Song::parse("0 C4 0 0"), Err(SongError::ZeroLength));
        assert_eq!(Song::parse("0 C4 1 300"), Err(SongError::Number));
    }

    #[test]
    fn test_note_end_out_of_range() {
        // Start fits in hundredths of a beat, start + length does not
        assert_eq!(Song::parse("42949672 C4 1 0"), Err(SongError::Number));

        let song = Song::parse("42949671 C4 1 0").unwrap();
        assert_eq!(song.end(), 4_294_967_200);
    }

    #[test]
    fn test_too_many_notes() {
        let mut text = heapless::String::<512>::new();
        for i in 0..=MAX_NOTES {
            core::fmt::Write::write_fmt(&mut text, format_args!("{i} C4 1 0;")).unwrap();
        }
        assert_eq!(Song::parse(&text), Err(SongError::TooManyNotes));
    }

    #[test]
    fn test_empty_song() {
        let song = Song::parse(" ; ").unwrap();
        assert!(song.notes().is_empty());
        assert_eq!(song.end(), 0);
    }
}
