//! Note names and equal-temperament frequencies

/// Frequencies of octave 8 (C8..B8) in Hz, A4 = 440 Hz
///
/// Lower octaves halve the frequency per octave, so one table covers the
/// whole range with integer math.
const OCTAVE_8_HZ: [u32; 12] = [
    4186, 4435, 4699, 4978, 5274, 5588, 5920, 6272, 6645, 7040, 7459, 7902,
];

/// Highest supported octave
pub const MAX_OCTAVE: u8 = 8;

/// A pitch as semitone within the octave plus octave number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pitch {
    /// Semitone above C (0-11)
    pub semitone: u8,
    /// Octave (0-8)
    pub octave: u8,
}

impl Pitch {
    /// Parse a note name like `C4`, `F#5` or `A0`
    ///
    /// Returns `None` for rests, flats, lowercase names and octaves above 8.
    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let base = match chars.next()? {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let rest = chars.as_str();
        let (semitone, octave) = match rest.strip_prefix('#') {
            // B# and E# do not exist on the sequencer grid
            Some(_) if base == 4 || base == 11 => return None,
            Some(octave) => (base + 1, octave),
            None => (base, rest),
        };

        if octave.len() != 1 {
            return None;
        }
        let octave: u8 = octave.parse().ok()?;
        if octave > MAX_OCTAVE {
            return None;
        }

        Some(Self { semitone, octave })
    }

    /// Frequency in Hz, rounded to the nearest integer
    pub fn frequency_hz(&self) -> u32 {
        let top = OCTAVE_8_HZ[usize::from(self.semitone)];
        let shift = u32::from(MAX_OCTAVE - self.octave);
        if shift == 0 {
            top
        } else {
            (top + (1 << (shift - 1))) >> shift
        }
    }
}
