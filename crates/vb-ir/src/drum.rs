//! Drum section voices and their trigger lines.

/// Logic level of a digital output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// One analog drum voice with its own trigger input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrumVoice {
    BassDrum,
    Rimshot,
    Snare,
    LowTom,
    HighTom,
}

pub const DRUM_VOICES: [DrumVoice; 5] = [
    DrumVoice::BassDrum,
    DrumVoice::Rimshot,
    DrumVoice::Snare,
    DrumVoice::LowTom,
    DrumVoice::HighTom,
];

impl DrumVoice {
    /// Voice played by a note on the drum channel (General MIDI numbering).
    pub fn from_note(note: u8) -> Option<Self> {
        match note {
            36 => Some(DrumVoice::BassDrum),
            37 => Some(DrumVoice::Rimshot),
            38 => Some(DrumVoice::Snare),
            45 => Some(DrumVoice::LowTom),
            50 => Some(DrumVoice::HighTom),
            _ => None,
        }
    }

    pub const fn note(self) -> u8 {
        match self {
            DrumVoice::BassDrum => 36,
            DrumVoice::Rimshot => 37,
            DrumVoice::Snare => 38,
            DrumVoice::LowTom => 45,
            DrumVoice::HighTom => 50,
        }
    }

    /// Level that fires the voice. The snare trigger is inverted on the board.
    pub const fn active_level(self) -> Level {
        match self {
            DrumVoice::Snare => Level::High,
            _ => Level::Low,
        }
    }

    pub fn idle_level(self) -> Level {
        !self.active_level()
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}
