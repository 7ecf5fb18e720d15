//! Configuration error type.

use core::fmt;

/// A configuration defect, rejected at construction time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A time parameter was zero, negative, non-finite or above the maximum.
    InvalidTime { name: &'static str, value_ms: f32 },
    /// A level parameter fell outside `[0, 1]`.
    InvalidLevel { name: &'static str, value: f32 },
    /// The timer period must be non-zero.
    ZeroTickPeriod,
    /// The subdivision factor cannot hold the four slow phases.
    SubdivisionTooSmall(u16),
    /// Drum trigger pulses must last at least one tick.
    ZeroPulseLength,
    /// MIDI channels are a 4-bit nibble.
    InvalidChannel(u8),
    /// Demo mode needs at least one note to play.
    EmptyDemoSequence,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTime { name, value_ms } => {
                write!(f, "Invalid {} time: {} ms", name, value_ms)
            }
            ConfigError::InvalidLevel { name, value } => {
                write!(f, "Invalid {} level: {}", name, value)
            }
            ConfigError::ZeroTickPeriod => write!(f, "Tick period must be non-zero"),
            ConfigError::SubdivisionTooSmall(k) => {
                write!(f, "Subdivision {} leaves no room for the four slow phases", k)
            }
            ConfigError::ZeroPulseLength => write!(f, "Drum pulse length must be at least one tick"),
            ConfigError::InvalidChannel(ch) => write!(f, "MIDI channel {} out of range", ch),
            ConfigError::EmptyDemoSequence => write!(f, "Demo sequence has no notes"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
