//! Core types for the voiceboard control core.
//!
//! Everything in this crate is plain data or a pure function: the MIDI
//! message model, the control-change parameter set, envelope configuration,
//! the logical-output addressing table with its DAC wire format, the note
//! calibration tables and the drum voice map. The real-time engine in
//! `vb-engine` consumes these types.
//!
//! `no_std` compatible; nothing here allocates.

#![cfg_attr(not(feature = "std"), no_std)]

mod calibration;
mod drum;
mod envelope_config;
mod error;
mod midi;
mod output;
pub mod params;

pub use calibration::{resolve_cv, CALIBRATED_NOTES, VCO_13700_CV, VCO_3340_CV};
pub use drum::{DrumVoice, Level, DRUM_VOICES};
pub use envelope_config::{EnvelopeConfig, MAX_TIME_MS};
pub use error::ConfigError;
pub use midi::{MidiEvent, MidiMessage, CONTROL_CHANGE, NOTE_OFF, NOTE_ON};
pub use output::{encode, Bank, DacChannel, Destination, Gain, LogicalOutput, WireWord, DAC_MAX};
pub use params::CcParam;
