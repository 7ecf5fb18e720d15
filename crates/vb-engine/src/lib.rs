//! Real-time engine for the voiceboard control core.
//!
//! Turns MIDI into control voltages: note and controller messages
//! reprogram the VCA and VCF envelopes, and the fixed-period tick walks a
//! phase sequence that pushes pitch, envelope and static outputs through a
//! single shared DAC bus. All hardware access goes through [`Board`].

#![cfg_attr(not(feature = "std"), no_std)]

mod board;
mod config;
mod control;
mod demo;
mod dispatch;
mod drums;
mod engine;
mod envelope;
mod inbox;
mod latch;
mod ramp;
mod scheduler;
mod transport;

pub use board::{Board, Indicator, Switch};
pub use config::{BoardConfig, MAX_DEMO_NOTES, MIN_SUBDIVISION};
pub use demo::{DemoAction, DemoSequencer, DEMO_CYCLE, DEMO_NOTE_LENGTH, DEMO_VELOCITY};
pub use drums::DrumTriggers;
pub use engine::{Engine, GlobalSynthParams, MidiNoteState, Oscillator, VcoParams};
pub use envelope::{inverted_code, velocity_factor, VcaEnvelope, VcfEnvelope};
pub use inbox::{MidiInbox, INBOX_CAPACITY};
pub use latch::OutputLatch;
pub use ramp::{Ramp, Stage};
pub use scheduler::SlowUpdate;
pub use transport::{TransportError, TransportFaults, TransportGate};
