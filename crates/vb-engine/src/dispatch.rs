//! MIDI message routing.

use log::debug;
use vb_ir::{DrumVoice, LogicalOutput, MidiEvent, MidiMessage};

use crate::board::{Board, Indicator};
use crate::engine::{Engine, MidiNoteState};

impl<B: Board> Engine<B> {
    /// Route one complete three-byte message.
    pub fn dispatch(&mut self, status: u8, data1: u8, data2: u8) {
        self.handle_message(MidiMessage::new(status, data1, data2));
    }

    pub fn handle_message(&mut self, message: MidiMessage) {
        match message.event() {
            MidiEvent::NoteOn { channel, note, .. } if channel == self.drum_channel => {
                self.play_drum(note);
            }
            MidiEvent::NoteOn { note, velocity, .. } => {
                self.note = MidiNoteState { note, velocity };
                self.note_on();
            }
            // Any note-off releases the held note, matching or not.
            MidiEvent::NoteOff { .. } => self.note_off(),
            MidiEvent::Control { param, value, .. } => self.set_param(param, value),
            MidiEvent::Ignored => {}
        }
    }

    /// Queue a message for the next tick. Hands it back if the inbox is full.
    pub fn enqueue(&mut self, message: MidiMessage) -> Result<(), MidiMessage> {
        self.inbox.push(message)
    }

    pub(crate) fn drain_inbox(&mut self) {
        while let Some(message) = self.inbox.pop() {
            self.handle_message(message);
        }
    }

    /// Retrigger both envelopes for the held note.
    ///
    /// The envelopes own the VCA and cutoff outputs from here on, so any
    /// static value still latched for them is dropped.
    pub(crate) fn note_on(&mut self) {
        let MidiNoteState { note, velocity } = self.note;
        debug!("Note on {} vel {}", note, velocity);
        self.latch.discard(LogicalOutput::VCA);
        self.latch.discard(LogicalOutput::VcfCutoff);
        self.board.set_indicator(Indicator::Gate, true);
        self.vca.note_on(velocity, self.envelope_period_ms);
        self.vcf.note_on(note, velocity, self.globals.vcf_cutoff, self.envelope_period_ms);
    }

    /// Release both envelopes from wherever they are.
    pub(crate) fn note_off(&mut self) {
        debug!("Note off");
        self.board.set_indicator(Indicator::Gate, false);
        self.vca.note_off(self.envelope_period_ms);
        self.vcf.note_off(self.globals.vcf_cutoff, self.envelope_period_ms);
    }

    pub(crate) fn play_drum(&mut self, note: u8) {
        match DrumVoice::from_note(note) {
            Some(voice) => self.drums.arm(&mut self.board, voice),
            None => debug!("No drum voice on note {}", note),
        }
    }
}
