//! MIDI message model.
//!
//! Messages arrive already framed as three bytes; this module only
//! classifies them.

use crate::params::CcParam;

/// Status nibble of a note-off message.
pub const NOTE_OFF: u8 = 0x80;
/// Status nibble of a note-on message.
pub const NOTE_ON: u8 = 0x90;
/// Status nibble of a control-change message.
pub const CONTROL_CHANGE: u8 = 0xB0;

/// A complete three-byte channel message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiMessage {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl MidiMessage {
    pub const fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self { status, data1, data2 }
    }

    /// Note-on on `channel`.
    pub const fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(NOTE_ON | (channel & 0x0F), note, velocity)
    }

    /// Note-off on `channel`.
    pub const fn note_off(channel: u8, note: u8) -> Self {
        Self::new(NOTE_OFF | (channel & 0x0F), note, 0)
    }

    /// Control change on `channel`.
    pub const fn control_change(channel: u8, param: u8, value: u8) -> Self {
        Self::new(CONTROL_CHANGE | (channel & 0x0F), param, value)
    }

    /// Channel nibble (0-15).
    pub const fn channel(&self) -> u8 {
        self.status & 0x0F
    }

    /// Status nibble with the channel stripped.
    pub const fn kind(&self) -> u8 {
        self.status & 0xF0
    }

    /// Classify the message.
    ///
    /// Data bytes are masked to seven bits. A note-on with velocity 0 stays
    /// a note-on.
    pub fn event(&self) -> MidiEvent {
        let channel = self.channel();
        let data1 = self.data1 & 0x7F;
        let data2 = self.data2 & 0x7F;
        match self.kind() {
            NOTE_ON => MidiEvent::NoteOn { channel, note: data1, velocity: data2 },
            NOTE_OFF => MidiEvent::NoteOff { channel, note: data1 },
            CONTROL_CHANGE => match CcParam::from_id(data1) {
                Some(param) => MidiEvent::Control { channel, param, value: data2 },
                None => MidiEvent::Ignored,
            },
            _ => MidiEvent::Ignored,
        }
    }
}

/// What a message asks the board to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8 },
    Control { channel: u8, param: CcParam, value: u8 },
    /// Anything the board has no use for (pitch bend, unknown CC, ...).
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_splits_channel_and_status() {
        let msg = MidiMessage::new(0x93, 60, 100);
        assert_eq!(msg.channel(), 3);
        assert_eq!(msg.kind(), NOTE_ON);
        assert_eq!(msg.event(), MidiEvent::NoteOn { channel: 3, note: 60, velocity: 100 });
    }

    #[test]
    fn note_on_with_zero_velocity_is_still_note_on() {
        let msg = MidiMessage::note_on(0, 48, 0);
        assert!(matches!(msg.event(), MidiEvent::NoteOn { velocity: 0, .. }));
    }

    #[test]
    fn note_off_ignores_velocity() {
        let msg = MidiMessage::new(0x80, 50, 64);
        assert_eq!(msg.event(), MidiEvent::NoteOff { channel: 0, note: 50 });
    }

    #[test]
    fn known_control_change_resolves_param() {
        let msg = MidiMessage::control_change(1, CcParam::VcaAttack as u8, 42);
        assert_eq!(
            msg.event(),
            MidiEvent::Control { channel: 1, param: CcParam::VcaAttack, value: 42 }
        );
    }

    #[test]
    fn unknown_control_change_is_ignored() {
        let msg = MidiMessage::control_change(0, 120, 1);
        assert_eq!(msg.event(), MidiEvent::Ignored);
    }

    #[test]
    fn pitch_bend_is_ignored() {
        assert_eq!(MidiMessage::new(0xE0, 0, 64).event(), MidiEvent::Ignored);
    }

    #[test]
    fn data_bytes_are_masked() {
        let msg = MidiMessage::new(0x90, 0xBC, 0xFF);
        assert_eq!(msg.event(), MidiEvent::NoteOn { channel: 0, note: 0x3C, velocity: 0x7F });
    }
}
