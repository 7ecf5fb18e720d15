//! Self-playing demo sequence, toggled from the user button.

use core::sync::atomic::{AtomicBool, Ordering};

use arrayvec::ArrayVec;

use crate::config::MAX_DEMO_NOTES;

/// Slow cycles between the demo note-on and its note-off.
pub const DEMO_NOTE_LENGTH: u16 = 200;
/// Slow cycles after which the demo loops.
pub const DEMO_CYCLE: u16 = 400;
pub const DEMO_VELOCITY: u8 = 50;

/// What the demo wants played on this slow cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoAction {
    /// Play `note` together with a bass drum hit.
    NoteOn(u8),
    NoteOff(u8),
}

/// Storage of the enable flag.
#[derive(Debug)]
enum Flag {
    Owned(AtomicBool),
    /// A static the button interrupt writes directly.
    Shared(&'static AtomicBool),
}

impl Flag {
    fn get(&self) -> &AtomicBool {
        match self {
            Flag::Owned(flag) => flag,
            Flag::Shared(flag) => flag,
        }
    }
}

#[derive(Debug)]
pub struct DemoSequencer {
    enabled: Flag,
    counter: u16,
    next_note: usize,
    last_note: u8,
    notes: ArrayVec<u8, MAX_DEMO_NOTES>,
}

impl DemoSequencer {
    pub fn new(notes: ArrayVec<u8, MAX_DEMO_NOTES>, enabled: bool) -> Self {
        Self::with_flag_storage(notes, Flag::Owned(AtomicBool::new(enabled)))
    }

    /// Sequencer driven by an external flag, e.g. a `static` toggled from
    /// the button interrupt with `fetch_xor(true, Relaxed)`.
    pub fn with_flag(notes: ArrayVec<u8, MAX_DEMO_NOTES>, flag: &'static AtomicBool) -> Self {
        Self::with_flag_storage(notes, Flag::Shared(flag))
    }

    fn with_flag_storage(notes: ArrayVec<u8, MAX_DEMO_NOTES>, enabled: Flag) -> Self {
        let last_note = notes.first().copied().unwrap_or(0);
        Self { enabled, counter: 0, next_note: 0, last_note, notes }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get().load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, on: bool) {
        self.enabled.get().store(on, Ordering::Relaxed);
    }

    /// Flip the demo flag; returns the new state.
    pub fn toggle(&self) -> bool {
        !self.enabled.get().fetch_xor(true, Ordering::Relaxed)
    }

    /// Advance by one slow cycle.
    pub fn step(&mut self) -> Option<DemoAction> {
        if !self.is_enabled() || self.notes.is_empty() {
            return None;
        }
        let action = match self.counter {
            0 => {
                let note = self.notes[self.next_note];
                self.next_note = (self.next_note + 1) % self.notes.len();
                self.last_note = note;
                Some(DemoAction::NoteOn(note))
            }
            DEMO_NOTE_LENGTH => Some(DemoAction::NoteOff(self.last_note)),
            _ => None,
        };
        self.counter = if self.counter >= DEMO_CYCLE { 0 } else { self.counter + 1 };
        action
    }
}
