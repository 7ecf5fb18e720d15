//! Drum trigger pulse timers.

use vb_ir::{DrumVoice, DRUM_VOICES};

use crate::board::Board;

/// One countdown per drum voice. A non-zero counter means the trigger line
/// is held at its active level.
#[derive(Clone, Debug)]
pub struct DrumTriggers {
    counters: [u16; DRUM_VOICES.len()],
    pulse_ticks: u16,
}

impl DrumTriggers {
    pub fn new(pulse_ticks: u16) -> Self {
        Self { counters: [0; DRUM_VOICES.len()], pulse_ticks: pulse_ticks.max(1) }
    }

    pub fn pulse_ticks(&self) -> u16 {
        self.pulse_ticks
    }

    pub fn counter(&self, voice: DrumVoice) -> u16 {
        self.counters[voice.index()]
    }

    pub fn is_firing(&self, voice: DrumVoice) -> bool {
        self.counter(voice) > 0
    }

    /// Drive every trigger line to its idle level.
    pub fn reset<B: Board>(&mut self, board: &mut B) {
        self.counters = [0; DRUM_VOICES.len()];
        for voice in DRUM_VOICES {
            board.set_trigger_line(voice, voice.idle_level());
        }
    }

    /// Fire `voice`, restarting its pulse if it is already firing.
    pub fn arm<B: Board>(&mut self, board: &mut B, voice: DrumVoice) {
        board.set_trigger_line(voice, voice.active_level());
        self.counters[voice.index()] = self.pulse_ticks;
    }

    /// Count every firing voice down by one tick, ending expired pulses.
    pub fn advance<B: Board>(&mut self, board: &mut B) {
        for voice in DRUM_VOICES {
            let counter = &mut self.counters[voice.index()];
            if *counter > 0 {
                *counter -= 1;
                if *counter == 0 {
                    board.set_trigger_line(voice, voice.idle_level());
                }
            }
        }
    }
}
