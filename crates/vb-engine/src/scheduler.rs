//! The tick handler.
//!
//! Every tick advances the drum timers and runs exactly one slow update
//! picked by the phase counter:
//!
//! | phase   | update                               |
//! |---------|--------------------------------------|
//! | 0       | VCO-A pitch (after the demo step)    |
//! | 1       | VCO-B pitch                          |
//! | 2       | VCA envelope                         |
//! | 3       | VCF envelope                         |
//! | 4..K    | one latched static output, if any    |
//!
//! Only one DAC write is issued per tick, so a transfer started on one
//! phase has a whole tick period to complete before the next.

use log::debug;
use vb_ir::{resolve_cv, DrumVoice, LogicalOutput, VCO_13700_CV, VCO_3340_CV};

use crate::board::{Board, Indicator};
use crate::demo::{DemoAction, DEMO_VELOCITY};
use crate::engine::{Engine, MidiNoteState, Oscillator};

/// The slow update a tick wrote to the DAC bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlowUpdate {
    PitchA,
    PitchB,
    Vca,
    Vcf,
    Latched(LogicalOutput),
}

impl<B: Board> Engine<B> {
    /// Run one timer period.
    ///
    /// Returns the slow update written on this tick, or `None` when the
    /// phase had nothing to emit or the transport refused the write.
    pub fn tick(&mut self) -> Option<SlowUpdate> {
        #[cfg(feature = "alloc_check")]
        let update = assert_no_alloc::assert_no_alloc(|| self.run_tick());
        #[cfg(not(feature = "alloc_check"))]
        let update = self.run_tick();
        update
    }

    fn run_tick(&mut self) -> Option<SlowUpdate> {
        self.drain_inbox();
        self.drums.advance(&mut self.board);

        let phase = self.phase;
        self.phase = (phase + 1) % self.subdivision;

        match phase {
            0 => {
                self.step_demo();
                self.write_pitch(Oscillator::Vco13700)
            }
            1 => self.write_pitch(Oscillator::Vco3340),
            2 => {
                let code = self.vca.tick(self.envelope_period_ms)?;
                self.write(LogicalOutput::VCA, code).then_some(SlowUpdate::Vca)
            }
            3 => {
                let code = self.vcf.tick(self.envelope_period_ms)?;
                self.write(LogicalOutput::VcfCutoff, code).then_some(SlowUpdate::Vcf)
            }
            _ => self.flush_latched(),
        }
    }

    /// DAC code for the held note on `osc`, after octave and detune.
    pub fn pitch_code(&self, osc: Oscillator) -> i32 {
        let (params, table) = match osc {
            Oscillator::Vco13700 => (self.vco_13700, &VCO_13700_CV),
            Oscillator::Vco3340 => (self.vco_3340, &VCO_3340_CV),
        };
        let note = self.note.note as u16 + 12 * params.octave as u16;
        if note > 127 {
            return 0;
        }
        let code = resolve_cv(table, note as u8);
        // Detuning a blank table entry would move the oscillator off its floor.
        if code == 0 {
            0
        } else {
            code as i32 + params.detune as i32
        }
    }

    fn write_pitch(&mut self, osc: Oscillator) -> Option<SlowUpdate> {
        let code = self.pitch_code(osc);
        let update = match osc {
            Oscillator::Vco13700 => SlowUpdate::PitchA,
            Oscillator::Vco3340 => SlowUpdate::PitchB,
        };
        self.write(osc.output(), code).then_some(update)
    }

    fn flush_latched(&mut self) -> Option<SlowUpdate> {
        if self.transport.is_busy() {
            return None;
        }
        let (output, code) = self.latch.take_next()?;
        self.write(output, code as i32).then_some(SlowUpdate::Latched(output))
    }

    fn write(&mut self, output: LogicalOutput, code: i32) -> bool {
        self.transport.write(&mut self.board, output, code).is_ok()
    }

    fn step_demo(&mut self) {
        match self.demo.step() {
            Some(DemoAction::NoteOn(note)) => {
                debug!("Demo note {}", note);
                self.note = MidiNoteState { note, velocity: DEMO_VELOCITY };
                self.note_on();
                self.drums.arm(&mut self.board, DrumVoice::BassDrum);
            }
            Some(DemoAction::NoteOff(_)) => self.note_off(),
            None => {}
        }

        let enabled = self.demo.is_enabled();
        if enabled != self.demo_led {
            self.demo_led = enabled;
            self.board.set_indicator(Indicator::Demo, enabled);
        }
    }
}
