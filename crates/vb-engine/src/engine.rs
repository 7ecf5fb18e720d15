//! The synth engine context.
//!
//! One `Engine` owns every piece of mutable state: both envelopes, the
//! global filter parameters, the held note, drum timers, the transport gate
//! and the board itself. The timer interrupt is its only driver.

use core::sync::atomic::{AtomicBool, Ordering};

use log::info;
use vb_ir::params::{level_to_code, MAX_MIXER};
use vb_ir::{ConfigError, LogicalOutput};

use crate::board::{Board, Indicator, Switch};
use crate::config::BoardConfig;
use crate::demo::DemoSequencer;
use crate::drums::DrumTriggers;
use crate::envelope::{inverted_code, VcaEnvelope, VcfEnvelope};
use crate::inbox::MidiInbox;
use crate::latch::OutputLatch;
use crate::transport::{TransportFaults, TransportGate};

/// Code VCO-B is parked on at power-on.
const VCO_3340_PARK_CODE: i32 = 2000;
/// Power-on pulse width of VCO-B, as a fraction of the DAC span.
const VCO_3340_PWM_DUTY: f32 = 0.25;

/// Baseline the VCF envelope ramps away from and back to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalSynthParams {
    pub vcf_cutoff: f32,
    /// Fraction of the DAC span driven on the resonance input, at most
    /// `MAX_MIXER`.
    pub vcf_resonance: f32,
}

/// Last received note. Monophonic: a new note-on overwrites it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiNoteState {
    pub note: u8,
    pub velocity: u8,
}

impl Default for MidiNoteState {
    fn default() -> Self {
        Self { note: 60, velocity: 100 }
    }
}

/// Octave and detune of one oscillator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VcoParams {
    /// Whole octaves added before the table lookup.
    pub octave: u8,
    /// DAC codes added after the table lookup.
    pub detune: i8,
}

/// The two pitch-controlled oscillators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Oscillator {
    /// LM13700 based VCO, refreshed on phase 0.
    Vco13700,
    /// 3340 VCO, refreshed on phase 1.
    Vco3340,
}

impl Oscillator {
    pub const fn output(self) -> LogicalOutput {
        match self {
            Oscillator::Vco13700 => LogicalOutput::Vco13700Freq,
            Oscillator::Vco3340 => LogicalOutput::Vco3340Freq,
        }
    }
}

pub struct Engine<B: Board> {
    pub(crate) board: B,
    pub(crate) envelope_period_ms: f32,
    pub(crate) subdivision: u16,
    pub(crate) drum_channel: u8,
    /// Scheduler phase of the next tick, in `0..subdivision`.
    pub(crate) phase: u16,
    pub(crate) vca: VcaEnvelope,
    pub(crate) vcf: VcfEnvelope,
    pub(crate) globals: GlobalSynthParams,
    pub(crate) note: MidiNoteState,
    pub(crate) vco_13700: VcoParams,
    pub(crate) vco_3340: VcoParams,
    pub(crate) drums: DrumTriggers,
    pub(crate) transport: TransportGate,
    pub(crate) latch: OutputLatch,
    pub(crate) inbox: MidiInbox,
    pub(crate) demo: DemoSequencer,
    /// Demo LED state last written to the board.
    pub(crate) demo_led: bool,
}

impl<B: Board> Engine<B> {
    /// Build the engine and put the board in its power-on state.
    ///
    /// The VCA is muted and the filter closed through latched writes that
    /// the first slow cycle flushes; switches and trigger lines are set
    /// immediately.
    pub fn new(board: B, config: BoardConfig) -> Result<Self, ConfigError> {
        let demo = DemoSequencer::new(config.demo_notes.clone(), config.demo_enabled);
        Self::build(board, config, demo)
    }

    /// Like [`Engine::new`], with demo mode read from `flag`.
    ///
    /// The tick handler holds the engine mutably, so a button interrupt
    /// cannot call [`Engine::toggle_demo`]. It flips `flag` instead:
    ///
    /// ```ignore
    /// static DEMO: AtomicBool = AtomicBool::new(false);
    /// let engine = Engine::with_demo_flag(board, config, &DEMO)?;
    /// // button interrupt
    /// DEMO.fetch_xor(true, Ordering::Relaxed);
    /// ```
    ///
    /// The flag is set to `config.demo_enabled` here.
    pub fn with_demo_flag(board: B, config: BoardConfig, flag: &'static AtomicBool) -> Result<Self, ConfigError> {
        flag.store(config.demo_enabled, Ordering::Relaxed);
        let demo = DemoSequencer::with_flag(config.demo_notes.clone(), flag);
        Self::build(board, config, demo)
    }

    fn build(board: B, config: BoardConfig, demo: DemoSequencer) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = Self {
            board,
            envelope_period_ms: config.envelope_period_ms(),
            subdivision: config.subdivision,
            drum_channel: config.drum_channel,
            phase: 0,
            vca: VcaEnvelope::new(config.vca, config.vca_velocity_sensitivity),
            vcf: VcfEnvelope::new(
                config.vcf,
                config.vcf_velocity_sensitivity,
                config.keyboard_tracking,
                config.envelope_amount,
                config.cutoff,
            ),
            globals: GlobalSynthParams {
                vcf_cutoff: config.cutoff,
                vcf_resonance: config.resonance * MAX_MIXER,
            },
            note: MidiNoteState::default(),
            vco_13700: VcoParams::default(),
            vco_3340: VcoParams::default(),
            drums: DrumTriggers::new(config.drum_pulse_ticks),
            transport: TransportGate::new(),
            latch: OutputLatch::new(),
            inbox: MidiInbox::new(),
            demo,
            demo_led: config.demo_enabled,
        };
        engine.power_on();

        info!(
            "Engine ready: {} us tick, {} phases, {} ms envelope period",
            config.tick_period_us, config.subdivision, engine.envelope_period_ms
        );
        Ok(engine)
    }

    fn power_on(&mut self) {
        self.latch.latch(LogicalOutput::VCA, inverted_code(0.0));
        self.latch.latch(LogicalOutput::VcfCutoff, inverted_code(0.0));
        self.latch.latch(LogicalOutput::Vco3340Freq, VCO_3340_PARK_CODE);
        self.latch.latch(LogicalOutput::Vco3340PwmDuty, (4095.0 * 2.0 * VCO_3340_PWM_DUTY) as i32);
        self.latch.latch(LogicalOutput::VcfResonance, level_to_code(self.globals.vcf_resonance));

        self.select_waveform_3340(0);
        self.board.set_switch(Switch::Vco3340Sync, false);
        self.select_filter_order(0);

        self.drums.reset(&mut self.board);
        self.board.set_indicator(Indicator::Gate, false);
        self.board.set_indicator(Indicator::Demo, self.demo_led);
    }

    /// Transfer-complete notification from the serial driver.
    pub fn on_transfer_complete(&mut self, bank: vb_ir::Bank) {
        self.transport.complete(&mut self.board, bank);
    }

    /// Flip demo mode. Interrupt handlers use the flag passed to
    /// [`Engine::with_demo_flag`] instead.
    pub fn toggle_demo(&self) -> bool {
        self.demo.toggle()
    }

    pub fn set_demo(&self, on: bool) {
        self.demo.set_enabled(on);
    }

    pub fn demo_enabled(&self) -> bool {
        self.demo.is_enabled()
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn vca(&self) -> &VcaEnvelope {
        &self.vca
    }

    pub fn vcf(&self) -> &VcfEnvelope {
        &self.vcf
    }

    pub fn globals(&self) -> GlobalSynthParams {
        self.globals
    }

    pub fn note(&self) -> MidiNoteState {
        self.note
    }

    pub fn vco(&self, osc: Oscillator) -> VcoParams {
        match osc {
            Oscillator::Vco13700 => self.vco_13700,
            Oscillator::Vco3340 => self.vco_3340,
        }
    }

    pub fn drums(&self) -> &DrumTriggers {
        &self.drums
    }

    pub fn transport(&self) -> &TransportGate {
        &self.transport
    }

    pub fn faults(&self) -> TransportFaults {
        self.transport.faults()
    }

    pub fn latch(&self) -> &OutputLatch {
        &self.latch
    }

    pub fn inbox(&self) -> &MidiInbox {
        &self.inbox
    }

    /// Phase the next tick will run.
    pub fn phase(&self) -> u16 {
        self.phase
    }

    pub fn subdivision(&self) -> u16 {
        self.subdivision
    }

    pub fn envelope_period_ms(&self) -> f32 {
        self.envelope_period_ms
    }

    /// Release the board, e.g. to hand it to another driver.
    pub fn into_board(self) -> B {
        self.board
    }
}
