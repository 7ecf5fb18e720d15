//! Control-change parameter updates.
//!
//! Envelope parameters only affect the next trigger; running ramps finish
//! with the deltas they were started with. Parameters that move a DAC are
//! latched and written by the scheduler on an idle phase.

use log::{debug, warn};
use vb_ir::params::{
    cc_to_code, cc_to_level, cc_to_time_ms, level_to_code, MAX_MIXER, MAX_SUSTAIN, MAX_VELOCITY_SENSITIVITY,
};
use vb_ir::{CcParam, LogicalOutput};

use crate::board::{Board, Switch};
use crate::engine::Engine;
use crate::envelope::inverted_code;
use crate::ramp::Stage;

impl<B: Board> Engine<B> {
    /// Apply a 0-127 controller value to `param`.
    pub fn set_param(&mut self, param: CcParam, value: u8) {
        let value = value.min(127);
        debug!("CC {:?} = {}", param, value);
        let result = match param {
            CcParam::VcaAttack => self.vca.config_mut().set_attack_ms(cc_to_time_ms(value)),
            CcParam::VcaDecay => self.vca.config_mut().set_decay_ms(cc_to_time_ms(value)),
            CcParam::VcaSustain => self.vca.config_mut().set_sustain(cc_to_level(value, MAX_SUSTAIN)),
            CcParam::VcaRelease => self.vca.config_mut().set_release_ms(cc_to_time_ms(value)),
            CcParam::VcfAttack => self.vcf.config_mut().set_attack_ms(cc_to_time_ms(value)),
            CcParam::VcfDecay => self.vcf.config_mut().set_decay_ms(cc_to_time_ms(value)),
            CcParam::VcfSustain => self.vcf.config_mut().set_sustain(cc_to_level(value, MAX_SUSTAIN)),
            CcParam::VcfRelease => self.vcf.config_mut().set_release_ms(cc_to_time_ms(value)),
            CcParam::VcaVelocitySensitivity => {
                self.vca.set_velocity_sensitivity(cc_to_level(value, MAX_VELOCITY_SENSITIVITY));
                Ok(())
            }
            CcParam::VcfVelocitySensitivity => {
                self.vcf.set_velocity_sensitivity(cc_to_level(value, MAX_VELOCITY_SENSITIVITY));
                Ok(())
            }
            CcParam::VcfKbdTracking => {
                self.vcf.set_keyboard_tracking(cc_to_level(value, 1.0));
                Ok(())
            }
            CcParam::VcfEnvAmount => {
                self.vcf.set_envelope_amount(cc_to_level(value, 1.0));
                Ok(())
            }
            CcParam::VcfCutoff => {
                self.set_cutoff(cc_to_level(value, 1.0));
                Ok(())
            }
            CcParam::VcfResonance => {
                self.globals.vcf_resonance = cc_to_level(value, MAX_MIXER);
                self.latch.latch(LogicalOutput::VcfResonance, level_to_code(self.globals.vcf_resonance));
                Ok(())
            }
            CcParam::Pwm3340 => {
                self.latch.latch(LogicalOutput::Vco3340PwmDuty, cc_to_code(value, 1.0));
                Ok(())
            }
            CcParam::Level3340 => {
                self.latch.latch(LogicalOutput::VCO_3340_LEVEL, cc_to_code(value, MAX_MIXER));
                Ok(())
            }
            CcParam::Wave13700 => {
                self.latch.latch(LogicalOutput::VCO_13700_TRI_LEVEL, cc_to_code(value, MAX_MIXER));
                self.latch.latch(LogicalOutput::VCO_13700_SQUARE_LEVEL, cc_to_code(127 - value, MAX_MIXER));
                Ok(())
            }
            CcParam::Sync3340 => {
                self.board.set_switch(Switch::Vco3340Sync, value == 127);
                Ok(())
            }
            CcParam::VcfOrder => {
                self.select_filter_order(value);
                Ok(())
            }
            CcParam::Wave3340 => {
                self.select_waveform_3340(value);
                Ok(())
            }
            CcParam::Octave13700 => {
                self.vco_13700.octave = value;
                Ok(())
            }
            CcParam::Octave3340 => {
                self.vco_3340.octave = value;
                Ok(())
            }
            CcParam::Detune13700 => {
                self.vco_13700.detune = detune(value);
                Ok(())
            }
            CcParam::Detune3340 => {
                self.vco_3340.detune = detune(value);
                Ok(())
            }
        };
        if let Err(err) = result {
            warn!("CC {:?} = {} rejected: {}", param, value, err);
        }
    }

    /// Move the baseline cutoff.
    ///
    /// A releasing filter envelope ramps to the new baseline instead of the
    /// old one. An idle one is not writing, so the baseline is latched out
    /// directly.
    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.globals.vcf_cutoff = cutoff.clamp(0.0, 1.0);
        self.vcf.set_baseline(self.globals.vcf_cutoff);
        if self.vcf.stage() == Stage::Idle {
            self.latch.latch(LogicalOutput::VcfCutoff, inverted_code(self.globals.vcf_cutoff));
        }
    }

    /// 0 pulse, 1 triangle, 2 sawtooth; anything else leaves the switch alone.
    pub(crate) fn select_waveform_3340(&mut self, value: u8) {
        let selected = match value {
            0 => Switch::Vco3340Pulse,
            1 => Switch::Vco3340Triangle,
            2 => Switch::Vco3340Saw,
            _ => return,
        };
        for switch in [Switch::Vco3340Pulse, Switch::Vco3340Triangle, Switch::Vco3340Saw] {
            if switch != selected {
                self.board.set_switch(switch, false);
            }
        }
        self.board.set_switch(selected, true);
    }

    /// 0 second order, 1 fourth order. Break before make.
    pub(crate) fn select_filter_order(&mut self, value: u8) {
        let (off, on) = match value {
            0 => (Switch::VcfFourthOrder, Switch::VcfSecondOrder),
            1 => (Switch::VcfSecondOrder, Switch::VcfFourthOrder),
            _ => return,
        };
        self.board.set_switch(off, false);
        self.board.set_switch(on, true);
    }
}

fn detune(value: u8) -> i8 {
    (value as i16 - 64) as i8
}
