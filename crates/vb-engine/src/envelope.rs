//! VCA and VCF envelopes: trigger-time math around the shared `Ramp`.

use vb_ir::params::{steps_for, MAX_KBD_TRACKING};
use vb_ir::{EnvelopeConfig, DAC_MAX};

use crate::ramp::{Ramp, Stage};

/// Tolerance when converting a level distance into whole steps.
const STEP_EPSILON: f32 = 1e-4;

/// Peak scaling for a note velocity: `(1 - s) + (velocity / 127) * s`.
pub fn velocity_factor(sensitivity: f32, velocity: u8) -> f32 {
    (1.0 - sensitivity) + (velocity.min(127) as f32 / 127.0) * sensitivity
}

/// DAC code for a unit level. Both the VCA and VCF control paths go
/// through an inverting amplifier, so full level is code 0.
pub fn inverted_code(level: f32) -> i32 {
    let level = level.clamp(0.0, 1.0);
    ((1.0 - level) * DAC_MAX as f32) as i32
}

/// Amplitude envelope. Rests at 0.
#[derive(Clone, Debug)]
pub struct VcaEnvelope {
    ramp: Ramp,
    config: EnvelopeConfig,
    velocity_sensitivity: f32,
}

impl VcaEnvelope {
    pub fn new(config: EnvelopeConfig, velocity_sensitivity: f32) -> Self {
        Self { ramp: Ramp::new(0.0), config, velocity_sensitivity }
    }

    pub fn ramp(&self) -> &Ramp {
        &self.ramp
    }

    pub fn stage(&self) -> Stage {
        self.ramp.stage()
    }

    pub fn level(&self) -> f32 {
        self.ramp.level()
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EnvelopeConfig {
        &mut self.config
    }

    pub fn velocity_sensitivity(&self) -> f32 {
        self.velocity_sensitivity
    }

    pub fn set_velocity_sensitivity(&mut self, sensitivity: f32) {
        self.velocity_sensitivity = sensitivity.clamp(0.0, 1.0);
    }

    /// Restart the attack from the current amplitude.
    ///
    /// The nominal slope covers 0 to peak in the attack time; the leg ends
    /// on the step that crosses the peak. When the amplitude is already at
    /// or above the new peak the attack is empty and the decay starts from
    /// where the amplitude is.
    pub fn note_on(&mut self, velocity: u8, period_ms: f32) {
        let peak = velocity_factor(self.velocity_sensitivity, velocity);
        let slope = period_ms * peak / self.config.attack_ms();
        let distance = peak - self.ramp.level();
        let steps = if distance > 0.0 && slope > 0.0 {
            (libm::ceilf(distance / slope - STEP_EPSILON) as u32).max(1)
        } else {
            0
        };
        self.ramp.attack(peak, steps);
    }

    pub fn note_off(&mut self, period_ms: f32) {
        self.ramp.release(0.0, steps_for(self.config.release_ms(), period_ms));
    }

    /// Advance one envelope period; returns the DAC code to write, if any.
    pub fn tick(&mut self, period_ms: f32) -> Option<i32> {
        self.ramp.advance(&self.config, 0.0, period_ms).map(inverted_code)
    }
}

/// Filter cutoff envelope. Rests at the baseline cutoff and is shifted by
/// keyboard tracking for the whole note.
#[derive(Clone, Debug)]
pub struct VcfEnvelope {
    ramp: Ramp,
    config: EnvelopeConfig,
    velocity_sensitivity: f32,
    keyboard_tracking: f32,
    envelope_amount: f32,
    /// Baseline cutoff captured at the last trigger.
    rest: f32,
    /// Constant cutoff offset for the current note.
    keyboard_shift: f32,
}

impl VcfEnvelope {
    pub fn new(
        config: EnvelopeConfig,
        velocity_sensitivity: f32,
        keyboard_tracking: f32,
        envelope_amount: f32,
        baseline: f32,
    ) -> Self {
        Self {
            ramp: Ramp::new(baseline),
            config,
            velocity_sensitivity,
            keyboard_tracking,
            envelope_amount,
            rest: baseline,
            keyboard_shift: 0.0,
        }
    }

    pub fn ramp(&self) -> &Ramp {
        &self.ramp
    }

    pub fn stage(&self) -> Stage {
        self.ramp.stage()
    }

    pub fn level(&self) -> f32 {
        self.ramp.level()
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EnvelopeConfig {
        &mut self.config
    }

    pub fn keyboard_shift(&self) -> f32 {
        self.keyboard_shift
    }

    pub fn velocity_sensitivity(&self) -> f32 {
        self.velocity_sensitivity
    }

    pub fn set_velocity_sensitivity(&mut self, sensitivity: f32) {
        self.velocity_sensitivity = sensitivity.clamp(0.0, 1.0);
    }

    pub fn keyboard_tracking(&self) -> f32 {
        self.keyboard_tracking
    }

    pub fn set_keyboard_tracking(&mut self, amount: f32) {
        self.keyboard_tracking = amount.clamp(0.0, 1.0);
    }

    pub fn envelope_amount(&self) -> f32 {
        self.envelope_amount
    }

    pub fn set_envelope_amount(&mut self, amount: f32) {
        self.envelope_amount = amount.clamp(0.0, 1.0);
    }

    /// Start the attack toward `envelope_amount * velocity_factor` over the
    /// attack step budget. An idle envelope starts from `baseline`.
    pub fn note_on(&mut self, note: u8, velocity: u8, baseline: f32, period_ms: f32) {
        self.rest = baseline;
        self.ramp.rest_at(baseline);
        let peak = self.envelope_amount * velocity_factor(self.velocity_sensitivity, velocity);
        self.keyboard_shift = (note.min(127) as f32 - 64.0) / 64.0 * self.keyboard_tracking * MAX_KBD_TRACKING;
        self.ramp.attack(peak, steps_for(self.config.attack_ms(), period_ms));
    }

    /// Move the baseline the envelope rests on.
    ///
    /// A running release is sent to the new baseline over its remaining
    /// steps; attack and decay keep the baseline they started with.
    pub fn set_baseline(&mut self, baseline: f32) {
        match self.ramp.stage() {
            Stage::Idle => {
                self.rest = baseline;
                self.ramp.rest_at(baseline);
            }
            Stage::Release => {
                self.rest = baseline;
                self.ramp.retarget_release(baseline);
            }
            Stage::Attack | Stage::Decay => {}
        }
    }

    /// Ramp back to `baseline` over the release step budget.
    pub fn note_off(&mut self, baseline: f32, period_ms: f32) {
        self.rest = baseline;
        self.ramp.release(baseline, steps_for(self.config.release_ms(), period_ms));
    }

    /// Advance one envelope period; returns the DAC code to write, if any.
    pub fn tick(&mut self, period_ms: f32) -> Option<i32> {
        let shift = self.keyboard_shift;
        self.ramp
            .advance(&self.config, self.rest, period_ms)
            .map(|cutoff| inverted_code(cutoff + shift))
    }
}
