//! Linear ADSR ramp shared by the VCA and VCF envelopes.
//!
//! Every leg is a fixed number of equal steps toward a target. The last
//! step lands exactly on the target so rounding never accumulates across
//! legs.

use vb_ir::params::steps_for;
use vb_ir::EnvelopeConfig;

/// Envelope stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    Attack,
    Decay,
    Release,
}

/// Runtime state of one envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct Ramp {
    stage: Stage,
    /// Current output level.
    level: f32,
    /// Level the current leg ends on.
    target: f32,
    /// Increment applied per step.
    delta: f32,
    /// Steps taken in the current leg.
    elapsed: u32,
    /// Steps the current leg lasts.
    budget: u32,
}

impl Ramp {
    /// An idle ramp resting at `rest`.
    pub const fn new(rest: f32) -> Self {
        Self { stage: Stage::Idle, level: rest, target: rest, delta: 0.0, elapsed: 0, budget: 0 }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Move the resting level without emitting. Only meaningful while idle.
    pub(crate) fn rest_at(&mut self, level: f32) {
        if self.stage == Stage::Idle {
            self.level = level;
            self.target = level;
        }
    }

    /// Start the attack leg from the current level.
    ///
    /// With zero steps the leg is already complete: the next advance emits
    /// the current level and starts the decay from there, so a softer
    /// retrigger never jumps down to its peak.
    pub fn attack(&mut self, target: f32, steps: u32) {
        self.aim(Stage::Attack, target, steps);
    }

    /// Start the release leg from the current level, whatever the stage.
    ///
    /// A ramp already sitting at `rest` gets an empty leg and goes idle on
    /// its next advance without emitting.
    pub fn release(&mut self, rest: f32, steps: u32) {
        let steps = if self.level == rest { 0 } else { steps.max(1) };
        self.aim(Stage::Release, rest, steps);
    }

    /// Send a running release to a new resting level over the steps it has
    /// left. A release that already reached its old rest takes one step.
    pub fn retarget_release(&mut self, rest: f32) {
        if self.stage != Stage::Release || rest == self.target {
            return;
        }
        let remaining = self.budget.saturating_sub(self.elapsed).max(1);
        self.aim(Stage::Release, rest, remaining);
    }

    fn aim(&mut self, stage: Stage, target: f32, steps: u32) {
        self.stage = stage;
        self.target = target;
        self.elapsed = 0;
        self.budget = steps;
        self.delta = if steps == 0 { 0.0 } else { (target - self.level) / steps as f32 };
    }

    fn step(&mut self) {
        self.elapsed += 1;
        if self.elapsed >= self.budget {
            self.level = self.target;
        } else {
            self.level += self.delta;
        }
    }

    /// Advance one envelope period.
    ///
    /// `sustain_ref` is the level sustain is measured from (0 for the VCA,
    /// the baseline cutoff for the VCF). Returns the level to write out, or
    /// `None` when the output should be left alone.
    pub fn advance(&mut self, config: &EnvelopeConfig, sustain_ref: f32, period_ms: f32) -> Option<f32> {
        match self.stage {
            Stage::Idle => None,
            Stage::Attack => {
                let emitted = self.level;
                if self.elapsed < self.budget {
                    self.step();
                }
                if self.elapsed >= self.budget {
                    let sustain = sustain_ref + (self.target - sustain_ref) * config.sustain();
                    self.aim(Stage::Decay, sustain, steps_for(config.decay_ms(), period_ms));
                }
                Some(emitted)
            }
            Stage::Decay => {
                // Sustain plateau once the leg is spent.
                if self.elapsed < self.budget {
                    self.step();
                    Some(self.level)
                } else {
                    None
                }
            }
            Stage::Release => {
                if self.elapsed < self.budget {
                    self.step();
                    if self.elapsed >= self.budget {
                        self.stage = Stage::Idle;
                    }
                    Some(self.level)
                } else {
                    self.stage = Stage::Idle;
                    None
                }
            }
        }
    }
}
