//! Static ADSR configuration shared by every note of one envelope domain.

use crate::error::ConfigError;

/// Longest attack, decay or release a controller can select.
pub const MAX_TIME_MS: f32 = 5000.0;

/// Attack/decay/release times and sustain level of one envelope.
///
/// Only control changes mutate it; running ramps keep the deltas computed
/// at their last trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeConfig {
    attack_ms: f32,
    decay_ms: f32,
    release_ms: f32,
    sustain: f32,
}

impl EnvelopeConfig {
    /// Build a validated configuration.
    pub fn new(attack_ms: f32, decay_ms: f32, release_ms: f32, sustain: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            attack_ms: check_time("attack", attack_ms)?,
            decay_ms: check_time("decay", decay_ms)?,
            release_ms: check_time("release", release_ms)?,
            sustain: check_level("sustain", sustain)?,
        })
    }

    /// Power-on VCA settings.
    pub const fn vca_default() -> Self {
        Self { attack_ms: 10.0, decay_ms: 100.0, release_ms: 200.0, sustain: 0.5 }
    }

    /// Power-on VCF settings.
    pub const fn vcf_default() -> Self {
        Self { attack_ms: 50.0, decay_ms: 200.0, release_ms: 200.0, sustain: 0.3 }
    }

    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    pub fn decay_ms(&self) -> f32 {
        self.decay_ms
    }

    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    pub fn sustain(&self) -> f32 {
        self.sustain
    }

    pub fn set_attack_ms(&mut self, ms: f32) -> Result<(), ConfigError> {
        self.attack_ms = check_time("attack", ms)?;
        Ok(())
    }

    pub fn set_decay_ms(&mut self, ms: f32) -> Result<(), ConfigError> {
        self.decay_ms = check_time("decay", ms)?;
        Ok(())
    }

    pub fn set_release_ms(&mut self, ms: f32) -> Result<(), ConfigError> {
        self.release_ms = check_time("release", ms)?;
        Ok(())
    }

    pub fn set_sustain(&mut self, level: f32) -> Result<(), ConfigError> {
        self.sustain = check_level("sustain", level)?;
        Ok(())
    }

    /// Re-run the range checks, e.g. after building a config by hand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::new(self.attack_ms, self.decay_ms, self.release_ms, self.sustain).map(|_| ())
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self::vca_default()
    }
}

fn check_time(name: &'static str, value_ms: f32) -> Result<f32, ConfigError> {
    if value_ms.is_finite() && value_ms > 0.0 && value_ms <= MAX_TIME_MS {
        Ok(value_ms)
    } else {
        Err(ConfigError::InvalidTime { name, value_ms })
    }
}

pub(crate) fn check_level(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidLevel { name, value })
    }
}
