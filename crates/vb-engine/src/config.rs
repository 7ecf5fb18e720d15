//! Board configuration, validated once at engine construction.

use arrayvec::ArrayVec;
use vb_ir::{ConfigError, EnvelopeConfig};

/// Four phases carry the pitch and envelope updates.
pub const MIN_SUBDIVISION: u16 = 4;

/// Capacity of the demo note cycle.
pub const MAX_DEMO_NOTES: usize = 8;

/// Static description of the board and its power-on voice.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardConfig {
    /// Hardware timer period in microseconds.
    pub tick_period_us: u32,
    /// Ticks per slow-update cycle.
    pub subdivision: u16,
    /// MIDI channel nibble reserved for the drum section.
    pub drum_channel: u8,
    /// Trigger pulse length in ticks.
    pub drum_pulse_ticks: u16,
    /// Demo mode state at boot.
    pub demo_enabled: bool,
    pub demo_notes: ArrayVec<u8, MAX_DEMO_NOTES>,
    pub vca: EnvelopeConfig,
    pub vcf: EnvelopeConfig,
    pub vca_velocity_sensitivity: f32,
    pub vcf_velocity_sensitivity: f32,
    pub keyboard_tracking: f32,
    pub envelope_amount: f32,
    /// Baseline filter cutoff, 0 (closed) to 1 (open).
    pub cutoff: f32,
    /// Resonance amount, 0 to 1 of the resonance input's range.
    pub resonance: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tick_period_us: 50,
            subdivision: 20,
            drum_channel: 9,
            drum_pulse_ticks: 1,
            demo_enabled: false,
            demo_notes: [36, 48, 36, 48].into_iter().collect(),
            vca: EnvelopeConfig::vca_default(),
            vcf: EnvelopeConfig::vcf_default(),
            vca_velocity_sensitivity: 0.5,
            vcf_velocity_sensitivity: 0.5,
            keyboard_tracking: 0.0,
            envelope_amount: 1.0,
            cutoff: 0.1,
            resonance: 0.0,
        }
    }
}

impl BoardConfig {
    /// Period between two updates of the same slow output, in milliseconds.
    pub fn envelope_period_ms(&self) -> f32 {
        self.tick_period_us as f32 * self.subdivision as f32 / 1000.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_us == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.subdivision < MIN_SUBDIVISION {
            return Err(ConfigError::SubdivisionTooSmall(self.subdivision));
        }
        if self.drum_channel > 0x0F {
            return Err(ConfigError::InvalidChannel(self.drum_channel));
        }
        if self.drum_pulse_ticks == 0 {
            return Err(ConfigError::ZeroPulseLength);
        }
        if self.demo_notes.is_empty() {
            return Err(ConfigError::EmptyDemoSequence);
        }
        self.vca.validate()?;
        self.vcf.validate()?;
        check_level("VCA velocity sensitivity", self.vca_velocity_sensitivity)?;
        check_level("VCF velocity sensitivity", self.vcf_velocity_sensitivity)?;
        check_level("keyboard tracking", self.keyboard_tracking)?;
        check_level("envelope amount", self.envelope_amount)?;
        check_level("cutoff", self.cutoff)?;
        check_level("resonance", self.resonance)?;
        Ok(())
    }
}

fn check_level(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLevel { name, value })
    }
}
