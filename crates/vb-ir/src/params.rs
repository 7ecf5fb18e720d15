//! Control-change parameter identifiers and their numeric mappings.
//!
//! Every parameter takes a 0-127 controller value. Timed parameters map to
//! `((value + 1) / 127) * MAX_TIME_MS`, level parameters to
//! `(value / 127) * max`.

use crate::envelope_config::MAX_TIME_MS;

/// Maximum sustain level.
pub const MAX_SUSTAIN: f32 = 1.0;
/// Maximum velocity sensitivity.
pub const MAX_VELOCITY_SENSITIVITY: f32 = 1.0;
/// Mixer and resonance inputs only accept half the DAC span.
pub const MAX_MIXER: f32 = 0.5;
/// Cutoff shift at full keyboard tracking for a note 64 semitones above the centre.
pub const MAX_KBD_TRACKING: f32 = 0.5;

/// Control-change parameter ids understood by the board.
///
/// The discriminant is the controller number carried in `data1`. Ids 20 and
/// 24 are reserved and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CcParam {
    VcaAttack = 0,
    VcaDecay = 1,
    VcaSustain = 2,
    VcaRelease = 3,
    VcfAttack = 4,
    VcfDecay = 5,
    VcfSustain = 6,
    VcfRelease = 7,
    VcaVelocitySensitivity = 8,
    VcfVelocitySensitivity = 9,
    VcfResonance = 10,
    VcfCutoff = 11,
    /// VCO-B (3340) pulse width.
    Pwm3340 = 12,
    /// Hard sync VCO-A -> VCO-B, on only at 127.
    Sync3340 = 13,
    /// 0 selects the 2nd-order lowpass, 1 the 4th-order.
    VcfOrder = 14,
    /// 0 pulse, 1 triangle, 2 sawtooth.
    Wave3340 = 15,
    Octave3340 = 16,
    Level3340 = 17,
    Detune13700 = 18,
    Detune3340 = 19,
    Octave13700 = 21,
    /// Crossfade between the VCO-A triangle and square mixer inputs.
    Wave13700 = 22,
    VcfKbdTracking = 23,
    VcfEnvAmount = 25,
}

impl CcParam {
    pub const ALL: [CcParam; 24] = [
        CcParam::VcaAttack,
        CcParam::VcaDecay,
        CcParam::VcaSustain,
        CcParam::VcaRelease,
        CcParam::VcfAttack,
        CcParam::VcfDecay,
        CcParam::VcfSustain,
        CcParam::VcfRelease,
        CcParam::VcaVelocitySensitivity,
        CcParam::VcfVelocitySensitivity,
        CcParam::VcfResonance,
        CcParam::VcfCutoff,
        CcParam::Pwm3340,
        CcParam::Sync3340,
        CcParam::VcfOrder,
        CcParam::Wave3340,
        CcParam::Octave3340,
        CcParam::Level3340,
        CcParam::Detune13700,
        CcParam::Detune3340,
        CcParam::Octave13700,
        CcParam::Wave13700,
        CcParam::VcfKbdTracking,
        CcParam::VcfEnvAmount,
    ];

    /// Look up a parameter by controller number.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| *p as u8 == id)
    }
}

/// Map a controller value to a time in milliseconds, never zero.
pub fn cc_to_time_ms(value: u8) -> f32 {
    let value = value.min(127) as f32;
    ((value + 1.0) / 127.0 * MAX_TIME_MS).min(MAX_TIME_MS)
}

/// Map a controller value to a level in `[0, max]`.
pub fn cc_to_level(value: u8, max: f32) -> f32 {
    value.min(127) as f32 / 127.0 * max
}

/// Map a controller value to a 12-bit DAC code over `[0, max]` of full scale.
pub fn cc_to_code(value: u8, max: f32) -> i32 {
    level_to_code(cc_to_level(value, max))
}

/// 12-bit DAC code for a fraction of full scale.
pub fn level_to_code(level: f32) -> i32 {
    (4095.0 * level.clamp(0.0, 1.0)) as i32
}

/// Number of envelope steps needed to cover `duration_ms`, at least one.
pub fn steps_for(duration_ms: f32, period_ms: f32) -> u32 {
    let steps = libm::roundf(duration_ms / period_ms);
    if steps < 1.0 {
        1
    } else {
        steps as u32
    }
}
