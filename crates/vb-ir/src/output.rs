//! Logical output addressing and the MCP4822 wire format.
//!
//! Eight dual-channel DACs share one serial bus. A 3-to-8 decoder picks the
//! chip (`Bank`), the control nibble of the 16-bit word picks the channel
//! and the output gain.

/// Largest 12-bit DAC code.
pub const DAC_MAX: i32 = 4095;

/// Physical chip index on the shared bus (0-7, decoder address).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bank(u8);

impl Bank {
    pub const COUNT: usize = 8;

    /// Bank for a decoder address. Only the low three bits are wired.
    pub const fn new(index: u8) -> Self {
        Self(index & 0x07)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Output channel of a dual DAC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DacChannel {
    A,
    B,
}

/// Output amplifier gain: 1x spans 0-2.048 V, 2x spans 0-4.096 V.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gain {
    Unity,
    Double,
}

/// Where a logical output lives on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Destination {
    pub bank: Bank,
    pub channel: DacChannel,
    pub gain: Gain,
}

impl Destination {
    const fn new(bank: u8, channel: DacChannel, gain: Gain) -> Self {
        Self { bank: Bank::new(bank), channel, gain }
    }
}

/// Every analog control voltage the core can drive.
///
/// The mixer inputs are numbered as on the schematic; the associated
/// constants give them their musical names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOutput {
    /// VCO-A (13700) exponential pitch CV.
    Vco13700Freq,
    Noise,
    MixerIn1,
    MixerIn2,
    MixerIn3,
    MixerIn4,
    MixerIn5,
    MixerIn6,
    MixerIn7,
    MixerIn8,
    /// VCO-B (3340) pitch CV.
    Vco3340Freq,
    Vco3340PwmDuty,
    VcfCutoff,
    VcfResonance,
    AuxA,
    AuxB,
}

impl LogicalOutput {
    pub const COUNT: usize = 16;

    pub const ALL: [LogicalOutput; Self::COUNT] = [
        LogicalOutput::Vco13700Freq,
        LogicalOutput::Noise,
        LogicalOutput::MixerIn1,
        LogicalOutput::MixerIn2,
        LogicalOutput::MixerIn3,
        LogicalOutput::MixerIn4,
        LogicalOutput::MixerIn5,
        LogicalOutput::MixerIn6,
        LogicalOutput::MixerIn7,
        LogicalOutput::MixerIn8,
        LogicalOutput::Vco3340Freq,
        LogicalOutput::Vco3340PwmDuty,
        LogicalOutput::VcfCutoff,
        LogicalOutput::VcfResonance,
        LogicalOutput::AuxA,
        LogicalOutput::AuxB,
    ];

    pub const VCO_3340_LEVEL: LogicalOutput = LogicalOutput::MixerIn1;
    pub const VCO_13700_TRI_LEVEL: LogicalOutput = LogicalOutput::MixerIn2;
    pub const VCO_13700_SQUARE_LEVEL: LogicalOutput = LogicalOutput::MixerIn3;
    pub const VCO_13700_SUBBASS_LEVEL: LogicalOutput = LogicalOutput::MixerIn4;
    pub const FM_LEVEL: LogicalOutput = LogicalOutput::MixerIn5;
    pub const RING_MOD_LEVEL: LogicalOutput = LogicalOutput::MixerIn6;
    pub const SAMPLE_HOLD_LEVEL: LogicalOutput = LogicalOutput::MixerIn7;
    /// The VCA sits on the eighth mixer channel, fed by the VCF output.
    pub const VCA: LogicalOutput = LogicalOutput::MixerIn8;

    /// Resolve to the physical chip, channel and gain.
    pub const fn destination(self) -> Destination {
        use DacChannel::{A, B};
        use Gain::{Double, Unity};
        match self {
            LogicalOutput::Vco13700Freq => Destination::new(0, A, Double),
            LogicalOutput::Noise => Destination::new(0, B, Unity),
            LogicalOutput::MixerIn3 => Destination::new(1, A, Unity),
            LogicalOutput::MixerIn4 => Destination::new(1, B, Unity),
            LogicalOutput::MixerIn1 => Destination::new(2, A, Unity),
            LogicalOutput::MixerIn2 => Destination::new(2, B, Unity),
            LogicalOutput::Vco3340Freq => Destination::new(3, A, Double),
            LogicalOutput::Vco3340PwmDuty => Destination::new(3, B, Unity),
            LogicalOutput::MixerIn7 => Destination::new(4, A, Unity),
            LogicalOutput::MixerIn8 => Destination::new(4, B, Unity),
            LogicalOutput::MixerIn5 => Destination::new(5, A, Unity),
            LogicalOutput::MixerIn6 => Destination::new(5, B, Unity),
            LogicalOutput::VcfCutoff => Destination::new(6, A, Unity),
            LogicalOutput::VcfResonance => Destination::new(6, B, Unity),
            LogicalOutput::AuxA => Destination::new(7, A, Unity),
            LogicalOutput::AuxB => Destination::new(7, B, Unity),
        }
    }

    /// Position in `ALL`, used to index per-output tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One 16-bit DAC command, most significant byte first on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WireWord(u16);

impl WireWord {
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Bytes in transmission order.
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// 12-bit data field.
    pub const fn code(self) -> u16 {
        self.0 & 0x0FFF
    }

    pub const fn channel(self) -> DacChannel {
        if (self.0 >> 8) as u8 & CTRL_CHANNEL_B != 0 {
            DacChannel::B
        } else {
            DacChannel::A
        }
    }
}

// Control nibble: bit 7 channel B, bit 5 gain 1x (clear = 2x), bit 4 active.
const CTRL_CHANNEL_B: u8 = 0x80;
const CTRL_GAIN_1X: u8 = 0x20;
const CTRL_ACTIVE: u8 = 0x10;

/// Pack a DAC code for `channel`/`gain`, clamping it to `[0, 4095]`.
pub fn encode(value: i32, channel: DacChannel, gain: Gain) -> WireWord {
    let code = value.clamp(0, DAC_MAX) as u16;
    let mut ctrl = CTRL_ACTIVE;
    if channel == DacChannel::B {
        ctrl |= CTRL_CHANNEL_B;
    }
    if gain == Gain::Unity {
        ctrl |= CTRL_GAIN_1X;
    }
    let hi = ((code >> 8) as u8 & 0x0F) | ctrl;
    let lo = (code & 0xFF) as u8;
    WireWord(u16::from_be_bytes([hi, lo]))
}
