//! Outbound interface to the board peripherals.
//!
//! The engine never touches registers. Everything it drives on the outside
//! goes through this trait: the shared DAC bus, the drum trigger lines, the
//! analog switches and the two indicator LEDs.

use vb_ir::{Bank, DrumVoice, Level, WireWord};

/// Analog switch control lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Switch {
    Vco3340Pulse,
    Vco3340Triangle,
    Vco3340Saw,
    /// Hard sync of VCO-B to VCO-A.
    Vco3340Sync,
    VcfSecondOrder,
    VcfFourthOrder,
}

/// Status LEDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Lit while a note is held.
    Gate,
    /// Lit while demo mode runs.
    Demo,
}

/// Peripheral access used by the engine.
pub trait Board {
    /// Assert the select line of `bank` and start shifting `word` out.
    ///
    /// The serial driver reports the end of the transfer through
    /// `Engine::on_transfer_complete`. Only called while no other transfer
    /// is outstanding.
    fn transmit(&mut self, bank: Bank, word: WireWord);

    /// Deassert the select line of `bank`, latching the DAC output.
    fn release(&mut self, bank: Bank);

    fn set_trigger_line(&mut self, voice: DrumVoice, level: Level);

    fn set_switch(&mut self, switch: Switch, on: bool);

    fn set_indicator(&mut self, _indicator: Indicator, _on: bool) {}
}
