//! Shared test board: records everything the engine drives.

#![allow(dead_code)]

use voiceboard::engine::{Board, BoardConfig, Engine, Indicator, Switch};
use voiceboard::ir::{Bank, DrumVoice, Level, LogicalOutput, WireWord};

#[derive(Default)]
pub struct RecordingBoard {
    pub writes: Vec<(Bank, WireWord)>,
    pub releases: Vec<Bank>,
    pub triggers: Vec<(DrumVoice, Level)>,
    pub switches: Vec<(Switch, bool)>,
    pub indicators: Vec<(Indicator, bool)>,
    /// Bank of the transfer the "serial driver" has not finished yet.
    pub in_flight: Option<Bank>,
}

impl Board for RecordingBoard {
    fn transmit(&mut self, bank: Bank, word: WireWord) {
        self.writes.push((bank, word));
        self.in_flight = Some(bank);
    }

    fn release(&mut self, bank: Bank) {
        self.releases.push(bank);
    }

    fn set_trigger_line(&mut self, voice: DrumVoice, level: Level) {
        self.triggers.push((voice, level));
    }

    fn set_switch(&mut self, switch: Switch, on: bool) {
        self.switches.push((switch, on));
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.indicators.push((indicator, on));
    }
}

impl RecordingBoard {
    /// Codes written to `output`, oldest first.
    pub fn codes_for(&self, output: LogicalOutput) -> Vec<u16> {
        let dest = output.destination();
        self.writes
            .iter()
            .filter(|(bank, word)| *bank == dest.bank && word.channel() == dest.channel)
            .map(|(_, word)| word.code())
            .collect()
    }

    pub fn last_code(&self, output: LogicalOutput) -> Option<u16> {
        self.codes_for(output).last().copied()
    }

    pub fn trigger_level(&self, voice: DrumVoice) -> Option<Level> {
        self.triggers.iter().rev().find(|(v, _)| *v == voice).map(|(_, level)| *level)
    }

    pub fn indicator(&self, indicator: Indicator) -> Option<bool> {
        self.indicators.iter().rev().find(|(i, _)| *i == indicator).map(|(_, on)| *on)
    }
}

pub fn engine(config: BoardConfig) -> Engine<RecordingBoard> {
    Engine::new(RecordingBoard::default(), config).unwrap()
}

/// Tick once and let the serial driver finish the transfer straight away.
pub fn tick(engine: &mut Engine<RecordingBoard>) {
    engine.tick();
    if let Some(bank) = engine.board_mut().in_flight.take() {
        engine.on_transfer_complete(bank);
    }
}

pub fn run_ticks(engine: &mut Engine<RecordingBoard>, ticks: usize) {
    for _ in 0..ticks {
        tick(engine);
    }
}

/// Run whole slow-update cycles of `subdivision` ticks.
pub fn run_cycles(engine: &mut Engine<RecordingBoard>, cycles: usize) {
    let ticks = engine.subdivision() as usize * cycles;
    run_ticks(engine, ticks);
}
