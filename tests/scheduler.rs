//! Phase discipline of the tick handler.

mod common;

use common::{engine, run_cycles, tick};
use voiceboard::engine::{BoardConfig, Engine, SlowUpdate};
use voiceboard::ir::{resolve_cv, LogicalOutput, VCO_13700_CV, VCO_3340_CV};

fn updates<B: voiceboard::Board>(engine: &mut Engine<B>, ticks: usize, complete: impl Fn(&mut Engine<B>)) -> Vec<Option<SlowUpdate>> {
    (0..ticks)
        .map(|_| {
            let update = engine.tick();
            complete(engine);
            update
        })
        .collect()
}

fn finish(e: &mut Engine<common::RecordingBoard>) {
    if let Some(bank) = e.board_mut().in_flight.take() {
        e.on_transfer_complete(bank);
    }
}

#[test]
fn one_cycle_runs_each_slow_update_once_in_order() {
    let mut e = engine(BoardConfig::default());
    e.dispatch(0x90, 60, 100);
    // Let power-on latches drain first.
    run_cycles(&mut e, 1);

    let k = e.subdivision() as usize;
    let seen = updates(&mut e, k, finish);
    assert_eq!(
        &seen[..4],
        &[Some(SlowUpdate::PitchA), Some(SlowUpdate::PitchB), Some(SlowUpdate::Vca), Some(SlowUpdate::Vcf)]
    );
    assert!(seen[4..].iter().all(Option::is_none));
}

#[test]
fn at_most_one_write_per_tick() {
    let mut e = engine(BoardConfig::default());
    e.dispatch(0x90, 48, 127);
    e.dispatch(0xB0, 17, 100);
    e.dispatch(0xB0, 22, 30);
    for _ in 0..200 {
        let before = e.board().writes.len();
        tick(&mut e);
        assert!(e.board().writes.len() - before <= 1);
    }
    assert_eq!(e.faults().overlaps, 0);
}

#[test]
fn pitch_tracks_held_note_for_both_oscillators() {
    let mut e = engine(BoardConfig::default());
    e.dispatch(0x90, 45, 100);
    run_cycles(&mut e, 1);
    assert_eq!(e.board().last_code(LogicalOutput::Vco13700Freq), Some(resolve_cv(&VCO_13700_CV, 45)));
    assert_eq!(e.board().last_code(LogicalOutput::Vco3340Freq), Some(resolve_cv(&VCO_3340_CV, 45)));
}

#[test]
fn pitch_is_written_before_envelopes_after_a_note() {
    let mut e = engine(BoardConfig::default());
    run_cycles(&mut e, 1);
    e.board_mut().writes.clear();

    e.dispatch(0x90, 50, 100);
    run_cycles(&mut e, 1);
    let banks: Vec<u8> = e.board().writes.iter().map(|(bank, _)| bank.index()).collect();
    let pitch = LogicalOutput::Vco13700Freq.destination().bank.index();
    let vca = LogicalOutput::VCA.destination().bank.index();
    assert_eq!(banks[0], pitch);
    assert!(banks.iter().position(|b| *b == vca).unwrap() > 0);
}

#[test]
fn latched_outputs_go_out_on_idle_phases() {
    let mut e = engine(BoardConfig::default());
    run_cycles(&mut e, 1);
    e.dispatch(0xB0, 17, 127);
    e.dispatch(0xB0, 12, 0);

    let k = e.subdivision() as usize;
    let seen = updates(&mut e, k, finish);
    assert_eq!(seen[4], Some(SlowUpdate::Latched(LogicalOutput::VCO_3340_LEVEL)));
    assert_eq!(seen[5], Some(SlowUpdate::Latched(LogicalOutput::Vco3340PwmDuty)));
    assert_eq!(e.board().last_code(LogicalOutput::VCO_3340_LEVEL), Some(2047));
    assert_eq!(e.board().last_code(LogicalOutput::Vco3340PwmDuty), Some(0));
}

#[test]
fn power_on_mutes_vca_and_closes_filter() {
    let mut e = engine(BoardConfig::default());
    run_cycles(&mut e, 1);
    assert_eq!(e.board().last_code(LogicalOutput::VCA), Some(4095));
    assert_eq!(e.board().last_code(LogicalOutput::VcfCutoff), Some(4095));
    assert_eq!(e.board().last_code(LogicalOutput::Vco3340Freq), Some(2000));
}
