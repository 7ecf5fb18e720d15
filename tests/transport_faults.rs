//! Behaviour when the serial driver misbehaves.

mod common;

use common::{engine, tick};
use voiceboard::engine::{BoardConfig, SlowUpdate};
use voiceboard::ir::Bank;

#[test]
fn lost_completion_keeps_the_bus_busy() {
    let mut e = engine(BoardConfig::default());
    e.dispatch(0x90, 60, 100);

    // Phase 0 writes, completion never comes.
    assert_eq!(e.tick(), Some(SlowUpdate::PitchA));
    for _ in 1..e.subdivision() {
        assert_eq!(e.tick(), None);
    }
    assert_eq!(e.board().writes.len(), 1);
    // PitchB, VCA and VCF were refused; idle phases never try.
    assert_eq!(e.faults().overlaps, 3);
    assert!(e.transport().is_busy());
}

#[test]
fn late_completion_resumes_updates() {
    let mut e = engine(BoardConfig::default());
    e.tick();
    e.tick();
    let bank = e.board_mut().in_flight.take().unwrap();
    e.on_transfer_complete(bank);
    assert!(!e.transport().is_busy());

    // Next tick is phase 2; the VCA is idle so phase 3 and on proceed normally.
    tick(&mut e);
    tick(&mut e);
    tick(&mut e);
    assert!(e.board().writes.len() >= 2);
    assert_eq!(e.faults().spurious_completions, 0);
}

#[test]
fn spurious_completion_is_counted_and_harmless() {
    let mut e = engine(BoardConfig::default());
    e.on_transfer_complete(Bank::new(5));
    assert_eq!(e.faults().spurious_completions, 1);
    assert!(e.board().releases.is_empty());
    tick(&mut e);
    assert_eq!(e.board().writes.len(), 1);
}

#[test]
fn completion_releases_the_written_bank() {
    let mut e = engine(BoardConfig::default());
    tick(&mut e);
    let (bank, _) = e.board().writes[0];
    assert_eq!(e.board().releases, vec![bank]);
}
