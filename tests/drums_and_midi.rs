//! Drum triggers, MIDI routing and demo mode through the public API.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};

use common::{engine, run_cycles, run_ticks, tick, RecordingBoard};
use voiceboard::engine::{BoardConfig, Engine, Indicator, Stage, Switch, DEMO_NOTE_LENGTH, DEMO_VELOCITY};
use voiceboard::ir::{DrumVoice, Level, MidiMessage};

#[test]
fn drum_pulse_lasts_configured_ticks() {
    let mut e = engine(BoardConfig { drum_pulse_ticks: 3, ..BoardConfig::default() });
    e.dispatch(0x99, 36, 127);
    assert_eq!(e.board().trigger_level(DrumVoice::BassDrum), Some(Level::Low));

    run_ticks(&mut e, 2);
    assert!(e.drums().is_firing(DrumVoice::BassDrum));
    run_ticks(&mut e, 1);
    assert!(!e.drums().is_firing(DrumVoice::BassDrum));
    assert_eq!(e.board().trigger_level(DrumVoice::BassDrum), Some(Level::High));

    // Re-armable.
    e.dispatch(0x99, 36, 127);
    assert_eq!(e.drums().counter(DrumVoice::BassDrum), 3);
}

#[test]
fn drums_advance_on_every_phase() {
    let mut e = engine(BoardConfig { drum_pulse_ticks: 7, ..BoardConfig::default() });
    run_ticks(&mut e, 5);
    e.dispatch(0x99, 50, 100);
    run_ticks(&mut e, 7);
    assert_eq!(e.drums().counter(DrumVoice::HighTom), 0);
}

#[test]
fn power_on_drives_trigger_lines_idle() {
    let e = engine(BoardConfig::default());
    for voice in voiceboard::ir::DRUM_VOICES {
        assert_eq!(e.board().trigger_level(voice), Some(voice.idle_level()));
    }
}

#[test]
fn drum_channel_is_configurable() {
    let mut e = engine(BoardConfig { drum_channel: 0, ..BoardConfig::default() });
    e.dispatch(0x90, 38, 100);
    assert!(e.drums().is_firing(DrumVoice::Snare));
    assert_eq!(e.vca().stage(), Stage::Idle);
}

#[test]
fn gate_led_follows_notes() {
    let mut e = engine(BoardConfig::default());
    assert_eq!(e.board().indicator(Indicator::Gate), Some(false));
    e.dispatch(0x90, 60, 100);
    assert_eq!(e.board().indicator(Indicator::Gate), Some(true));
    e.dispatch(0x80, 60, 0);
    assert_eq!(e.board().indicator(Indicator::Gate), Some(false));
}

#[test]
fn queued_messages_apply_in_order_on_next_tick() {
    let mut e = engine(BoardConfig::default());
    e.enqueue(MidiMessage::note_on(0, 40, 100)).unwrap();
    e.enqueue(MidiMessage::control_change(0, 14, 1)).unwrap();
    e.enqueue(MidiMessage::note_off(0, 40)).unwrap();
    assert_eq!(e.vca().stage(), Stage::Idle);

    tick(&mut e);
    assert_eq!(e.note().note, 40);
    assert_eq!(e.vca().stage(), Stage::Release);
    assert_eq!(e.board().switches.last(), Some(&(Switch::VcfFourthOrder, true)));
}

#[test]
fn demo_cycles_notes_with_bass_drum() {
    let mut e = engine(BoardConfig { demo_enabled: true, ..BoardConfig::default() });
    assert_eq!(e.board().indicator(Indicator::Demo), Some(true));

    tick(&mut e);
    assert_eq!(e.note().note, 36);
    assert_eq!(e.note().velocity, DEMO_VELOCITY);
    assert!(e.drums().is_firing(DrumVoice::BassDrum));

    run_cycles(&mut e, DEMO_NOTE_LENGTH as usize);
    assert_eq!(e.vca().stage(), Stage::Release);
    assert_eq!(e.board().indicator(Indicator::Gate), Some(false));
}

#[test]
fn demo_toggle_updates_led_on_next_cycle() {
    let mut e = engine(BoardConfig::default());
    assert!(e.toggle_demo());
    assert_eq!(e.board().indicator(Indicator::Demo), Some(false));
    run_cycles(&mut e, 1);
    assert_eq!(e.board().indicator(Indicator::Demo), Some(true));
    assert_eq!(e.vca().stage(), Stage::Attack);

    assert!(!e.toggle_demo());
    run_cycles(&mut e, 1);
    assert_eq!(e.board().indicator(Indicator::Demo), Some(false));
}

#[test]
fn demo_flag_can_be_flipped_from_outside_the_engine() {
    static BUTTON: AtomicBool = AtomicBool::new(true);
    let mut e = Engine::with_demo_flag(RecordingBoard::default(), BoardConfig::default(), &BUTTON).unwrap();
    assert!(!BUTTON.load(Ordering::Relaxed));

    BUTTON.fetch_xor(true, Ordering::Relaxed);
    assert!(e.demo_enabled());
    run_cycles(&mut e, 1);
    assert_eq!(e.board().indicator(Indicator::Demo), Some(true));
    assert_eq!(e.note().velocity, DEMO_VELOCITY);
}
