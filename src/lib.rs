//! voiceboard: MIDI to control-voltage core for a hybrid analog synth voice.
//!
//! The data model lives in [`ir`], the interrupt-driven engine in
//! [`engine`]. Firmware implements [`engine::Board`] for its peripherals,
//! builds an [`Engine`] from a [`BoardConfig`] and calls [`Engine::tick`]
//! from the timer interrupt.

pub use vb_engine as engine;
pub use vb_ir as ir;

pub use vb_engine::{Board, BoardConfig, Engine, SlowUpdate};
