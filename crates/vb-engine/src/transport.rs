//! Single-outstanding-transfer gate in front of the shared DAC bus.

use core::fmt;

use log::warn;
use vb_ir::{encode, Bank, LogicalOutput, WireWord};

use crate::board::Board;

/// A write the gate refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportError {
    /// A transfer to `pending` has not completed yet.
    Busy { pending: Bank, requested: Bank },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Busy { pending, requested } => write!(
                f,
                "Bus busy: bank {} still in flight, write to bank {} dropped",
                pending.index(),
                requested.index()
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

/// Fault counters. They saturate instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransportFaults {
    /// Writes refused because a transfer was still outstanding.
    pub overlaps: u32,
    /// Completion notifications with no matching transfer.
    pub spurious_completions: u32,
}

/// Owns the "at most one write in flight" invariant.
///
/// There is no timeout: if a completion never arrives the gate stays busy
/// and every later write is counted as an overlap.
#[derive(Clone, Debug, Default)]
pub struct TransportGate {
    pending: Option<Bank>,
    faults: TransportFaults,
    writes: u32,
}

impl TransportGate {
    pub const fn new() -> Self {
        Self {
            pending: None,
            faults: TransportFaults { overlaps: 0, spurious_completions: 0 },
            writes: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Bank whose transfer is outstanding.
    pub fn pending(&self) -> Option<Bank> {
        self.pending
    }

    pub fn faults(&self) -> TransportFaults {
        self.faults
    }

    /// Number of transfers started so far (wrapping).
    pub fn writes(&self) -> u32 {
        self.writes
    }

    /// Encode `code` for `output` and send it.
    pub fn write<B: Board>(&mut self, board: &mut B, output: LogicalOutput, code: i32) -> Result<(), TransportError> {
        let dest = output.destination();
        self.write_word(board, dest.bank, encode(code, dest.channel, dest.gain))
    }

    /// Send a pre-encoded word to `bank`.
    pub fn write_word<B: Board>(&mut self, board: &mut B, bank: Bank, word: WireWord) -> Result<(), TransportError> {
        if let Some(pending) = self.pending {
            self.faults.overlaps = self.faults.overlaps.saturating_add(1);
            let err = TransportError::Busy { pending, requested: bank };
            warn!("{}", err);
            return Err(err);
        }
        self.pending = Some(bank);
        self.writes = self.writes.wrapping_add(1);
        board.transmit(bank, word);
        Ok(())
    }

    /// Transfer-complete notification from the serial driver.
    pub fn complete<B: Board>(&mut self, board: &mut B, bank: Bank) {
        match self.pending.take() {
            Some(pending) if pending == bank => board.release(bank),
            Some(pending) => {
                self.faults.spurious_completions = self.faults.spurious_completions.saturating_add(1);
                warn!(
                    "Completion for bank {} while bank {} was pending",
                    bank.index(),
                    pending.index()
                );
                board.release(pending);
            }
            None => {
                self.faults.spurious_completions = self.faults.spurious_completions.saturating_add(1);
                warn!("Completion for bank {} with no transfer pending", bank.index());
            }
        }
    }
}
