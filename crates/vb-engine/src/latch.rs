//! Latched static outputs waiting for a free scheduler phase.
//!
//! Control changes that move a DAC (mixer levels, resonance, pulse width)
//! do not write immediately. The latest code per output is kept here and
//! the scheduler flushes one entry per idle phase.

use vb_ir::{LogicalOutput, DAC_MAX};

#[derive(Clone, Debug)]
pub struct OutputLatch {
    codes: [Option<u16>; LogicalOutput::COUNT],
    /// Where the next flush scan starts, so outputs are served in turn.
    cursor: usize,
}

impl OutputLatch {
    pub const fn new() -> Self {
        Self { codes: [None; LogicalOutput::COUNT], cursor: 0 }
    }

    /// Record `code` for `output`, replacing any value not yet flushed.
    pub fn latch(&mut self, output: LogicalOutput, code: i32) {
        self.codes[output.index()] = Some(code.clamp(0, DAC_MAX) as u16);
    }

    /// Drop a latched value that has not been flushed yet.
    pub fn discard(&mut self, output: LogicalOutput) -> Option<u16> {
        self.codes[output.index()].take()
    }

    pub fn pending(&self, output: LogicalOutput) -> Option<u16> {
        self.codes[output.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// Take the next latched output, round-robin.
    pub fn take_next(&mut self) -> Option<(LogicalOutput, u16)> {
        for offset in 0..LogicalOutput::COUNT {
            let idx = (self.cursor + offset) % LogicalOutput::COUNT;
            if let Some(code) = self.codes[idx].take() {
                self.cursor = (idx + 1) % LogicalOutput::COUNT;
                return Some((LogicalOutput::ALL[idx], code));
            }
        }
        None
    }
}

impl Default for OutputLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_latch_yields_nothing() {
        let mut latch = OutputLatch::new();
        assert!(latch.is_empty());
        assert_eq!(latch.take_next(), None);
    }

    #[test]
    fn latest_value_wins() {
        let mut latch = OutputLatch::new();
        latch.latch(LogicalOutput::VcfResonance, 100);
        latch.latch(LogicalOutput::VcfResonance, 200);
        assert_eq!(latch.len(), 1);
        assert_eq!(latch.take_next(), Some((LogicalOutput::VcfResonance, 200)));
        assert!(latch.is_empty());
    }

    #[test]
    fn codes_are_clamped() {
        let mut latch = OutputLatch::new();
        latch.latch(LogicalOutput::AuxA, 9000);
        latch.latch(LogicalOutput::AuxB, -1);
        assert_eq!(latch.pending(LogicalOutput::AuxA), Some(4095));
        assert_eq!(latch.pending(LogicalOutput::AuxB), Some(0));
    }

    #[test]
    fn flush_is_round_robin() {
        let mut latch = OutputLatch::new();
        latch.latch(LogicalOutput::MixerIn1, 1);
        latch.latch(LogicalOutput::MixerIn5, 5);
        assert_eq!(latch.take_next().map(|(o, _)| o), Some(LogicalOutput::MixerIn1));
        // MixerIn1 comes back but the scan resumes after it
        latch.latch(LogicalOutput::MixerIn1, 2);
        assert_eq!(latch.take_next().map(|(o, _)| o), Some(LogicalOutput::MixerIn5));
        assert_eq!(latch.take_next(), Some((LogicalOutput::MixerIn1, 2)));
    }

    #[test]
    fn discard_drops_pending_value() {
        let mut latch = OutputLatch::new();
        latch.latch(LogicalOutput::MixerIn8, 4095);
        assert_eq!(latch.discard(LogicalOutput::MixerIn8), Some(4095));
        assert_eq!(latch.discard(LogicalOutput::MixerIn8), None);
        assert!(latch.is_empty());
    }
}
