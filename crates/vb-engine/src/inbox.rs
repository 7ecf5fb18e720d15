//! Fixed-capacity queue of received MIDI messages.
//!
//! The receive interrupt pushes complete messages; the tick handler drains
//! them before advancing anything, so every envelope mutation happens in
//! tick context. Nothing here allocates.

use heapless::Deque;
use vb_ir::MidiMessage;

/// Messages the inbox holds before refusing new ones.
pub const INBOX_CAPACITY: usize = 16;

#[derive(Clone, Debug, Default)]
pub struct MidiInbox {
    queue: Deque<MidiMessage, INBOX_CAPACITY>,
    /// Messages refused because the queue was full.
    dropped: u32,
}

impl MidiInbox {
    pub const fn new() -> Self {
        Self { queue: Deque::new(), dropped: 0 }
    }

    /// Queue a message. Hands it back when the inbox is full.
    pub fn push(&mut self, message: MidiMessage) -> Result<(), MidiMessage> {
        self.queue.push_back(message).inspect_err(|_| {
            self.dropped = self.dropped.saturating_add(1);
        })
    }

    /// Oldest queued message.
    pub fn pop(&mut self) -> Option<MidiMessage> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
