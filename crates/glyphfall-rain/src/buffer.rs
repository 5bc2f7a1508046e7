//! FIFO queue of characters waiting to be placed in columns.

use std::collections::VecDeque;

/// Pending characters received from the text supplier.
///
/// Characters leave in exactly the order they arrived.
#[derive(Debug, Clone, Default)]
pub struct CharacterBuffer {
    queue: VecDeque<char>,
}

impl CharacterBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch at the back.
    pub fn append<I: IntoIterator<Item = char>>(&mut self, batch: I) {
        self.queue.extend(batch);
    }

    /// Remove and return up to `count` characters from the front.
    pub fn take_characters(&mut self, count: usize) -> Vec<char> {
        let count = count.min(self.queue.len());
        self.queue.drain(..count).collect()
    }

    /// Take exactly `count` characters, padding a shortfall with `filler`.
    pub fn take_padded(&mut self, count: usize, filler: char) -> Vec<char> {
        let mut glyphs = self.take_characters(count);
        glyphs.resize(count, filler);
        glyphs
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
