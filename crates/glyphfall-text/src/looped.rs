//! Looping character sequence with a wrapping read cursor.

use glyphfall_core::MAX_STREAM_BATCH_SIZE;

use crate::error::TextError;

/// The base text repeated into one long sequence, read in batches.
#[derive(Debug, Clone)]
pub struct LoopedText {
    chars: Vec<char>,
    index: usize,
}

impl LoopedText {
    /// Repeat `base` until the sequence holds at least `loop_multiplier` copies.
    pub fn new(base: &str, loop_multiplier: usize) -> Result<Self, TextError> {
        let base: Vec<char> = base.chars().collect();
        if base.is_empty() {
            return Err(TextError::EmptyText);
        }

        let target = base.len() * loop_multiplier.max(1);
        let mut chars = Vec::with_capacity(target);
        while chars.len() < target {
            chars.extend_from_slice(&base);
        }

        Ok(Self { chars, index: 0 })
    }

    /// Total length of the looped sequence.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; an empty text is rejected by [`LoopedText::new`].
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Current read position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Take the next `batch_size` characters, wrapping past the end.
    ///
    /// The batch always has exactly `min(batch_size, MAX_STREAM_BATCH_SIZE)`
    /// characters, even when it spans the end of the sequence more than once.
    pub fn next_batch(&mut self, batch_size: usize) -> Vec<char> {
        let size = batch_size.min(MAX_STREAM_BATCH_SIZE);
        let len = self.chars.len();

        let batch: Vec<char> = self.chars[self.index..]
            .iter()
            .chain(self.chars.iter().cycle())
            .take(size)
            .copied()
            .collect();

        self.index = (self.index + size % len) % len;
        batch
    }
}
