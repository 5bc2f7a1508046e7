//! Coalescing of rapid-fire events into a single delayed action.

/// Holds at most one pending value until a quiet period has elapsed.
///
/// Every [`schedule`](Debouncer::schedule) replaces the pending value and
/// restarts the quiet period, so a burst of events fires once, carrying the
/// last value, `delay_ms` after the burst ends.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(u64, T)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period in milliseconds.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Schedule `value` to fire at `now_ms + delay`, cancelling any pending value.
    pub fn schedule(&mut self, now_ms: u64, value: T) {
        self.pending = Some((now_ms.saturating_add(self.delay_ms), value));
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now_ms >= deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Drop the pending value without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
