//! Timestamp sources for node metadata.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of node timestamps, in milliseconds.
pub trait Clock {
    /// Current time.
    fn now(&self) -> u64;
}

/// Wall clock backed by [`SystemTime`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Deterministic clock that advances by one on every read.
#[derive(Debug)]
pub struct TickClock {
    next: Cell<u64>,
}

impl TickClock {
    /// Start counting at `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: Cell::new(start),
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::starting_at(1000)
    }
}

impl Clock for TickClock {
    fn now(&self) -> u64 {
        let current = self.next.get();
        self.next.set(current + 1);
        current
    }
}
