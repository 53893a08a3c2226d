//! Clock sources for the current block timestamp

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current block time, truncated to 32 bits
pub trait Clock {
    fn now(&self) -> u32;
}

/// A clock that only moves when told to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedClock {
    now: u32,
}

impl FixedClock {
    pub fn new(now: u32) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: u32) {
        self.now = now;
    }

    /// Move forward, wrapping at 2^32 like a truncated block timestamp
    pub fn advance(&mut self, seconds: u32) {
        self.now = self.now.wrapping_add(seconds);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u32 {
        self.now
    }
}

/// Wall-clock unix time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as u32)
            .unwrap_or_default()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u32 {
        (**self).now()
    }
}
