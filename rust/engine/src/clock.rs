/// Result of advancing the clock by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Time left after the tick
    Running(u32),
    /// This tick took the clock to zero
    Expired,
    /// The clock had already run out; nothing changed
    Stopped,
}

/// Countdown in whole seconds, driven by an external 1-second tick.
/// Never goes below zero and cannot be restarted once expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    remaining: u32,
}

impl SessionClock {
    pub fn new(initial_secs: u32) -> Self {
        Self {
            remaining: initial_secs,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn tick(&mut self) -> ClockTick {
        if self.remaining == 0 {
            return ClockTick::Stopped;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            ClockTick::Expired
        } else {
            ClockTick::Running(self.remaining)
        }
    }

    /// Extend the countdown. Returns false (and adds nothing) once expired.
    pub fn add_bonus(&mut self, secs: u32) -> bool {
        if self.is_expired() {
            return false;
        }
        self.remaining = self.remaining.saturating_add(secs);
        true
    }
}
