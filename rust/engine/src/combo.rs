/// Consecutive-match counter. The running count resets on a miss or a new
/// level; the best run of the session is kept for the final summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboTracker {
    current: u32,
    max_reached: u32,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max_reached(&self) -> u32 {
        self.max_reached
    }

    /// Count a successful match and return the new combo.
    pub fn record_match(&mut self) -> u32 {
        self.current = self.current.saturating_add(1);
        self.max_reached = self.max_reached.max(self.current);
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}
