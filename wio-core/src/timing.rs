//! Fixed-interval gating
//!
//! All periodic work in the node runs from a single cooperative tick. Each
//! activity owns an [`Interval`] and only runs when it is due.

/// Periodic gate over a wrapping millisecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period_ms: u32,
    last_run_ms: Option<u32>,
}

impl Interval {
    /// Create a gate that is due immediately
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_run_ms: None,
        }
    }

    /// Period in milliseconds
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Change the period, keeping the last run time
    pub fn set_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
    }

    /// Check if the activity should run at `now_ms`
    ///
    /// Due when it never ran or at least one period has elapsed. Elapsed
    /// time is computed with wrapping arithmetic so the 49-day rollover of
    /// the millisecond counter is harmless.
    pub fn is_due(&self, now_ms: u32) -> bool {
        match self.last_run_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.period_ms,
        }
    }

    /// Record a run at `now_ms`
    pub fn mark(&mut self, now_ms: u32) {
        self.last_run_ms = Some(now_ms);
    }

    /// Check and mark in one step
    ///
    /// Returns `true` if the activity should run now.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.is_due(now_ms) {
            self.mark(now_ms);
            true
        } else {
            false
        }
    }

    /// Make the gate due on the next check
    pub fn reset(&mut self) {
        self.last_run_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_when_never_run() {
        let gate = Interval::new(500);
        assert!(gate.is_due(0));
        assert!(gate.is_due(123_456));
    }

    #[test]
    fn test_gating() {
        let mut gate = Interval::new(500);
        assert!(gate.poll(1000));
        assert!(!gate.poll(1001));
        assert!(!gate.poll(1499));
        assert!(gate.poll(1500));
        assert!(!gate.poll(1600));
    }

    #[test]
    fn test_wraparound() {
        let mut gate = Interval::new(100);
        gate.mark(u32::MAX - 10);
        assert!(!gate.is_due(20));
        assert!(gate.is_due(89));
    }

    #[test]
    fn test_reset() {
        let mut gate = Interval::new(5000);
        gate.mark(0);
        assert!(!gate.is_due(10));
        gate.reset();
        assert!(gate.is_due(10));
    }
}
