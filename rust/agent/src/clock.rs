use std::time::Duration;

use crate::config::AgentConfig;

/// Match-scoped wall-clock budget. Initialized once at match start, debited
/// after every decision, never replenished. Allocation spreads the remaining
/// headroom over the expected number of future decisions so early hands do
/// not starve later ones, and collapses to a minimal slice once the critical
/// reserve is reached.
#[derive(Debug, Clone)]
pub struct TimeBudget {
    remaining: Duration,
    decisions_left: u32,
    ceiling: Duration,
    minimal: Duration,
    critical: Duration,
}

impl TimeBudget {
    pub fn new(
        total: Duration,
        estimated_decisions: u32,
        ceiling: Duration,
        minimal: Duration,
        critical: Duration,
    ) -> Self {
        Self {
            remaining: total,
            decisions_left: estimated_decisions.max(1),
            ceiling: ceiling.max(minimal),
            minimal,
            critical,
        }
    }

    pub fn from_config(cfg: &AgentConfig) -> Self {
        Self::new(
            Duration::from_millis(cfg.match_budget_ms),
            cfg.estimated_decisions,
            Duration::from_millis(cfg.decision_ceiling_ms),
            Duration::from_millis(cfg.minimal_slice_ms),
            Duration::from_millis(cfg.critical_reserve_ms),
        )
    }

    /// Deadline for the upcoming decision. Below the critical reserve this
    /// is always the minimal slice, which only permits the fallback path.
    pub fn allocate(&self) -> Duration {
        if self.is_critical() {
            return self.minimal;
        }
        let headroom = self.remaining - self.critical;
        let slice = headroom / self.decisions_left.max(1);
        slice.clamp(self.minimal, self.ceiling)
    }

    /// Debit the time actually spent on a decision.
    pub fn consume(&mut self, elapsed: Duration) {
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.decisions_left = self.decisions_left.saturating_sub(1).max(1);
    }

    pub fn is_critical(&self) -> bool {
        self.remaining <= self.critical
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn decisions_left(&self) -> u32 {
        self.decisions_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(total_ms: u64, decisions: u32) -> TimeBudget {
        TimeBudget::new(
            Duration::from_millis(total_ms),
            decisions,
            Duration::from_millis(500),
            Duration::from_millis(5),
            Duration::from_millis(1_000),
        )
    }

    #[test]
    fn allocation_never_exceeds_ceiling() {
        // enormous budget, one decision expected
        let b = budget(3_600_000, 1);
        assert_eq!(b.allocate(), Duration::from_millis(500));
    }

    #[test]
    fn allocation_spreads_over_expected_decisions() {
        let b = budget(41_000, 100);
        // (41s - 1s critical) / 100 = 400ms
        assert_eq!(b.allocate(), Duration::from_millis(400));
    }

    #[test]
    fn allocation_never_below_minimal_slice() {
        let b = budget(1_100, 1_000_000);
        assert_eq!(b.allocate(), Duration::from_millis(5));
    }

    #[test]
    fn critical_budget_collapses_to_minimal_regardless_of_remaining() {
        let mut b = budget(10_000, 10);
        b.consume(Duration::from_millis(9_200));
        assert!(b.is_critical());
        assert_eq!(b.allocate(), Duration::from_millis(5));
        // stays minimal forever after
        b.consume(Duration::from_millis(1));
        assert_eq!(b.allocate(), Duration::from_millis(5));
    }

    #[test]
    fn allocation_shrinks_as_budget_drains() {
        let mut b = budget(41_000, 100);
        let first = b.allocate();
        b.consume(Duration::from_millis(10_000));
        // hold the estimate constant for comparison
        b.decisions_left = 100;
        assert!(b.allocate() < first);
    }

    #[test]
    fn consume_saturates_and_keeps_estimate_positive() {
        let mut b = budget(100, 2);
        b.consume(Duration::from_secs(10));
        assert_eq!(b.remaining(), Duration::ZERO);
        b.consume(Duration::from_secs(1));
        assert_eq!(b.decisions_left(), 1);
        assert_eq!(b.allocate(), Duration::from_millis(5));
    }
}
