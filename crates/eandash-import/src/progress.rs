//! Progress accounting for an import run.

/// A point-in-time view of run progress, published after every chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    /// Rounded completion percentage, clamped to 0–100. Reaches 100 only
    /// when every code has been dispatched.
    pub percent: u8,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn new(processed: usize, succeeded: usize, failed: usize, total: usize) -> Self {
        Self {
            processed,
            succeeded,
            failed,
            total,
            percent: percent(processed, total),
        }
    }
}

/// Terminal accounting for a run, reported whether it completed or was
/// stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    /// `true` when the run ended on a user stop rather than completion.
    pub stopped: bool,
}

impl RunSummary {
    #[must_use]
    pub fn completed(&self) -> bool {
        !self.stopped && self.processed == self.total
    }
}

/// Rounded percentage of `processed` out of `total`, clamped to 0–100.
///
/// An empty run counts as fully dispatched.
#[must_use]
pub fn percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let processed = processed.min(total);
    // round(processed / total * 100) in integer arithmetic.
    let rounded = (processed * 200 + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
    }

    #[test]
    fn percent_bounds() {
        assert_eq!(percent(0, 10), 0);
        assert_eq!(percent(10, 10), 100);
        assert_eq!(percent(990, 1000), 99);
    }

    #[test]
    fn percent_clamps_overshoot() {
        assert_eq!(percent(15, 10), 100);
    }

    #[test]
    fn percent_of_empty_run_is_complete() {
        assert_eq!(percent(0, 0), 100);
    }

    #[test]
    fn percent_is_monotonic_over_chunks() {
        let total = 23;
        let mut last = 0;
        for processed in (0..=total).step_by(10).chain(std::iter::once(total)) {
            let p = percent(processed, total);
            assert!(p >= last, "{p} < {last} at processed={processed}");
            last = p;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn summary_completed_requires_full_dispatch_without_stop() {
        let done = RunSummary {
            processed: 10,
            succeeded: 9,
            failed: 1,
            total: 10,
            stopped: false,
        };
        assert!(done.completed());

        let stopped = RunSummary {
            processed: 10,
            succeeded: 10,
            failed: 0,
            total: 20,
            stopped: true,
        };
        assert!(!stopped.completed());
    }
}
