use serde::{Deserialize, Serialize};

/// Outcome of recording one action against the belief set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// Hypotheses before the action.
    pub before: usize,
    /// Hypotheses that produced no successor.
    pub eliminated: usize,
    /// Successors dropped as structural duplicates.
    pub duplicates: usize,
    /// Successors dropped by the hypothesis cap.
    pub truncated: usize,
    /// Hypotheses after the action (and after recovery, if any).
    pub after: usize,
    /// Whether the set was rebuilt from the ledger.
    pub recovered: bool,
}

impl RecordOutcome {
    pub fn is_certain(&self) -> bool {
        self.after == 1
    }
}

/// Running counters for a tracker, surfaced so regressions in the event
/// stream (recoveries, total mismatches) stay visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefMetrics {
    pub records: u64,
    pub rejected: u64,
    pub recoveries: u64,
    pub eliminated: u64,
    pub duplicates_collapsed: u64,
    pub total_mismatches: u64,
    pub truncations: u64,
    pub peak_hypotheses: usize,
}

impl BeliefMetrics {
    pub fn absorb(&mut self, outcome: &RecordOutcome) {
        self.records += 1;
        self.eliminated += outcome.eliminated as u64;
        self.duplicates_collapsed += outcome.duplicates as u64;
        if outcome.truncated > 0 {
            self.truncations += 1;
        }
        if outcome.recovered {
            self.recoveries += 1;
        }
        self.peak_hypotheses = self.peak_hypotheses.max(outcome.after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_accumulates_counters() {
        let mut metrics = BeliefMetrics::default();
        metrics.absorb(&RecordOutcome {
            before: 1,
            eliminated: 0,
            duplicates: 0,
            truncated: 0,
            after: 3,
            recovered: false,
        });
        metrics.absorb(&RecordOutcome {
            before: 3,
            eliminated: 3,
            duplicates: 0,
            truncated: 0,
            after: 1,
            recovered: true,
        });
        assert_eq!(metrics.records, 2);
        assert_eq!(metrics.eliminated, 3);
        assert_eq!(metrics.recoveries, 1);
        assert_eq!(metrics.peak_hypotheses, 3);
    }
}
