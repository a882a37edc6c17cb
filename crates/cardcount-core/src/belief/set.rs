//! Belief set manager: owns every hypothesis consistent with the observed
//! actions and replaces the whole set on each record.

use super::hypothesis::Hypothesis;
use super::ledger::HandLedger;
use super::metrics::{BeliefMetrics, RecordOutcome};
use super::query::{self, PlayerSummary, ResourceRange};
use super::transition;
use crate::action::ActionEvent;
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Tuning knobs for the belief set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Upper bound on retained hypotheses; `None` keeps every branch.
    #[serde(default)]
    pub max_hypotheses: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct BeliefSet {
    hypotheses: Vec<Hypothesis>,
    ledger: HandLedger,
    metrics: BeliefMetrics,
    config: TrackerConfig,
}

impl Default for BeliefSet {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl BeliefSet {
    /// Starts from a single empty hypothesis.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            hypotheses: vec![Hypothesis::new()],
            ledger: HandLedger::new(),
            metrics: BeliefMetrics::default(),
            config,
        }
    }

    /// Rebuilds a set from stored parts, restoring the non-empty,
    /// duplicate-free and capped guarantees if the parts violate them.
    pub fn from_parts(
        hypotheses: Vec<Hypothesis>,
        ledger: HandLedger,
        metrics: BeliefMetrics,
        config: TrackerConfig,
    ) -> Self {
        let (mut hypotheses, _) = dedup(hypotheses);
        let truncated = apply_cap(&mut hypotheses, config.max_hypotheses);
        if truncated > 0 {
            warn!(truncated, "restored hypotheses exceed the cap; dropping branches");
        }
        if hypotheses.is_empty() {
            hypotheses.push(ledger.to_hypothesis());
        }
        Self {
            hypotheses,
            ledger,
            metrics,
            config,
        }
    }

    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Swaps the tuning knobs. A tighter cap drops trailing branches now
    /// rather than on the next record.
    pub fn set_config(&mut self, config: TrackerConfig) {
        self.config = config;
        let truncated = apply_cap(&mut self.hypotheses, config.max_hypotheses);
        if truncated > 0 {
            self.metrics.truncations += 1;
            warn!(truncated, "hypothesis cap lowered; dropping branches");
        }
        if self.hypotheses.is_empty() {
            self.hypotheses.push(self.ledger.to_hypothesis());
        } else if self.hypotheses.len() == 1 {
            self.ledger.sync_from(&self.hypotheses[0]);
        }
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    pub fn ledger(&self) -> &HandLedger {
        &self.ledger
    }

    pub fn metrics(&self) -> &BeliefMetrics {
        &self.metrics
    }

    pub(crate) fn note_rejected(&mut self) {
        self.metrics.rejected += 1;
    }

    /// Drops everything back to one empty hypothesis. Metrics survive so a
    /// restarted session still reports earlier recoveries.
    pub fn reset(&mut self) {
        self.hypotheses = vec![Hypothesis::new()];
        self.ledger = HandLedger::new();
    }

    /// Replaces the set with one hypothesis holding the given starting hands.
    pub fn seed(&mut self, hands: impl IntoIterator<Item = (PlayerId, Hand)>) {
        let seeded: Hypothesis = hands.into_iter().collect();
        self.ledger = HandLedger::from_hypothesis(&seeded);
        self.hypotheses = vec![seeded];
    }

    /// Applies `action` to every hypothesis and replaces the set with the
    /// deduplicated successors. The action must already be validated.
    pub fn record(&mut self, action: &ActionEvent) -> RecordOutcome {
        let before = self.hypotheses.len();
        self.ledger.observe(action);

        let mut eliminated = 0usize;
        let mut successors = Vec::with_capacity(before);
        for hypothesis in &self.hypotheses {
            let next = transition::apply(hypothesis, action);
            if next.is_empty() {
                eliminated += 1;
            }
            successors.extend(next);
        }

        let (mut successors, duplicates) = dedup(successors);

        let truncated = apply_cap(&mut successors, self.config.max_hypotheses);
        if truncated > 0 {
            warn!(
                action = action.label(),
                truncated, "hypothesis cap reached; dropping branches"
            );
        }

        let recovered = successors.is_empty();
        if recovered {
            successors.push(self.ledger.to_hypothesis());
            warn!(
                action = action.label(),
                before, "no hypothesis survived; recovering from ledger"
            );
        } else if successors.len() == 1 {
            self.ledger.sync_from(&successors[0]);
        }

        self.hypotheses = successors;
        let outcome = RecordOutcome {
            before,
            eliminated,
            duplicates,
            truncated,
            after: self.hypotheses.len(),
            recovered,
        };
        self.metrics.absorb(&outcome);
        self.verify_totals(action);

        debug!(
            action = action.label(),
            before,
            after = outcome.after,
            eliminated,
            duplicates,
            "recorded action"
        );
        outcome
    }

    pub fn range(&self, player: &PlayerId, resource: Resource) -> ResourceRange {
        query::resource_range(&self.hypotheses, player, resource)
    }

    /// Card total for `player`. Totals are public in the game, so every
    /// hypothesis should agree; on disagreement the minimum is returned.
    pub fn total(&self, player: &PlayerId) -> u32 {
        let range = query::total_range(&self.hypotheses, player);
        if !range.certain() {
            warn!(
                player = %player,
                min = range.min,
                max = range.max,
                "card totals disagree across hypotheses"
            );
        }
        range.min
    }

    pub fn total_range(&self, player: &PlayerId) -> ResourceRange {
        query::total_range(&self.hypotheses, player)
    }

    pub fn summary(&self, player: &PlayerId) -> PlayerSummary {
        query::summarize(&self.hypotheses, player)
    }

    pub fn hypothesis_count(&self) -> usize {
        self.hypotheses.len()
    }

    /// Every player referenced by a hypothesis or by the ledger.
    pub fn players(&self) -> BTreeSet<PlayerId> {
        self.hypotheses
            .iter()
            .flat_map(|hypothesis| hypothesis.players())
            .chain(self.ledger.players())
            .cloned()
            .collect()
    }

    fn verify_totals(&mut self, action: &ActionEvent) {
        if self.hypotheses.len() < 2 {
            return;
        }
        for player in self.players() {
            let range = query::total_range(&self.hypotheses, &player);
            if !range.certain() {
                self.metrics.total_mismatches += 1;
                warn!(
                    action = action.label(),
                    player = %player,
                    min = range.min,
                    max = range.max,
                    "card totals disagree across hypotheses"
                );
            }
        }
    }
}

/// Keeps the first occurrence of each hypothesis, preserving order.
fn dedup(hypotheses: Vec<Hypothesis>) -> (Vec<Hypothesis>, usize) {
    let before = hypotheses.len();
    let mut seen = HashSet::with_capacity(before);
    let unique: Vec<Hypothesis> = hypotheses
        .into_iter()
        .filter(|hypothesis| seen.insert(hypothesis.clone()))
        .collect();
    let removed = before - unique.len();
    (unique, removed)
}

/// Truncates to `cap`, returning how many hypotheses were dropped.
fn apply_cap(hypotheses: &mut Vec<Hypothesis>, cap: Option<usize>) -> usize {
    match cap {
        Some(cap) if hypotheses.len() > cap => {
            let dropped = hypotheses.len() - cap;
            hypotheses.truncate(cap);
            dropped
        }
        _ => 0,
    }
}
