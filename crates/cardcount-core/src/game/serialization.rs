use super::dice::DiceTally;
use super::phase::PhaseTracker;
use super::session::SessionState;
use super::tracker::ResourceTracker;
use crate::belief::{BeliefMetrics, BeliefSet, HandLedger, Hypothesis, TrackerConfig};
use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackerSnapshot {
    #[serde(default)]
    pub config: TrackerConfig,
    pub hypotheses: Vec<Hypothesis>,
    #[serde(default)]
    pub ledger: HandLedger,
    #[serde(default)]
    pub phase: PhaseTracker,
    #[serde(default)]
    pub dice: DiceTally,
    #[serde(default)]
    pub current_player: Option<PlayerId>,
    #[serde(default)]
    pub metrics: BeliefMetrics,
    #[serde(default)]
    pub session: SessionState,
}

impl TrackerSnapshot {
    pub fn capture(tracker: &ResourceTracker) -> Self {
        TrackerSnapshot {
            config: tracker.config(),
            hypotheses: tracker.hypotheses().to_vec(),
            ledger: tracker.ledger().clone(),
            phase: tracker.phase_tracker().clone(),
            dice: tracker.dice().clone(),
            current_player: tracker.current_player().cloned(),
            metrics: *tracker.metrics(),
            session: SessionState::default(),
        }
    }

    /// Rebuilds the tracker. The `session` section is left for
    /// `GameSession::restore` to pick up.
    pub fn restore(self) -> ResourceTracker {
        let beliefs =
            BeliefSet::from_parts(self.hypotheses, self.ledger, self.metrics, self.config);
        ResourceTracker::from_parts(beliefs, self.phase, self.dice, self.current_player)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
