use super::dice::DiceTally;
use super::phase::{GamePhase, PhaseTracker};
use crate::action::{ActionError, ActionEvent};
use crate::belief::{
    BeliefMetrics, BeliefSet, HandLedger, Hypothesis, PlayerSummary, RecordOutcome, ResourceRange,
    TrackerConfig,
};
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::resource::Resource;
use std::collections::BTreeSet;
use tracing::debug;

/// The single writer over a game's belief state.
///
/// Validates each action, keeps the phase and dice statistics in step with
/// dice rolls, and forwards everything else to the belief set.
#[derive(Debug, Clone, Default)]
pub struct ResourceTracker {
    beliefs: BeliefSet,
    phase: PhaseTracker,
    dice: DiceTally,
    current_player: Option<PlayerId>,
}

impl ResourceTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            beliefs: BeliefSet::new(config),
            ..Self::default()
        }
    }

    pub(crate) fn from_parts(
        beliefs: BeliefSet,
        phase: PhaseTracker,
        dice: DiceTally,
        current_player: Option<PlayerId>,
    ) -> Self {
        Self {
            beliefs,
            phase,
            dice,
            current_player,
        }
    }

    /// Records one observed action. Malformed actions are counted and
    /// returned as errors without touching the belief set.
    pub fn record(&mut self, action: ActionEvent) -> Result<RecordOutcome, ActionError> {
        if let Err(err) = action.validate() {
            self.beliefs.note_rejected();
            debug!(action = action.label(), error = %err, "rejected action");
            return Err(err);
        }
        if let ActionEvent::DiceRoll { player, roll } = &action {
            self.phase.on_dice_roll();
            self.dice.record(*roll);
            self.current_player = Some(player.clone());
        }
        Ok(self.beliefs.record(&action))
    }

    /// Starts over with one empty hypothesis, the initial phase and a clean
    /// dice tally. The hypothesis cap is kept.
    pub fn reset_all(&mut self) {
        self.beliefs.reset();
        self.phase.reset();
        self.dice.reset();
        self.current_player = None;
    }

    pub fn seed(&mut self, hands: impl IntoIterator<Item = (PlayerId, Hand)>) {
        self.beliefs.seed(hands);
    }

    pub fn range(&self, player: &PlayerId, resource: Resource) -> ResourceRange {
        self.beliefs.range(player, resource)
    }

    pub fn total(&self, player: &PlayerId) -> u32 {
        self.beliefs.total(player)
    }

    pub fn total_range(&self, player: &PlayerId) -> ResourceRange {
        self.beliefs.total_range(player)
    }

    pub fn summary(&self, player: &PlayerId) -> PlayerSummary {
        self.beliefs.summary(player)
    }

    pub fn hypothesis_count(&self) -> usize {
        self.beliefs.hypothesis_count()
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        self.beliefs.hypotheses()
    }

    pub fn ledger(&self) -> &HandLedger {
        self.beliefs.ledger()
    }

    pub fn config(&self) -> TrackerConfig {
        self.beliefs.config()
    }

    pub fn set_config(&mut self, config: TrackerConfig) {
        self.beliefs.set_config(config);
    }

    pub fn players(&self) -> BTreeSet<PlayerId> {
        self.beliefs.players()
    }

    /// Known players in turn order first, the rest sorted by name.
    pub fn ordered_players(&self) -> Vec<PlayerId> {
        let players = self.players();
        self.phase.order_players(players.iter())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.phase()
    }

    pub fn phase_tracker(&self) -> &PhaseTracker {
        &self.phase
    }

    pub fn turn_order(&self) -> &[PlayerId] {
        self.phase.turn_order()
    }

    pub fn record_second_settlement(&mut self, player: PlayerId) -> bool {
        self.phase.record_second_settlement(player)
    }

    pub fn dice(&self) -> &DiceTally {
        &self.dice
    }

    /// Player who rolled most recently.
    pub fn current_player(&self) -> Option<&PlayerId> {
        self.current_player.as_ref()
    }

    pub fn metrics(&self) -> &BeliefMetrics {
        self.beliefs.metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(name: &str) -> PlayerId {
        PlayerId::new(name).unwrap()
    }

    #[test]
    fn malformed_action_is_rejected_and_counted() {
        let mut tracker = ResourceTracker::default();
        let err = tracker
            .record(ActionEvent::GotResource {
                player: pid("A"),
                resource: Resource::Ore,
                amount: 0,
            })
            .unwrap_err();
        assert!(matches!(err, ActionError::ZeroAmount { .. }));
        assert_eq!(tracker.metrics().rejected, 1);
        assert_eq!(tracker.metrics().records, 0);
        assert!(tracker.players().is_empty());
    }

    #[test]
    fn dice_roll_switches_phase_and_tallies() {
        let mut tracker = ResourceTracker::default();
        assert_eq!(tracker.phase(), GamePhase::Initial);
        tracker
            .record(ActionEvent::DiceRoll {
                player: pid("B"),
                roll: 6,
            })
            .unwrap();
        assert_eq!(tracker.phase(), GamePhase::Main);
        assert_eq!(tracker.dice().count(6), 1);
        assert_eq!(tracker.current_player(), Some(&pid("B")));
        assert_eq!(tracker.hypothesis_count(), 1);
    }

    #[test]
    fn ordered_players_puts_turn_order_first() {
        let mut tracker = ResourceTracker::default();
        tracker.seed([
            (pid("A"), Hand::new()),
            (pid("B"), Hand::new()),
            (pid("C"), Hand::new()),
        ]);
        tracker.record_second_settlement(pid("C"));
        tracker.record_second_settlement(pid("A"));
        assert_eq!(tracker.ordered_players(), vec![pid("C"), pid("A"), pid("B")]);
    }

    #[test]
    fn reset_all_keeps_the_cap() {
        let mut tracker = ResourceTracker::new(TrackerConfig {
            max_hypotheses: Some(8),
        });
        tracker.seed([(pid("A"), Hand::single(Resource::Wool, 3))]);
        tracker
            .record(ActionEvent::DiceRoll {
                player: pid("A"),
                roll: 9,
            })
            .unwrap();
        tracker.reset_all();
        assert_eq!(tracker.phase(), GamePhase::Initial);
        assert_eq!(tracker.dice().total(), 0);
        assert_eq!(tracker.current_player(), None);
        assert!(tracker.players().is_empty());
        assert_eq!(tracker.config().max_hypotheses, Some(8));
    }
}
