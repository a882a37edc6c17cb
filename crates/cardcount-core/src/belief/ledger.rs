//! Per-player hands kept alongside the belief set and used as the recovery
//! point when every hypothesis is eliminated.

use super::hypothesis::Hypothesis;
use crate::action::ActionEvent;
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Best-known hands updated with clamp-at-zero arithmetic.
///
/// The ledger never branches. Unknown robberies leave it untouched because
/// the moved card cannot be attributed; the belief set resynchronises it
/// whenever it collapses to a single hypothesis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandLedger {
    hands: BTreeMap<PlayerId, Hand>,
}

impl HandLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hypothesis(hypothesis: &Hypothesis) -> Self {
        Self {
            hands: hypothesis
                .iter()
                .map(|(player, hand)| (player.clone(), *hand))
                .collect(),
        }
    }

    pub fn hand(&self, player: &PlayerId) -> Hand {
        self.hands.get(player).copied().unwrap_or_default()
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.hands.keys()
    }

    /// Applies the certain part of `action`.
    pub fn observe(&mut self, action: &ActionEvent) {
        for player in action.players() {
            self.entry(player);
        }
        match action {
            ActionEvent::GotResource {
                player,
                resource,
                amount,
            } => {
                self.entry(player).add(*resource, i64::from(*amount));
            }
            ActionEvent::SpentResources { player, cost } => {
                self.shift(player, cost, &Hand::new());
            }
            ActionEvent::SimpleTrade {
                trader,
                partner,
                trader_gave,
                trader_received,
            } => {
                let gave = Hand::single(*trader_gave, 1);
                let received = Hand::single(*trader_received, 1);
                self.shift(trader, &gave, &received);
                self.shift(partner, &received, &gave);
            }
            ActionEvent::ComplexTrade {
                trader,
                partner,
                trader_gave,
                trader_received,
            } => {
                self.shift(trader, trader_gave, trader_received);
                self.shift(partner, trader_received, trader_gave);
            }
            ActionEvent::BankTrade {
                player,
                gave,
                received,
            } => {
                self.shift(player, gave, received);
            }
            ActionEvent::RobberySpecific {
                robber,
                victim,
                resource,
            } => {
                self.entry(victim).add(*resource, -1);
                self.entry(robber).add(*resource, 1);
            }
            ActionEvent::RobberyUnknown { .. } | ActionEvent::DiceRoll { .. } => {}
        }
    }

    /// Overwrites the hands of every player present in `hypothesis`.
    pub fn sync_from(&mut self, hypothesis: &Hypothesis) {
        for (player, hand) in hypothesis.iter() {
            self.hands.insert(player.clone(), *hand);
        }
    }

    pub fn to_hypothesis(&self) -> Hypothesis {
        self.hands
            .iter()
            .map(|(player, hand)| (player.clone(), *hand))
            .collect()
    }

    fn entry(&mut self, player: &PlayerId) -> &mut Hand {
        self.hands.entry(player.clone()).or_default()
    }

    fn shift(&mut self, player: &PlayerId, lose: &Hand, gain: &Hand) {
        let hand = self.entry(player);
        for resource in Resource::ALL {
            let delta = i64::from(gain.get(resource)) - i64::from(lose.get(resource));
            hand.add(resource, delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(name: &str) -> PlayerId {
        PlayerId::new(name).unwrap()
    }

    #[test]
    fn spending_clamps_instead_of_failing() {
        let mut ledger = HandLedger::new();
        ledger.observe(&ActionEvent::GotResource {
            player: pid("A"),
            resource: Resource::Brick,
            amount: 3,
        });
        ledger.observe(&ActionEvent::SpentResources {
            player: pid("A"),
            cost: Hand::from_counts([1, 1, 0, 0, 0]),
        });
        assert_eq!(ledger.hand(&pid("A")), Hand::single(Resource::Brick, 2));
    }

    #[test]
    fn unknown_robbery_only_registers_players() {
        let mut ledger = HandLedger::new();
        ledger.observe(&ActionEvent::RobberyUnknown {
            robber: pid("X"),
            victim: pid("Y"),
        });
        let players: Vec<_> = ledger.players().cloned().collect();
        assert_eq!(players, vec![pid("X"), pid("Y")]);
        assert_eq!(ledger.hand(&pid("X")), Hand::new());
    }

    #[test]
    fn trade_applies_to_both_parties() {
        let mut ledger = HandLedger::new();
        ledger.observe(&ActionEvent::ComplexTrade {
            trader: pid("A"),
            partner: pid("B"),
            trader_gave: Hand::single(Resource::Wool, 2),
            trader_received: Hand::single(Resource::Ore, 1),
        });
        assert_eq!(ledger.hand(&pid("A")), Hand::single(Resource::Ore, 1));
        assert_eq!(ledger.hand(&pid("B")), Hand::single(Resource::Wool, 2));
    }

    #[test]
    fn sync_keeps_players_missing_from_hypothesis() {
        let mut ledger = HandLedger::new();
        ledger.observe(&ActionEvent::DiceRoll {
            player: pid("C"),
            roll: 6,
        });
        let hypothesis: Hypothesis = [(pid("A"), Hand::single(Resource::Ore, 4))]
            .into_iter()
            .collect();
        ledger.sync_from(&hypothesis);
        assert_eq!(ledger.hand(&pid("A")).total(), 4);
        assert_eq!(ledger.players().count(), 2);
    }
}
