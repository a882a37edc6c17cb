use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One fully specified guess at every tracked player's hand.
///
/// Backed by an ordered map so that structural equality and hashing do not
/// depend on the order players were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hypothesis {
    hands: BTreeMap<PlayerId, Hand>,
}

impl Hypothesis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand for `player`; unseen players hold nothing.
    pub fn hand(&self, player: &PlayerId) -> Hand {
        self.hands.get(player).copied().unwrap_or_default()
    }

    pub fn get(&self, player: &PlayerId) -> Option<&Hand> {
        self.hands.get(player)
    }

    /// Mutable hand for `player`, creating an empty one on first reference.
    pub fn hand_mut(&mut self, player: &PlayerId) -> &mut Hand {
        self.hands.entry(player.clone()).or_default()
    }

    pub fn contains_player(&self, player: &PlayerId) -> bool {
        self.hands.contains_key(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.hands.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &Hand)> {
        self.hands.iter()
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

impl FromIterator<(PlayerId, Hand)> for Hypothesis {
    fn from_iter<I: IntoIterator<Item = (PlayerId, Hand)>>(iter: I) -> Self {
        Self {
            hands: iter.into_iter().collect(),
        }
    }
}
