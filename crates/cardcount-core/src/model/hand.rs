use crate::model::resource::Resource;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Resource counts held by one player. Counts are unsigned, so a hand can
/// never hold a negative amount of anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "HandCounts", into = "HandCounts")]
pub struct Hand {
    counts: [u32; Resource::COUNT],
}

impl Hand {
    pub const EMPTY: Self = Self {
        counts: [0; Resource::COUNT],
    };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Counts in `Resource::ALL` order.
    pub const fn from_counts(counts: [u32; Resource::COUNT]) -> Self {
        Self { counts }
    }

    pub fn single(resource: Resource, amount: u32) -> Self {
        Self::EMPTY.with(resource, amount)
    }

    pub fn with(mut self, resource: Resource, amount: u32) -> Self {
        self.set(resource, amount);
        self
    }

    pub fn get(&self, resource: Resource) -> u32 {
        self.counts[resource.index()]
    }

    pub fn set(&mut self, resource: Resource, amount: u32) {
        self.counts[resource.index()] = amount;
    }

    /// Applies a signed delta, clamping the result at zero.
    pub fn add(&mut self, resource: Resource, delta: i64) {
        let current = i64::from(self.get(resource));
        let next = (current + delta).clamp(0, i64::from(u32::MAX));
        self.set(resource, next as u32);
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Whether this hand holds at least every card in `cost`.
    pub fn covers(&self, cost: &Hand) -> bool {
        self.counts
            .iter()
            .zip(cost.counts.iter())
            .all(|(held, needed)| held >= needed)
    }

    /// Subtracts `cost`, or returns `None` when the hand cannot pay it.
    pub fn checked_sub(&self, cost: &Hand) -> Option<Hand> {
        let mut counts = self.counts;
        for (slot, needed) in counts.iter_mut().zip(cost.counts.iter()) {
            *slot = slot.checked_sub(*needed)?;
        }
        Some(Self { counts })
    }

    pub fn saturating_sub(&self, cost: &Hand) -> Hand {
        let mut counts = self.counts;
        for (slot, needed) in counts.iter_mut().zip(cost.counts.iter()) {
            *slot = slot.saturating_sub(*needed);
        }
        Self { counts }
    }

    pub fn plus(&self, other: &Hand) -> Hand {
        let mut counts = self.counts;
        for (slot, extra) in counts.iter_mut().zip(other.counts.iter()) {
            *slot = slot.saturating_add(*extra);
        }
        Self { counts }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL
            .iter()
            .map(move |&resource| (resource, self.get(resource)))
    }

    /// Distinct resources with a non-zero count, in `Resource::ALL` order.
    pub fn held(&self) -> impl Iterator<Item = Resource> + '_ {
        self.iter()
            .filter(|(_, count)| *count > 0)
            .map(|(resource, _)| resource)
    }
}

impl FromIterator<Resource> for Hand {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut hand = Hand::new();
        for resource in iter {
            hand.add(resource, 1);
        }
        hand
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let mut first = true;
        for (resource, count) in self.iter().filter(|(_, count)| *count > 0) {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{resource}:{count}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HandCounts {
    lumber: u32,
    brick: u32,
    wool: u32,
    grain: u32,
    ore: u32,
}

impl From<HandCounts> for Hand {
    fn from(raw: HandCounts) -> Self {
        Hand::from_counts([raw.lumber, raw.brick, raw.wool, raw.grain, raw.ore])
    }
}

impl From<Hand> for HandCounts {
    fn from(hand: Hand) -> Self {
        HandCounts {
            lumber: hand.get(Resource::Lumber),
            brick: hand.get(Resource::Brick),
            wool: hand.get(Resource::Wool),
            grain: hand.get(Resource::Grain),
            ore: hand.get(Resource::Ore),
        }
    }
}
