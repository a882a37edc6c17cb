//! Read-outs over a slice of hypotheses.

use super::hypothesis::Hypothesis;
use crate::model::player::PlayerId;
use crate::model::resource::Resource;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Inclusive bounds of a count across the belief set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRange {
    pub min: u32,
    pub max: u32,
}

impl ResourceRange {
    pub const fn exact(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub const fn certain(&self) -> bool {
        self.min == self.max
    }

    pub const fn value(&self) -> Option<u32> {
        if self.certain() { Some(self.min) } else { None }
    }

    fn from_values(values: impl Iterator<Item = u32>) -> Self {
        values
            .fold(None, |acc: Option<Self>, value| match acc {
                None => Some(Self::exact(value)),
                Some(range) => Some(Self {
                    min: range.min.min(value),
                    max: range.max.max(value),
                }),
            })
            .unwrap_or(Self::exact(0))
    }
}

impl fmt::Display for ResourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.certain() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// Everything a table row needs for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerId,
    pub resources: [ResourceRange; Resource::COUNT],
    pub total: ResourceRange,
}

impl PlayerSummary {
    pub fn range(&self, resource: Resource) -> ResourceRange {
        self.resources[resource.index()]
    }

    pub fn is_certain(&self) -> bool {
        self.resources.iter().all(ResourceRange::certain)
    }
}

pub fn resource_range(
    hypotheses: &[Hypothesis],
    player: &PlayerId,
    resource: Resource,
) -> ResourceRange {
    ResourceRange::from_values(
        hypotheses
            .iter()
            .map(|hypothesis| hypothesis.hand(player).get(resource)),
    )
}

/// Bounds of the card total; collapses to one value whenever the set is sound.
pub fn total_range(hypotheses: &[Hypothesis], player: &PlayerId) -> ResourceRange {
    ResourceRange::from_values(
        hypotheses
            .iter()
            .map(|hypothesis| hypothesis.hand(player).total()),
    )
}

pub fn summarize(hypotheses: &[Hypothesis], player: &PlayerId) -> PlayerSummary {
    PlayerSummary {
        player: player.clone(),
        resources: Resource::ALL.map(|resource| resource_range(hypotheses, player, resource)),
        total: total_range(hypotheses, player),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hand::Hand;

    fn pid(name: &str) -> PlayerId {
        PlayerId::new(name).unwrap()
    }

    fn set(hands: &[[u32; 5]]) -> Vec<Hypothesis> {
        hands
            .iter()
            .map(|counts| [(pid("A"), Hand::from_counts(*counts))].into_iter().collect())
            .collect()
    }

    #[test]
    fn range_spans_all_hypotheses() {
        let hypotheses = set(&[[0, 1, 2, 0, 0], [0, 0, 3, 0, 0]]);
        let brick = resource_range(&hypotheses, &pid("A"), Resource::Brick);
        assert_eq!(brick, ResourceRange { min: 0, max: 1 });
        assert!(!brick.certain());
        assert_eq!(brick.value(), None);
        assert_eq!(brick.to_string(), "0-1");
        assert_eq!(total_range(&hypotheses, &pid("A")), ResourceRange::exact(3));
    }

    #[test]
    fn unknown_player_reads_as_certain_zero() {
        let hypotheses = set(&[[1, 1, 1, 1, 1]]);
        let range = resource_range(&hypotheses, &pid("Z"), Resource::Ore);
        assert_eq!(range, ResourceRange::exact(0));
        assert_eq!(resource_range(&[], &pid("A"), Resource::Ore), ResourceRange::exact(0));
    }

    #[test]
    fn summary_reports_per_resource_certainty() {
        let hypotheses = set(&[[0, 1, 2, 0, 0], [0, 0, 3, 0, 0]]);
        let summary = summarize(&hypotheses, &pid("A"));
        assert!(!summary.is_certain());
        assert!(summary.range(Resource::Lumber).certain());
        assert_eq!(summary.range(Resource::Wool), ResourceRange { min: 2, max: 3 });
        assert_eq!(summary.total.value(), Some(3));
    }
}
