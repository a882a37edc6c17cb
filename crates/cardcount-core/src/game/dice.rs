use core::fmt;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const ROLL_RANGE: RangeInclusive<u8> = 2..=12;

const COLD_RATIO: f64 = 0.75;
const HOT_RATIO: f64 = 1.25;

/// How a sum is rolling relative to two fair dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollHeat {
    Cold,
    Even,
    Hot,
}

impl fmt::Display for RollHeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RollHeat::Cold => "cold",
            RollHeat::Even => "even",
            RollHeat::Hot => "hot",
        };
        f.write_str(label)
    }
}

/// Histogram of two-dice sums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceTally {
    counts: [u32; 13],
    total: u32,
}

impl DiceTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts `sum`; returns false for values two dice cannot produce.
    pub fn record(&mut self, sum: u8) -> bool {
        if !ROLL_RANGE.contains(&sum) {
            return false;
        }
        self.counts[usize::from(sum)] += 1;
        self.total += 1;
        true
    }

    pub fn count(&self, sum: u8) -> u32 {
        if ROLL_RANGE.contains(&sum) {
            self.counts[usize::from(sum)]
        } else {
            0
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Observed fraction of rolls that landed on `sum`.
    pub fn share(&self, sum: u8) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(f64::from(self.count(sum)) / f64::from(self.total))
    }

    /// Probability of `sum` with two fair six-sided dice.
    pub fn expected_probability(sum: u8) -> f64 {
        if !ROLL_RANGE.contains(&sum) {
            return 0.0;
        }
        let ways = 6 - (7 - i32::from(sum)).abs();
        f64::from(ways) / 36.0
    }

    /// Observed share divided by expected probability.
    pub fn ratio(&self, sum: u8) -> Option<f64> {
        let expected = Self::expected_probability(sum);
        if expected == 0.0 {
            return None;
        }
        self.share(sum).map(|share| share / expected)
    }

    pub fn heat(&self, sum: u8) -> Option<RollHeat> {
        self.ratio(sum).map(|ratio| {
            if ratio < COLD_RATIO {
                RollHeat::Cold
            } else if ratio > HOT_RATIO {
                RollHeat::Hot
            } else {
                RollHeat::Even
            }
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        ROLL_RANGE.map(move |sum| (sum, self.count(sum)))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_probabilities_sum_to_one() {
        let sum: f64 = ROLL_RANGE.map(DiceTally::expected_probability).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((DiceTally::expected_probability(7) - 6.0 / 36.0).abs() < 1e-12);
        assert_eq!(DiceTally::expected_probability(1), 0.0);
    }

    #[test]
    fn record_rejects_impossible_sums() {
        let mut tally = DiceTally::new();
        assert!(!tally.record(1));
        assert!(!tally.record(13));
        assert!(tally.record(8));
        assert_eq!(tally.total(), 1);
        assert_eq!(tally.count(8), 1);
    }

    #[test]
    fn heat_classifies_against_expectation() {
        let mut tally = DiceTally::new();
        for _ in 0..4 {
            tally.record(2);
        }
        for _ in 0..4 {
            tally.record(7);
        }
        assert_eq!(tally.share(7), Some(0.5));
        assert_eq!(tally.heat(2), Some(RollHeat::Hot));
        assert_eq!(tally.heat(8), Some(RollHeat::Cold));
        assert_eq!(DiceTally::new().heat(7), None);
    }

    #[test]
    fn iter_covers_every_sum() {
        let tally = DiceTally::new();
        let sums: Vec<u8> = tally.iter().map(|(sum, _)| sum).collect();
        assert_eq!(sums, (2..=12).collect::<Vec<u8>>());
    }
}
