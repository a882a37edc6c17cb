//! Belief-state tracking over hidden resource hands.
//!
//! This module is composed of:
//! - `hypothesis`: one complete guess at every player's hand.
//! - `transition`: the pure (hypothesis, action) -> successors engine.
//! - `set`: the belief set manager (dedup, recovery, hypothesis cap).
//! - `ledger`: clamp-arithmetic hands used as the recovery point.
//! - `query`: range and total read-outs.
//! - `metrics`: per-record outcomes and running counters.

mod hypothesis;
mod ledger;
mod metrics;
pub mod query;
mod set;
pub mod transition;

pub use hypothesis::Hypothesis;
pub use ledger::HandLedger;
pub use metrics::{BeliefMetrics, RecordOutcome};
pub use query::{PlayerSummary, ResourceRange};
pub use set::{BeliefSet, TrackerConfig};
