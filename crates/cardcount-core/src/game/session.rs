//! Calling layer between event adapters and the tracker: build costs,
//! free initial placements, road building credits and identity aliases.

use super::identity::IdentityResolver;
use super::serialization::TrackerSnapshot;
use super::tracker::ResourceTracker;
use crate::action::{ActionError, ActionEvent};
use crate::belief::{RecordOutcome, TrackerConfig};
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::resource::Resource;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_PLAYER_COUNT: u8 = 4;
const ROAD_BUILDING_CREDITS: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("player alias '{0}' used but no local player is configured")]
    UnresolvedIdentity(String),
    #[error(transparent)]
    Action(#[from] ActionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildKind {
    Road,
    Settlement,
    City,
    DevelopmentCard,
}

impl BuildKind {
    pub const ALL: [BuildKind; 4] = [
        BuildKind::Road,
        BuildKind::Settlement,
        BuildKind::City,
        BuildKind::DevelopmentCard,
    ];

    pub fn cost(self) -> Hand {
        match self {
            BuildKind::Road => Hand::new()
                .with(Resource::Lumber, 1)
                .with(Resource::Brick, 1),
            BuildKind::Settlement => Hand::from_counts([1, 1, 1, 1, 0]),
            BuildKind::City => Hand::new().with(Resource::Grain, 2).with(Resource::Ore, 3),
            BuildKind::DevelopmentCard => Hand::new()
                .with(Resource::Wool, 1)
                .with(Resource::Grain, 1)
                .with(Resource::Ore, 1),
        }
    }

    /// Settlements and roads cost nothing during initial placement.
    pub const fn free_while_placing(self) -> bool {
        matches!(self, BuildKind::Road | BuildKind::Settlement)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BuildKind::Road => "road",
            BuildKind::Settlement => "settlement",
            BuildKind::City => "city",
            BuildKind::DevelopmentCard => "development_card",
        }
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an adapter observed, before build costs and aliases are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum SessionEvent {
    Action(ActionEvent),
    Built { player: PlayerId, kind: BuildKind },
    PlayedRoadBuilding { player: PlayerId },
    Discarded { player: PlayerId, cards: Hand },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Recorded(RecordOutcome),
    FreePlacement { turn_order_extended: bool },
    FreeRoad { remaining: u8 },
    RoadCreditsGranted { credits: u8 },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub local_player: Option<PlayerId>,
    #[serde(default = "default_player_count")]
    pub player_count: u8,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            local_player: None,
            player_count: DEFAULT_PLAYER_COUNT,
            tracker: TrackerConfig::default(),
        }
    }
}

fn default_player_count() -> u8 {
    DEFAULT_PLAYER_COUNT
}

/// Session bookkeeping that lives outside the belief state: settlements
/// placed so far and unspent road building credits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub placements: u32,
    #[serde(default)]
    pub road_credits: BTreeMap<PlayerId, u8>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    tracker: ResourceTracker,
    resolver: IdentityResolver,
    player_count: u8,
    state: SessionState,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let tracker = ResourceTracker::new(config.tracker);
        Self::with_tracker(config, tracker)
    }

    /// Wraps an existing tracker with fresh session bookkeeping. The
    /// configured tracker settings replace the tracker's own.
    pub fn with_tracker(config: SessionConfig, tracker: ResourceTracker) -> Self {
        Self::with_state(config, tracker, SessionState::default())
    }

    /// Resumes a session captured by [`GameSession::snapshot`].
    pub fn restore(config: SessionConfig, mut snapshot: TrackerSnapshot) -> Self {
        let state = std::mem::take(&mut snapshot.session);
        let stored = snapshot.config;
        if stored != config.tracker {
            info!(
                stored_cap = ?stored.max_hypotheses,
                configured_cap = ?config.tracker.max_hypotheses,
                "snapshot tracker settings replaced by configuration"
            );
        }
        Self::with_state(config, snapshot.restore(), state)
    }

    fn with_state(
        config: SessionConfig,
        mut tracker: ResourceTracker,
        state: SessionState,
    ) -> Self {
        tracker.set_config(config.tracker);
        Self {
            tracker,
            resolver: IdentityResolver::new(config.local_player),
            player_count: config.player_count,
            state,
        }
    }

    /// Captures the tracker together with placements and road credits.
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            session: self.state.clone(),
            ..TrackerSnapshot::capture(&self.tracker)
        }
    }

    pub fn tracker(&self) -> &ResourceTracker {
        &self.tracker
    }

    pub fn into_tracker(self) -> ResourceTracker {
        self.tracker
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    pub fn road_credits(&self, player: &PlayerId) -> u8 {
        self.state.road_credits.get(player).copied().unwrap_or(0)
    }

    pub fn placements(&self) -> u32 {
        self.state.placements
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Seeds starting hands, resolving aliases in the keys.
    pub fn seed(
        &mut self,
        hands: impl IntoIterator<Item = (PlayerId, Hand)>,
    ) -> Result<(), SessionError> {
        let resolved = hands
            .into_iter()
            .map(|(player, hand)| self.resolver.resolve(player).map(|player| (player, hand)))
            .collect::<Result<Vec<_>, _>>()?;
        self.tracker.seed(resolved);
        Ok(())
    }

    pub fn apply(&mut self, event: SessionEvent) -> Result<SessionOutcome, SessionError> {
        match event {
            SessionEvent::Action(action) => {
                let resolver = &self.resolver;
                let action = action.try_map_players(|id| resolver.resolve(id))?;
                self.record(action)
            }
            SessionEvent::Built { player, kind } => {
                let player = self.resolver.resolve(player)?;
                self.built(player, kind)
            }
            SessionEvent::PlayedRoadBuilding { player } => {
                let player = self.resolver.resolve(player)?;
                debug!(player = %player, "road building credits granted");
                self.state.road_credits.insert(player, ROAD_BUILDING_CREDITS);
                Ok(SessionOutcome::RoadCreditsGranted {
                    credits: ROAD_BUILDING_CREDITS,
                })
            }
            SessionEvent::Discarded { player, cards } => {
                let player = self.resolver.resolve(player)?;
                self.record(ActionEvent::SpentResources {
                    player,
                    cost: cards,
                })
            }
            SessionEvent::Reset => {
                self.tracker.reset_all();
                self.state = SessionState::default();
                Ok(SessionOutcome::Reset)
            }
        }
    }

    fn built(&mut self, player: PlayerId, kind: BuildKind) -> Result<SessionOutcome, SessionError> {
        if self.tracker.phase().is_initial() && kind.free_while_placing() {
            let mut turn_order_extended = false;
            if kind == BuildKind::Settlement {
                self.state.placements += 1;
                if self.state.placements > u32::from(self.player_count) {
                    turn_order_extended = self.tracker.record_second_settlement(player);
                }
            }
            return Ok(SessionOutcome::FreePlacement {
                turn_order_extended,
            });
        }

        if kind == BuildKind::Road {
            if let Some(credits) = self.state.road_credits.get_mut(&player) {
                *credits -= 1;
                let remaining = *credits;
                if remaining == 0 {
                    self.state.road_credits.remove(&player);
                }
                return Ok(SessionOutcome::FreeRoad { remaining });
            }
        }

        self.record(ActionEvent::SpentResources {
            player,
            cost: kind.cost(),
        })
    }

    fn record(&mut self, action: ActionEvent) -> Result<SessionOutcome, SessionError> {
        Ok(SessionOutcome::Recorded(self.tracker.record(action)?))
    }
}
