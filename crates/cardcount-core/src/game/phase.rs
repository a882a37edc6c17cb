use crate::model::player::PlayerId;
use core::fmt;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Initial placement: settlements and roads are free.
    #[default]
    Initial,
    Main,
}

impl GamePhase {
    pub const fn is_initial(self) -> bool {
        matches!(self, GamePhase::Initial)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GamePhase::Initial => "initial",
            GamePhase::Main => "main",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game phase plus the order players placed their second settlement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTracker {
    phase: GamePhase,
    turn_order: Vec<PlayerId>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Any dice roll ends initial placement. Returns whether this call
    /// performed the transition.
    pub fn on_dice_roll(&mut self) -> bool {
        if self.phase.is_initial() {
            self.phase = GamePhase::Main;
            info!("first dice roll seen; switching to main phase");
            true
        } else {
            false
        }
    }

    /// Appends `player` to the turn order unless already present.
    pub fn record_second_settlement(&mut self, player: PlayerId) -> bool {
        if self.turn_order.contains(&player) {
            return false;
        }
        info!(player = %player, position = self.turn_order.len(), "turn order extended");
        self.turn_order.push(player);
        true
    }

    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    /// Players in turn order first, then the rest in the order given.
    pub fn order_players<'a>(
        &self,
        players: impl IntoIterator<Item = &'a PlayerId>,
    ) -> Vec<PlayerId> {
        let mut ordered = self.turn_order.clone();
        for player in players {
            if !ordered.contains(player) {
                ordered.push(player.clone());
            }
        }
        ordered
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
