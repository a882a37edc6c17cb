use crate::model::player::PlayerId;
use thiserror::Error;

/// Reasons an action (or one of its fields) is rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("player id must not be blank")]
    BlankPlayer,
    #[error("unknown resource '{0}'")]
    UnknownResource(String),
    #[error("{action}: amount must be greater than zero")]
    ZeroAmount { action: &'static str },
    #[error("{action}: {field} must contain at least one card")]
    EmptyHand {
        action: &'static str,
        field: &'static str,
    },
    #[error("{action}: {player} cannot be on both sides")]
    SelfInteraction {
        action: &'static str,
        player: PlayerId,
    },
    #[error("dice roll {0} is outside 2..=12")]
    InvalidRoll(u8),
}
