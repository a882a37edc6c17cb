use super::ActionError;
use crate::game::dice::ROLL_RANGE;
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::resource::Resource;
use serde::{Deserialize, Serialize};

/// One observed game event. Produced by log or socket adapters, consumed once
/// by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionEvent {
    GotResource {
        player: PlayerId,
        resource: Resource,
        amount: u32,
    },
    SpentResources {
        player: PlayerId,
        cost: Hand,
    },
    SimpleTrade {
        trader: PlayerId,
        partner: PlayerId,
        trader_gave: Resource,
        trader_received: Resource,
    },
    ComplexTrade {
        trader: PlayerId,
        partner: PlayerId,
        trader_gave: Hand,
        trader_received: Hand,
    },
    BankTrade {
        player: PlayerId,
        gave: Hand,
        received: Hand,
    },
    RobberyUnknown {
        robber: PlayerId,
        victim: PlayerId,
    },
    RobberySpecific {
        robber: PlayerId,
        victim: PlayerId,
        resource: Resource,
    },
    DiceRoll {
        player: PlayerId,
        roll: u8,
    },
}

impl ActionEvent {
    pub const fn label(&self) -> &'static str {
        match self {
            ActionEvent::GotResource { .. } => "got_resource",
            ActionEvent::SpentResources { .. } => "spent_resources",
            ActionEvent::SimpleTrade { .. } => "simple_trade",
            ActionEvent::ComplexTrade { .. } => "complex_trade",
            ActionEvent::BankTrade { .. } => "bank_trade",
            ActionEvent::RobberyUnknown { .. } => "robbery_unknown",
            ActionEvent::RobberySpecific { .. } => "robbery_specific",
            ActionEvent::DiceRoll { .. } => "dice_roll",
        }
    }

    /// Rejects events that could never describe a real game action.
    pub fn validate(&self) -> Result<(), ActionError> {
        let action = self.label();
        match self {
            ActionEvent::GotResource { amount, .. } => {
                if *amount == 0 {
                    return Err(ActionError::ZeroAmount { action });
                }
            }
            ActionEvent::SpentResources { cost, .. } => {
                require_cards(action, "cost", cost)?;
            }
            ActionEvent::SimpleTrade {
                trader, partner, ..
            } => {
                require_distinct(action, trader, partner)?;
            }
            ActionEvent::ComplexTrade {
                trader,
                partner,
                trader_gave,
                trader_received,
            } => {
                require_distinct(action, trader, partner)?;
                require_cards(action, "trader_gave", trader_gave)?;
                require_cards(action, "trader_received", trader_received)?;
            }
            ActionEvent::BankTrade { gave, received, .. } => {
                require_cards(action, "gave", gave)?;
                require_cards(action, "received", received)?;
            }
            ActionEvent::RobberyUnknown { robber, victim }
            | ActionEvent::RobberySpecific { robber, victim, .. } => {
                require_distinct(action, robber, victim)?;
            }
            ActionEvent::DiceRoll { roll, .. } => {
                if !ROLL_RANGE.contains(roll) {
                    return Err(ActionError::InvalidRoll(*roll));
                }
            }
        }
        Ok(())
    }

    /// Players referenced by this event, acting player first.
    pub fn players(&self) -> Vec<&PlayerId> {
        match self {
            ActionEvent::GotResource { player, .. }
            | ActionEvent::SpentResources { player, .. }
            | ActionEvent::BankTrade { player, .. }
            | ActionEvent::DiceRoll { player, .. } => vec![player],
            ActionEvent::SimpleTrade {
                trader, partner, ..
            }
            | ActionEvent::ComplexTrade {
                trader, partner, ..
            } => vec![trader, partner],
            ActionEvent::RobberyUnknown { robber, victim }
            | ActionEvent::RobberySpecific { robber, victim, .. } => vec![robber, victim],
        }
    }

    /// Rebuilds the event with every player id passed through `f`.
    pub fn try_map_players<E>(
        self,
        mut f: impl FnMut(PlayerId) -> Result<PlayerId, E>,
    ) -> Result<Self, E> {
        Ok(match self {
            ActionEvent::GotResource {
                player,
                resource,
                amount,
            } => ActionEvent::GotResource {
                player: f(player)?,
                resource,
                amount,
            },
            ActionEvent::SpentResources { player, cost } => ActionEvent::SpentResources {
                player: f(player)?,
                cost,
            },
            ActionEvent::SimpleTrade {
                trader,
                partner,
                trader_gave,
                trader_received,
            } => ActionEvent::SimpleTrade {
                trader: f(trader)?,
                partner: f(partner)?,
                trader_gave,
                trader_received,
            },
            ActionEvent::ComplexTrade {
                trader,
                partner,
                trader_gave,
                trader_received,
            } => ActionEvent::ComplexTrade {
                trader: f(trader)?,
                partner: f(partner)?,
                trader_gave,
                trader_received,
            },
            ActionEvent::BankTrade {
                player,
                gave,
                received,
            } => ActionEvent::BankTrade {
                player: f(player)?,
                gave,
                received,
            },
            ActionEvent::RobberyUnknown { robber, victim } => ActionEvent::RobberyUnknown {
                robber: f(robber)?,
                victim: f(victim)?,
            },
            ActionEvent::RobberySpecific {
                robber,
                victim,
                resource,
            } => ActionEvent::RobberySpecific {
                robber: f(robber)?,
                victim: f(victim)?,
                resource,
            },
            ActionEvent::DiceRoll { player, roll } => ActionEvent::DiceRoll {
                player: f(player)?,
                roll,
            },
        })
    }
}

fn require_cards(
    action: &'static str,
    field: &'static str,
    hand: &Hand,
) -> Result<(), ActionError> {
    if hand.is_empty() {
        Err(ActionError::EmptyHand { action, field })
    } else {
        Ok(())
    }
}

fn require_distinct(
    action: &'static str,
    a: &PlayerId,
    b: &PlayerId,
) -> Result<(), ActionError> {
    if a == b {
        Err(ActionError::SelfInteraction {
            action,
            player: a.clone(),
        })
    } else {
        Ok(())
    }
}
