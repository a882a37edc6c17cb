//! Pure transition engine: maps one hypothesis and one action to every
//! successor hypothesis consistent with the observation.

use super::hypothesis::Hypothesis;
use crate::action::ActionEvent;
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::resource::Resource;

/// Successors of `hypothesis` under `action`.
///
/// An empty result means the hypothesis could not have produced the observed
/// action and is eliminated. Only `RobberyUnknown` ever yields more than one
/// successor.
pub fn apply(hypothesis: &Hypothesis, action: &ActionEvent) -> Vec<Hypothesis> {
    match action {
        ActionEvent::GotResource {
            player,
            resource,
            amount,
        } => {
            let mut next = hypothesis.clone();
            next.hand_mut(player).add(*resource, i64::from(*amount));
            vec![next]
        }
        ActionEvent::SpentResources { player, cost } => {
            pay(hypothesis, player, cost).into_iter().collect()
        }
        ActionEvent::SimpleTrade {
            trader,
            partner,
            trader_gave,
            trader_received,
        } => exchange(
            hypothesis,
            trader,
            partner,
            &Hand::single(*trader_gave, 1),
            &Hand::single(*trader_received, 1),
        )
        .into_iter()
        .collect(),
        ActionEvent::ComplexTrade {
            trader,
            partner,
            trader_gave,
            trader_received,
        } => exchange(hypothesis, trader, partner, trader_gave, trader_received)
            .into_iter()
            .collect(),
        ActionEvent::BankTrade {
            player,
            gave,
            received,
        } => pay(hypothesis, player, gave)
            .map(|mut next| {
                let hand = next.hand_mut(player);
                *hand = hand.plus(received);
                next
            })
            .into_iter()
            .collect(),
        ActionEvent::RobberyUnknown { robber, victim } => {
            let victim_hand = hypothesis.hand(victim);
            victim_hand
                .held()
                .filter_map(|resource| steal(hypothesis, robber, victim, resource))
                .collect()
        }
        ActionEvent::RobberySpecific {
            robber,
            victim,
            resource,
        } => steal(hypothesis, robber, victim, *resource)
            .into_iter()
            .collect(),
        ActionEvent::DiceRoll { .. } => vec![hypothesis.clone()],
    }
}

/// Whether `player` holds every card in `cost` under `hypothesis`.
pub fn can_afford(hypothesis: &Hypothesis, player: &PlayerId, cost: &Hand) -> bool {
    hypothesis.hand(player).covers(cost)
}

fn pay(hypothesis: &Hypothesis, player: &PlayerId, cost: &Hand) -> Option<Hypothesis> {
    let remaining = hypothesis.hand(player).checked_sub(cost)?;
    let mut next = hypothesis.clone();
    *next.hand_mut(player) = remaining;
    Some(next)
}

fn exchange(
    hypothesis: &Hypothesis,
    trader: &PlayerId,
    partner: &PlayerId,
    trader_gave: &Hand,
    trader_received: &Hand,
) -> Option<Hypothesis> {
    let trader_left = hypothesis.hand(trader).checked_sub(trader_gave)?;
    let partner_left = hypothesis.hand(partner).checked_sub(trader_received)?;
    let mut next = hypothesis.clone();
    *next.hand_mut(trader) = trader_left.plus(trader_received);
    *next.hand_mut(partner) = partner_left.plus(trader_gave);
    Some(next)
}

fn steal(
    hypothesis: &Hypothesis,
    robber: &PlayerId,
    victim: &PlayerId,
    resource: Resource,
) -> Option<Hypothesis> {
    let card = Hand::single(resource, 1);
    let victim_left = hypothesis.hand(victim).checked_sub(&card)?;
    let mut next = hypothesis.clone();
    *next.hand_mut(victim) = victim_left;
    next.hand_mut(robber).add(resource, 1);
    Some(next)
}
