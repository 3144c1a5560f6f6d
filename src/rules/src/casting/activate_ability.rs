// Copyright © manastorm 2025-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use data::card_definitions::ability_definition::{
    AbilityCost, AbilityDefinition, AbilityTiming, ActivatedAbilityDefinition,
};
use data::card_states::card_state::TappedState;
use data::card_states::counters::CounterKind;
use data::card_states::stack_ability_state::{StackAbilityKind, StackAbilityState};
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{
    AbilityNumber, CardId, PlayerName, Source, StackAbilityId, Zone,
};
use data::events::game_event::GameEvent;
use data::game_states::game_state::GameState;
use data::game_states::state_based_event::StateBasedEvent;
use data::printed_cards::printed_card::TransformTriggerKind;
use data::game_states::pending_decision::{PendingCast, PendingCastKind};
use data::player_states::player_state::PlayerQueries;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::Outcome;

use crate::casting::{cast_spell, mana_payment};
use crate::effect_execution::{self, ExecutionContext};
use crate::mutations::{abilities as ability_registry, move_card, permanents, players};
use crate::queries::{card_queries, targets};

/// The activated abilities of a permanent's current face, including those
/// granted by class levels, indexed by ability number.
pub fn activated_abilities(
    game: &GameState,
    id: CardId,
) -> Vec<(AbilityNumber, ActivatedAbilityDefinition)> {
    let Some(card) = game.card(id) else {
        return vec![];
    };
    let face = card.current_face();
    let mut result = vec![];
    for (number, ability) in face.abilities.iter().enumerate() {
        if let AbilityDefinition::Activated(activated) = ability {
            result.push((AbilityNumber(number), activated.clone()));
        }
    }
    let base = face.abilities.len();
    let mut offset = 0;
    for level in &face.class_levels {
        if u64::from(level.level) <= u64::from(card.class_level) {
            for ability in &level.abilities {
                if let AbilityDefinition::Activated(activated) = ability {
                    result.push((AbilityNumber(base + offset), activated.clone()));
                }
                offset += 1;
            }
        }
    }
    result
}

fn find_ability(
    game: &GameState,
    id: CardId,
    number: AbilityNumber,
) -> Option<ActivatedAbilityDefinition> {
    activated_abilities(game, id)
        .into_iter()
        .find(|(n, _)| *n == number)
        .map(|(_, ability)| ability)
}

/// True if the player can activate the numbered ability of this permanent:
/// they control it, the timing is legal, and every cost is payable.
pub fn can_activate(
    game: &GameState,
    player: PlayerName,
    id: CardId,
    number: AbilityNumber,
) -> bool {
    let Some(card) = game.card(id) else {
        return false;
    };
    if card.zone != Zone::Battlefield || card.controller != player {
        return false;
    }
    let Some(ability) = find_ability(game, id, number) else {
        return false;
    };

    let instant_speed = ability.timing == AbilityTiming::Instant;
    // Mana abilities may be activated even while split second restricts
    // other actions.
    if ability.is_mana_ability {
        if game.priority != player
            || game.pending_decision.is_some()
            || game.pending_cast.is_some()
        {
            return false;
        }
    } else if !cast_spell::timing_legal(game, player, instant_speed) {
        return false;
    }

    costs_payable(game, player, id, &ability)
        && targets_available(game, player, id, &ability)
}

fn costs_payable(
    game: &GameState,
    player: PlayerName,
    id: CardId,
    ability: &ActivatedAbilityDefinition,
) -> bool {
    for cost in &ability.costs {
        let payable = match cost {
            AbilityCost::Mana(mana) => mana_payment::can_pay(game, player, mana),
            AbilityCost::Tap => {
                let untapped = game
                    .card(id)
                    .is_some_and(|card| card.tapped_state == TappedState::Untapped);
                let sick = card_queries::is_creature(game, id)
                    && card_queries::has_summoning_sickness(game, id);
                untapped && !sick
            }
            AbilityCost::PayLife(amount) => {
                game.player(player).life > *amount as i64
            }
            AbilityCost::SacrificeSelf => true,
            AbilityCost::SacrificePermanent(filter) => game
                .battlefield(player)
                .iter()
                .any(|&other| card_queries::matches_filter(game, other, filter, player, Some(id))),
            AbilityCost::DiscardCard => !game.hand(player).is_empty(),
            AbilityCost::RemoveCounters(kind, count) => {
                game.card(id).is_some_and(|card| card.counters.count(*kind) >= *count)
            }
        };
        if !payable {
            return false;
        }
    }
    true
}

fn targets_available(
    game: &GameState,
    player: PlayerName,
    id: CardId,
    ability: &ActivatedAbilityDefinition,
) -> bool {
    ability.effects.iter().all(|effect| match effect.target_spec() {
        Some(spec) => !targets::candidates(game, spec, player, id).is_empty(),
        None => true,
    })
}

/// Begins activating an ability. Mana abilities resolve immediately;
/// other abilities go through the pending-cast choice flow and then onto
/// the stack.
#[instrument(level = "debug", skip(game))]
pub fn begin(
    game: &mut GameState,
    player: PlayerName,
    id: CardId,
    number: AbilityNumber,
) -> Outcome {
    let Some(ability) = find_ability(game, id, number) else {
        return outcome::OK;
    };

    if ability.is_mana_ability {
        // > 605.3b. A mana ability doesn't go on the stack; it resolves
        // > immediately.
        // <https://yawgatog.com/resources/magic-rules/#R6053b>
        pay_costs(game, player, id, &ability)?;
        let mut context = ExecutionContext::new(id, player, vec![], None);
        effect_execution::execute(game, &mut context, &ability.effects)?;
        game.this_turn.counters.get_mut(player).abilities_activated += 1;
        return outcome::OK;
    }

    cast_spell::begin(game, player, id, PendingCastKind::Ability(number))
}

/// True if the player can activate the indexed loyalty ability: sorcery
/// timing, once per turn per planeswalker, and enough loyalty to pay a
/// minus cost.
pub fn can_activate_loyalty(
    game: &GameState,
    player: PlayerName,
    id: CardId,
    index: usize,
) -> bool {
    let Some(card) = game.card(id) else {
        return false;
    };
    if card.zone != Zone::Battlefield
        || card.controller != player
        || card.loyalty_activated_this_turn
    {
        return false;
    }
    let Some(ability) = card.current_face().planeswalker_abilities.get(index) else {
        return false;
    };
    if !cast_spell::timing_legal(game, player, false) {
        return false;
    }
    if ability.loyalty_change < 0 {
        let loyalty = card.counters.count(CounterKind::Loyalty);
        if loyalty < ability.loyalty_change.unsigned_abs() {
            return false;
        }
    }
    ability.effects.iter().all(|effect| match effect.target_spec() {
        Some(spec) => !targets::candidates(game, spec, player, id).is_empty(),
        None => true,
    })
}

/// Begins activating a planeswalker loyalty ability.
#[instrument(level = "debug", skip(game))]
pub fn begin_loyalty(
    game: &mut GameState,
    player: PlayerName,
    id: CardId,
    index: usize,
) -> Outcome {
    cast_spell::begin(game, player, id, PendingCastKind::LoyaltyAbility(index))
}

/// Completes an ability activation from the pending-cast flow: pays costs
/// and pushes the ability onto the stack.
pub fn finish(game: &mut GameState, pending: PendingCast) -> Outcome {
    let player = pending.controller;
    let id = pending.card;

    let (effects, number) = match pending.kind {
        PendingCastKind::Ability(number) => {
            let Some(ability) = find_ability(game, id, number) else {
                return outcome::OK;
            };
            pay_costs(game, player, id, &ability)?;
            (ability.effects, number)
        }
        PendingCastKind::LoyaltyAbility(index) => {
            let Some(ability) =
                game.card(id).and_then(|card| {
                    card.current_face().planeswalker_abilities.get(index).cloned()
                })
            else {
                return outcome::OK;
            };
            pay_loyalty(game, id, ability.loyalty_change)?;
            (ability.effects, AbilityNumber(index))
        }
        _ => return outcome::OK,
    };

    let source_object_id = game.card(id).map(|card| card.object_id).unwrap_or_default();
    debug!(?player, ?id, "Ability activated, now on the stack");
    game.zones.push_stack_ability(StackAbilityState {
        id: StackAbilityId::default(),
        kind: StackAbilityKind::Activated,
        source: id,
        source_object_id,
        ability_number: number,
        controller: player,
        targets: pending.targets,
        effects,
        chosen_x: pending.chosen_x,
    });

    game.this_turn.counters.get_mut(player).abilities_activated += 1;
    game.priority = game.turn.active_player;
    game.clear_passed();
    outcome::OK
}

fn pay_costs(
    game: &mut GameState,
    player: PlayerName,
    id: CardId,
    ability: &ActivatedAbilityDefinition,
) -> Outcome {
    for cost in &ability.costs {
        match cost {
            AbilityCost::Mana(mana) => {
                let Some(payment) = mana_payment::plan(game, player, mana, None) else {
                    return outcome::OK;
                };
                mana_payment::execute(game, Source::Card(id), player, &payment)?;
            }
            AbilityCost::Tap => {
                permanents::tap(game, Source::Card(id), id)?;
            }
            AbilityCost::PayLife(amount) => {
                players::lose_life(game, Source::Card(id), player, *amount as i64)?;
            }
            AbilityCost::SacrificeSelf => {
                permanents::sacrifice(game, Source::Card(id), id)?;
            }
            AbilityCost::SacrificePermanent(filter) => {
                let victim = game.battlefield(player).iter().copied().find(|&other| {
                    card_queries::matches_filter(game, other, filter, player, Some(id))
                });
                if let Some(victim) = victim {
                    permanents::sacrifice(game, Source::Card(id), victim)?;
                }
            }
            AbilityCost::DiscardCard => {
                let discarded = game.hand(player).iter().next().copied();
                if let Some(discarded) = discarded {
                    move_card::run(game, Source::Card(id), discarded, Zone::Graveyard)?;
                }
            }
            AbilityCost::RemoveCounters(kind, count) => {
                if let Some(card) = game.card_mut(id) {
                    card.counters.remove(*kind, *count);
                }
                game.effects.invalidate_cache();
            }
        }
    }
    outcome::OK
}

fn pay_loyalty(game: &mut GameState, id: CardId, change: i64) -> Outcome {
    if let Some(card) = game.card_mut(id) {
        if change >= 0 {
            card.counters.add(CounterKind::Loyalty, change as u64);
        } else {
            card.counters.remove(CounterKind::Loyalty, change.unsigned_abs());
        }
        card.loyalty_activated_this_turn = true;
    }
    if change < 0 {
        game.add_state_based_event(StateBasedEvent::PlaneswalkerLostLoyalty(id));
    }
    outcome::OK
}

/// True if the player can pay to advance this Class card to its next
/// level.
pub fn can_level_up(game: &GameState, player: PlayerName, id: CardId) -> bool {
    let Some(card) = game.card(id) else {
        return false;
    };
    if card.zone != Zone::Battlefield || card.controller != player {
        return false;
    }
    let Some(next) = card
        .current_face()
        .class_levels
        .iter()
        .find(|level| u64::from(level.level) == u64::from(card.class_level) + 1)
    else {
        return false;
    };
    let Some(cost) = &next.cost else {
        return false;
    };
    cast_spell::timing_legal(game, player, false) && mana_payment::can_pay(game, player, cost)
}

/// Pays the cost to advance a Class card to its next level and registers
/// the new level's static abilities.
#[instrument(level = "debug", skip(game))]
pub fn level_up(game: &mut GameState, player: PlayerName, id: CardId) -> Outcome {
    let Some(cost) = game.card(id).and_then(|card| {
        card.current_face()
            .class_levels
            .iter()
            .find(|level| u64::from(level.level) == u64::from(card.class_level) + 1)
            .and_then(|level| level.cost.clone())
    }) else {
        return outcome::OK;
    };
    let Some(payment) = mana_payment::plan(game, player, &cost, None) else {
        return outcome::OK;
    };
    mana_payment::execute(game, Source::Card(id), player, &payment)?;
    if let Some(card) = game.card_mut(id) {
        card.class_level += 1;
    }
    ability_registry::register_variant_abilities(game, id);
    game.effects.invalidate_cache();
    outcome::OK
}

/// True if the player can pay to unlock the indexed door of this Room.
pub fn can_unlock_door(game: &GameState, player: PlayerName, id: CardId, door: usize) -> bool {
    let Some(card) = game.card(id) else {
        return false;
    };
    if card.zone != Zone::Battlefield
        || card.controller != player
        || card.unlocked_doors.contains(&door)
    {
        return false;
    }
    let Some(door_data) = card.current_face().room_doors.get(door) else {
        return false;
    };
    let Some(cost) = &door_data.unlock_cost else {
        return false;
    };
    cast_spell::timing_legal(game, player, false) && mana_payment::can_pay(game, player, cost)
}

/// Unlocks a door of a Room card: pays the cost, registers the door's
/// statics, performs its one-shot effects, and fires its unlock event.
#[instrument(level = "debug", skip(game))]
pub fn unlock_door(game: &mut GameState, player: PlayerName, id: CardId, door: usize) -> Outcome {
    let Some(door_data) =
        game.card(id).and_then(|card| card.current_face().room_doors.get(door).cloned())
    else {
        return outcome::OK;
    };
    if let Some(cost) = &door_data.unlock_cost {
        let Some(payment) = mana_payment::plan(game, player, cost, None) else {
            return outcome::OK;
        };
        mana_payment::execute(game, Source::Card(id), player, &payment)?;
    }
    if let Some(card) = game.card_mut(id) {
        card.unlocked_doors.push(door);
    }
    ability_registry::register_variant_abilities(game, id);
    game.effects.invalidate_cache();

    let mut context = ExecutionContext::new(id, player, vec![], None);
    effect_execution::execute(game, &mut context, &door_data.effects)?;
    ability_registry::fire_event(game, GameEvent::DoorUnlocked { card: id, door });
    outcome::OK
}

/// True if this permanent has a cost-paid transform ability the player can
/// use.
pub fn can_transform(game: &GameState, player: PlayerName, id: CardId) -> bool {
    let Some(card) = game.card(id) else {
        return false;
    };
    card.zone == Zone::Battlefield
        && card.controller == player
        && card.printed().is_transforming_dfc()
        && card.printed().transform_trigger == Some(TransformTriggerKind::Cost)
        && cast_spell::timing_legal(game, player, false)
}

/// Pays a cost-transform permanent's cost and turns it over.
///
/// The transform cost itself is parsed as an activated ability where
/// available; when parsing did not surface one this acts as a free
/// sorcery-speed flip.
#[instrument(level = "debug", skip(game))]
pub fn transform(game: &mut GameState, player: PlayerName, id: CardId) -> Outcome {
    permanents::transform(game, Source::Card(id), id)
}
