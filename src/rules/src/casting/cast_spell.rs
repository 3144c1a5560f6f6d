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

use data::card_definitions::ability_definition::{AbilityCost, AbilityDefinition};
use data::card_definitions::effect_definition::{EffectList, TargetSpec};
use data::card_states::zones::ZoneQueries;
use data::core::keywords::Keyword;
use data::core::primitives::{CardId, CardType, PlayerName, Source, Zone};
use data::events::game_event::GameEvent;
use data::game_states::game_state::GameState;
use data::game_states::pending_decision::{PendingCast, PendingCastKind, PendingDecision};
use data::printed_cards::mana_cost::ManaCost;
use data::printed_cards::printed_card::PrintedCardFace;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::Outcome;

use crate::casting::mana_payment;
use crate::mutations::{abilities, move_card};
use crate::queries::{card_queries, targets};
use crate::resolve;

/// True if the player can currently begin casting this card as a spell.
pub fn can_cast(game: &GameState, player: PlayerName, card_id: CardId) -> bool {
    let Some(card) = game.card(card_id) else {
        return false;
    };
    if card.zone != Zone::Hand || card.owner != player {
        return false;
    }
    let face = card.current_face();
    if face.is_land() {
        return false;
    }
    can_cast_face(game, player, card_id, face, &face.mana_cost)
}

/// True if the player can currently cast this card's adventure half.
pub fn can_cast_adventure(game: &GameState, player: PlayerName, card_id: CardId) -> bool {
    let Some(card) = game.card(card_id) else {
        return false;
    };
    if card.zone != Zone::Hand || card.owner != player {
        return false;
    }
    let face = card.current_face();
    let Some(adventure) = &face.adventure else {
        return false;
    };
    timing_legal(game, player, adventure.card_types.contains(CardType::Instant))
        && mana_payment::can_pay(game, player, &adventure.mana_cost)
        && targets_available(game, player, card_id, &resolve::required_specs(&adventure.effects, None))
}

fn can_cast_face(
    game: &GameState,
    player: PlayerName,
    card_id: CardId,
    face: &PrintedCardFace,
    cost: &ManaCost,
) -> bool {
    let instant_speed = face.card_types.contains(CardType::Instant)
        || face.keywords.contains(Keyword::Flash);
    if !timing_legal(game, player, instant_speed) {
        return false;
    }
    if !mana_payment::can_pay(game, player, cost) {
        return false;
    }
    let enchant = oracle::ability_parser::enchant_target(&face.oracle_text);
    if face.subtypes.is_aura() && enchant.is_none() {
        return false;
    }
    let specs = resolve::required_specs(&spell_effects(face, &[]), enchant.as_ref());
    targets_available(game, player, card_id, &specs)
}

/// Common timing legality: priority, pending work, split second, and
/// sorcery-speed restrictions.
pub fn timing_legal(game: &GameState, player: PlayerName, instant_speed: bool) -> bool {
    if game.priority != player
        || game.pending_decision.is_some()
        || game.pending_cast.is_some()
        || game.status.is_over()
    {
        return false;
    }
    if card_queries::stack_has_split_second(game) {
        return false;
    }
    if instant_speed {
        return true;
    }
    game.turn.active_player == player && game.step.is_main_phase() && game.stack().is_empty()
}

fn targets_available(
    game: &GameState,
    player: PlayerName,
    source: CardId,
    specs: &[TargetSpec],
) -> bool {
    specs.iter().all(|spec| !targets::candidates(game, spec, player, source).is_empty())
}

/// The one-shot effects this face will perform, including any chosen spree
/// modes.
pub fn spell_effects(face: &PrintedCardFace, chosen_modes: &[usize]) -> EffectList {
    let mut effects: EffectList = vec![];
    for ability in &face.abilities {
        if let AbilityDefinition::Spell(spell) = ability {
            effects.extend(spell.effects.iter().cloned());
        }
    }
    for mode in chosen_modes {
        if let Some(spree) = face.spree_modes.get(*mode) {
            effects.extend(spree.effects.iter().cloned());
        }
    }
    effects
}

/// Begins casting a spell, creating a pending cast for any modes, X, and
/// targets still to be chosen. Finishes immediately when no choices are
/// required.
#[instrument(level = "debug", skip(game))]
pub fn begin(
    game: &mut GameState,
    player: PlayerName,
    card_id: CardId,
    kind: PendingCastKind,
) -> Outcome {
    debug!(?player, ?card_id, "Beginning to cast spell");
    game.pending_cast = Some(PendingCast {
        kind,
        card: card_id,
        controller: player,
        chosen_modes: vec![],
        modes_confirmed: false,
        chosen_x: None,
        targets: vec![],
    });
    game.pending_decision = Some(PendingDecision::CastChoices { player });
    try_finish(game)
}

/// Requirements still unsatisfied for the in-progress cast.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CastRequirement {
    /// Spree/mode selection is still open
    Modes { available: Vec<usize>, chosen: usize },

    /// An X value must be chosen, up to the given maximum
    VariableX { maximum: u64 },

    /// The next target must be chosen from these candidates
    Target(TargetSpec),
}

/// The next requirement for the pending cast, or `None` when it is ready
/// to be paid for and put on the stack.
pub fn next_requirement(game: &GameState) -> Option<CastRequirement> {
    let pending = game.pending_cast.as_ref()?;
    let card = game.card(pending.card)?;
    let face = card.current_face();

    if !face.spree_modes.is_empty() && !pending.modes_confirmed {
        let available: Vec<usize> = (0..face.spree_modes.len())
            .filter(|index| !pending.chosen_modes.contains(index))
            .filter(|index| {
                mana_payment::can_pay(game, pending.controller, &face.spree_modes[*index].cost)
            })
            .collect();
        if !available.is_empty() || pending.chosen_modes.is_empty() {
            return Some(CastRequirement::Modes {
                available,
                chosen: pending.chosen_modes.len(),
            });
        }
    }

    let cost = cast_cost(game, pending)?;
    if cost.has_variable_x() && pending.chosen_x.is_none() {
        return Some(CastRequirement::VariableX {
            maximum: mana_payment::max_affordable_x(game, pending.controller, &cost),
        });
    }

    let specs = required_target_specs(game, pending)?;
    if pending.targets.len() < specs.len() {
        return Some(CastRequirement::Target(specs[pending.targets.len()].clone()));
    }

    None
}

/// Total mana cost of the pending cast, including chosen spree modes.
pub fn cast_cost(game: &GameState, pending: &PendingCast) -> Option<ManaCost> {
    let card = game.card(pending.card)?;
    let face = card.current_face();
    match &pending.kind {
        PendingCastKind::Spell => {
            let mut cost = face.mana_cost.clone();
            for mode in &pending.chosen_modes {
                if let Some(spree) = face.spree_modes.get(*mode) {
                    cost.items.extend(spree.cost.items.iter().copied());
                }
            }
            Some(cost)
        }
        PendingCastKind::Adventure => Some(face.adventure.as_ref()?.mana_cost.clone()),
        PendingCastKind::Ability(number) => {
            let ability = face.abilities.get(number.0)?;
            let AbilityDefinition::Activated(activated) = ability else {
                return None;
            };
            let mut cost = ManaCost::default();
            for ability_cost in &activated.costs {
                if let AbilityCost::Mana(mana) = ability_cost {
                    cost.items.extend(mana.items.iter().copied());
                }
            }
            Some(cost)
        }
        PendingCastKind::LoyaltyAbility(_) => Some(ManaCost::default()),
    }
}

/// Target requirements of the pending cast, in selection order.
pub fn required_target_specs(game: &GameState, pending: &PendingCast) -> Option<Vec<TargetSpec>> {
    let card = game.card(pending.card)?;
    let face = card.current_face();
    match &pending.kind {
        PendingCastKind::Spell => {
            let enchant = if face.is_permanent_type() {
                oracle::ability_parser::enchant_target(&face.oracle_text)
            } else {
                None
            };
            Some(resolve::required_specs(
                &spell_effects(face, &pending.chosen_modes),
                enchant.as_ref(),
            ))
        }
        PendingCastKind::Adventure => {
            Some(resolve::required_specs(&face.adventure.as_ref()?.effects, None))
        }
        PendingCastKind::Ability(number) => {
            let AbilityDefinition::Activated(activated) = face.abilities.get(number.0)? else {
                return None;
            };
            Some(resolve::required_specs(&activated.effects, None))
        }
        PendingCastKind::LoyaltyAbility(index) => {
            let ability = face.planeswalker_abilities.get(*index)?;
            Some(resolve::required_specs(&ability.effects, None))
        }
    }
}

/// Applies a mode choice to the pending cast.
pub fn choose_mode(game: &mut GameState, index: usize) -> Outcome {
    if let Some(pending) = &mut game.pending_cast {
        if !pending.chosen_modes.contains(&index) {
            pending.chosen_modes.push(index);
        }
    }
    try_finish(game)
}

/// Closes mode selection for the pending cast.
pub fn confirm_modes(game: &mut GameState) -> Outcome {
    if let Some(pending) = &mut game.pending_cast {
        pending.modes_confirmed = true;
    }
    try_finish(game)
}

/// Applies an X choice to the pending cast.
pub fn choose_x(game: &mut GameState, x: u64) -> Outcome {
    if let Some(pending) = &mut game.pending_cast {
        pending.chosen_x = Some(x);
    }
    try_finish(game)
}

/// Applies a target choice (by candidate index) to the pending cast.
pub fn choose_target(game: &mut GameState, index: usize) -> Outcome {
    let Some(pending) = game.pending_cast.clone() else {
        return outcome::OK;
    };
    let Some(specs) = required_target_specs(game, &pending) else {
        return outcome::OK;
    };
    let Some(spec) = specs.get(pending.targets.len()) else {
        return outcome::OK;
    };
    let candidates = targets::candidates(game, spec, pending.controller, pending.card);
    let Some(target) = candidates.get(index) else {
        return outcome::OK;
    };
    if let Some(pending) = &mut game.pending_cast {
        pending.targets.push(*target);
    }
    try_finish(game)
}

/// Completes the cast once every requirement is satisfied: pays costs and
/// moves the spell to the stack.
fn try_finish(game: &mut GameState) -> Outcome {
    if next_requirement(game).is_some() {
        return outcome::CHOICE;
    }
    let Some(pending) = game.pending_cast.take() else {
        return outcome::OK;
    };
    game.pending_decision = None;

    match pending.kind {
        PendingCastKind::Spell | PendingCastKind::Adventure => finish_spell(game, pending),
        PendingCastKind::Ability(_) | PendingCastKind::LoyaltyAbility(_) => {
            super::activate_ability::finish(game, pending)
        }
    }
}

#[instrument(level = "debug", skip(game, pending))]
fn finish_spell(game: &mut GameState, pending: PendingCast) -> Outcome {
    let player = pending.controller;
    let card_id = pending.card;
    let Some(cost) = cast_cost(game, &pending) else {
        return outcome::OK;
    };
    let Some(payment) = mana_payment::plan(game, player, &cost, pending.chosen_x) else {
        return outcome::OK;
    };
    mana_payment::execute(game, Source::Card(card_id), player, &payment)?;

    move_card::run(game, Source::Card(card_id), card_id, Zone::Stack)?;
    if let Some(card) = game.card_mut(card_id) {
        card.targets = pending.targets;
        card.chosen_modes = pending.chosen_modes;
        card.chosen_x = pending.chosen_x;
    }

    game.this_turn.counters.get_mut(player).spells_cast += 1;
    debug!(?player, ?card_id, "Spell cast, now on the stack");
    abilities::fire_event(game, GameEvent::SpellCast { card: card_id, controller: player });

    // Casting a spell resets the priority round to the active player.
    game.priority = game.turn.active_player;
    game.clear_passed();
    outcome::OK
}
