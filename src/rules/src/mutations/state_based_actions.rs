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

use std::collections::BTreeMap;

use data::card_states::card_state::CardKind;
use data::card_states::counters::CounterKind;
use data::card_states::zones::ZoneQueries;
use data::core::keywords::Keyword;
use data::core::primitives::{
    CardId, CardSupertype, CardType, PlayerName, Source, StackItemId, Zone,
};
use data::game_states::game_state::{GameState, GameStatus};
use data::game_states::pending_decision::PendingDecision;
use data::game_states::state_based_event::StateBasedEvent;
use data::player_states::player_state::PlayerQueries;
use enum_iterator::all;
use enumset::EnumSet;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::{Outcome, StopCondition, Value};

use crate::layers;
use crate::mutations::move_card;
use crate::queries::{card_queries, player_queries};

/// Poison counters at which a player loses the game.
const LETHAL_POISON: u64 = 10;

/// Checks state-based actions, iterating until no further change occurs.
///
/// > 704.3. Whenever a player would get priority, the game checks for any
/// > of the listed conditions for state-based actions, then performs all
/// > applicable state-based actions simultaneously as a single event. If
/// > any state-based actions are performed as a result of a check, the
/// > check is repeated.
///
/// <https://yawgatog.com/resources/magic-rules/#R7043>
///
/// May halt with a pending legend-rule choice; the check resumes after the
/// controller picks a permanent to keep.
#[instrument(name = "state_based_actions_run", level = "debug", skip(game))]
pub fn run(game: &mut GameState) -> Outcome {
    let mut lost: EnumSet<PlayerName> = EnumSet::empty();

    loop {
        if game.status.is_over() || game.pending_decision.is_some() {
            break;
        }
        layers::recalculate(game);

        let events = game.state_based_events.take().unwrap_or_default();
        let mut changed = false;
        if !events.is_empty() {
            changed |= check_events(game, &events, &mut lost)?;
        }
        changed |= full_sweep(game, &mut lost)?;

        if !changed {
            break;
        }
    }

    if !lost.is_empty() {
        debug!(?lost, "Players have lost the game");
        game.status = GameStatus::GameOver { winners: player_queries::all_players(game) - lost };
        return outcome::GAME_OVER;
    }

    outcome::OK
}

fn check_events(
    game: &mut GameState,
    events: &[StateBasedEvent],
    lost: &mut EnumSet<PlayerName>,
) -> Value<bool> {
    let mut changed = false;
    for event in events {
        match event {
            StateBasedEvent::LifeTotalDecrease(player) => {
                if game.player(*player).life <= 0 {
                    changed |= lost.insert(*player);
                }
            }
            StateBasedEvent::DrawFromEmptyLibrary(player) => {
                changed |= lost.insert(*player);
            }
            StateBasedEvent::GainedPoisonCounters(player) => {
                if game.player(*player).counters.poison >= LETHAL_POISON {
                    changed |= lost.insert(*player);
                }
            }
            _ => {}
        }
    }
    Ok(changed)
}

/// One full battlefield sweep of the permanent-related state-based
/// actions. Returns true if anything changed.
fn full_sweep(game: &mut GameState, lost: &mut EnumSet<PlayerName>) -> Value<bool> {
    let mut changed = false;

    for player in all::<PlayerName>() {
        if game.player(player).life <= 0 || game.player(player).attempted_draw_from_empty {
            changed |= lost.insert(player);
        }
        if game.player(player).counters.poison >= LETHAL_POISON {
            changed |= lost.insert(player);
        }
    }

    let battlefield: Vec<CardId> = game.zones.all_battlefield_cards().collect();

    for id in battlefield.iter().copied() {
        // > 704.5q. If a permanent has both a +1/+1 counter and a -1/-1
        // > counter on it, N +1/+1 and N -1/-1 counters are removed from
        // > it.
        if let Some(card) = game.card_mut(id) {
            if card.counters.annihilate_pt_pairs() {
                game.effects.invalidate_cache();
                changed = true;
            }
        }
    }
    if changed {
        layers::recalculate(game);
    }

    for id in battlefield.iter().copied() {
        if destroy_dead_creature(game, id)? {
            changed = true;
        }
    }

    for id in battlefield.iter().copied() {
        changed |= check_planeswalker_loyalty(game, id)?;
        changed |= check_attachment_legality(game, id)?;
        changed |= check_saga_completion(game, id)?;
    }

    changed |= check_legend_rule(game)?;
    changed |= clean_up_tokens(game)?;

    Ok(changed)
}

/// Creatures with zero toughness die; creatures with lethal damage or any
/// deathtouch damage are destroyed unless indestructible.
fn destroy_dead_creature(game: &mut GameState, id: CardId) -> Value<bool> {
    if !card_queries::is_creature(game, id) {
        return Ok(false);
    }
    let Some(card) = game.card(id) else {
        return Ok(false);
    };
    if card.zone != Zone::Battlefield {
        return Ok(false);
    }

    let toughness = card_queries::toughness(game, id);
    if toughness <= 0 {
        debug!(?id, "Creature has zero toughness, moving to graveyard");
        move_card::run(game, Source::Game, id, Zone::Graveyard)?;
        return Ok(true);
    }

    let indestructible = card_queries::has_keyword(game, id, Keyword::Indestructible);
    let damage = game.card(id).map(|card| card.damage).unwrap_or(0);
    let deathtouched = game.card(id).is_some_and(|card| card.damaged_by_deathtouch);
    if !indestructible && (damage as i64 >= toughness || (deathtouched && damage > 0)) {
        debug!(?id, damage, toughness, "Creature has lethal damage, destroying");
        move_card::run(game, Source::Game, id, Zone::Graveyard)?;
        return Ok(true);
    }

    Ok(false)
}

fn check_planeswalker_loyalty(game: &mut GameState, id: CardId) -> Value<bool> {
    if !card_queries::card_types(game, id).contains(CardType::Planeswalker) {
        return Ok(false);
    }
    let Some(card) = game.card(id) else {
        return Ok(false);
    };
    if card.zone == Zone::Battlefield
        && card.counters.count(CounterKind::Loyalty) == 0
    {
        debug!(?id, "Planeswalker has zero loyalty, moving to graveyard");
        move_card::run(game, Source::Game, id, Zone::Graveyard)?;
        return Ok(true);
    }
    Ok(false)
}

/// Auras attached to nothing, or to an object they cannot legally enchant,
/// go to the graveyard.
fn check_attachment_legality(game: &mut GameState, id: CardId) -> Value<bool> {
    let Some(card) = game.card(id) else {
        return Ok(false);
    };
    if card.zone != Zone::Battlefield || !card.current_face().subtypes.is_aura() {
        return Ok(false);
    }

    let legal = match card.attached_to {
        None => false,
        Some(host) => game
            .card(host)
            .is_some_and(|host_card| host_card.zone == Zone::Battlefield),
    };
    if !legal {
        debug!(?id, "Aura is unattached or attached illegally, moving to graveyard");
        move_card::run(game, Source::Game, id, Zone::Graveyard)?;
        return Ok(true);
    }
    Ok(false)
}

/// A Saga whose final chapter has been reached is sacrificed, but only
/// once that chapter ability is no longer waiting for or sitting on the
/// stack, so the ability resolves with the Saga still on the battlefield.
///
/// See <https://yawgatog.com/resources/magic-rules/#R7144a>
fn check_saga_completion(game: &mut GameState, id: CardId) -> Value<bool> {
    let Some(card) = game.card(id) else {
        return Ok(false);
    };
    if card.zone != Zone::Battlefield {
        return Ok(false);
    }
    let face = card.current_face();
    if !face.subtypes.is_saga() || face.saga_chapters.is_empty() {
        return Ok(false);
    }
    let last_chapter =
        face.saga_chapters.iter().map(|chapter| chapter.chapter).max().unwrap_or(0);
    if card.counters.count(CounterKind::Lore) < u64::from(last_chapter) {
        return Ok(false);
    }

    if game.pending_triggers.iter().any(|trigger| trigger.source == id) {
        return Ok(false);
    }
    let chapter_on_stack = game.stack().iter().any(|item| match item {
        StackItemId::Ability(ability) => {
            game.stack_ability(*ability).is_some_and(|state| state.source == id)
        }
        StackItemId::Card(_) => false,
    });
    if chapter_on_stack {
        return Ok(false);
    }

    debug!(?id, "Saga completed its final chapter, sacrificing");
    move_card::run(game, Source::Game, id, Zone::Graveyard)?;
    Ok(true)
}

/// The legend rule: a player controlling multiple identically-named
/// legendary permanents chooses one to keep.
///
/// See <https://yawgatog.com/resources/magic-rules/#R7045j>
fn check_legend_rule(game: &mut GameState) -> Value<bool> {
    for player in all::<PlayerName>() {
        let mut by_name: BTreeMap<String, Vec<CardId>> = BTreeMap::new();
        for &id in game.battlefield(player) {
            let Some(characteristics) = card_queries::characteristics(game, id) else {
                continue;
            };
            if characteristics.supertypes.contains(CardSupertype::Legendary) {
                by_name.entry(characteristics.name).or_default().push(id);
            }
        }
        for (name, ids) in by_name {
            if ids.len() > 1 {
                debug!(?name, ?player, "Legend rule requires a choice");
                game.pending_decision =
                    Some(PendingDecision::ChooseLegendToKeep { player, candidates: ids });
                return Err(StopCondition::Choice);
            }
        }
    }
    Ok(false)
}

/// Tokens which have left the battlefield cease to exist.
fn clean_up_tokens(game: &mut GameState) -> Value<bool> {
    let stale: Vec<CardId> = game
        .zones
        .all_cards()
        .filter(|card| card.kind == CardKind::Token && card.zone != Zone::Battlefield)
        .map(|card| card.id)
        .collect();
    let changed = !stale.is_empty();
    for id in stale {
        debug!(?id, "Token left the battlefield, removing from game");
        game.zones.destroy_card(id);
    }
    Ok(changed)
}

/// Applies a legend-rule choice: every other copy with the same name the
/// player controls goes to the graveyard.
pub fn resolve_legend_choice(game: &mut GameState, player: PlayerName, keep: CardId) -> Outcome {
    let Some(PendingDecision::ChooseLegendToKeep { candidates, .. }) =
        game.pending_decision.take()
    else {
        return outcome::OK;
    };
    for id in candidates {
        if id != keep {
            move_card::run(game, Source::Game, id, Zone::Graveyard)?;
        }
    }
    debug!(?player, ?keep, "Legend rule resolved");
    run(game)
}
