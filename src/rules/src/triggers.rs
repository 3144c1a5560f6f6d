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

use data::card_states::stack_ability_state::{StackAbilityKind, StackAbilityState};
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{PlayerName, StackAbilityId};
use data::game_states::game_state::{GameState, PendingTrigger};
use data::game_states::pending_decision::PendingDecision;
use tracing::debug;
use utils::outcome;
use utils::outcome::Outcome;

use crate::queries::targets;

/// Moves pending triggered abilities onto the stack.
///
/// > 603.3b. If multiple abilities have triggered since the last time a
/// > player received priority, ... then the abilities are placed on the
/// > stack in APNAP order.
///
/// <https://yawgatog.com/resources/magic-rules/#R6033b>
///
/// The active player's triggers are placed first. When one player controls
/// several triggers at once, they choose the order via a pending decision;
/// a single trigger is placed automatically.
pub fn place_pending_on_stack(game: &mut GameState) -> Outcome {
    let had_any = !game.pending_triggers.is_empty();
    loop {
        if game.pending_triggers.is_empty() {
            break;
        }
        let active = game.turn.active_player;
        let player = if game.pending_triggers.iter().any(|t| t.controller == active) {
            active
        } else {
            active.opponent()
        };

        let indices: Vec<usize> = game
            .pending_triggers
            .iter()
            .enumerate()
            .filter(|(_, trigger)| trigger.controller == player)
            .map(|(index, _)| index)
            .collect();

        if indices.len() > 1 {
            game.pending_decision = Some(PendingDecision::OrderTriggers { player });
            return outcome::CHOICE;
        }

        let trigger = game.pending_triggers.remove(indices[0]);
        place_trigger(game, trigger);
    }

    if had_any {
        // Triggers entering the stack give the active player priority.
        game.priority = game.turn.active_player;
        game.clear_passed();
    }
    outcome::OK
}

/// Places one specific pending trigger (chosen by its controller) and then
/// continues automatic placement.
pub fn order_trigger(game: &mut GameState, player: PlayerName, index: usize) -> Outcome {
    if index >= game.pending_triggers.len() {
        return outcome::OK;
    }
    if game.pending_triggers[index].controller != player {
        return outcome::OK;
    }
    let trigger = game.pending_triggers.remove(index);
    place_trigger(game, trigger);
    game.pending_decision = None;
    place_pending_on_stack(game)
}

/// Pending triggers controlled by a player, by index, for decision
/// legality.
pub fn orderable_triggers(game: &GameState, player: PlayerName) -> Vec<usize> {
    game.pending_triggers
        .iter()
        .enumerate()
        .filter(|(_, trigger)| trigger.controller == player)
        .map(|(index, _)| index)
        .collect()
}

fn place_trigger(game: &mut GameState, trigger: PendingTrigger) -> Option<StackAbilityId> {
    // Targets for triggered abilities are chosen deterministically: the
    // first legal candidate for each requirement. A trigger with a target
    // requirement and no legal candidates is removed from the game rather
    // than being placed.
    let mut chosen = vec![];
    for effect in &trigger.effects {
        if let Some(spec) = effect.target_spec() {
            let candidates =
                targets::candidates(game, spec, trigger.controller, trigger.source);
            match candidates.first() {
                Some(first) => chosen.push(*first),
                None => {
                    debug!(source = ?trigger.source, "Trigger has no legal targets, skipping");
                    return None;
                }
            }
        }
    }

    let source_object_id =
        game.card(trigger.source).map(|card| card.object_id).unwrap_or_default();
    debug!(source = ?trigger.source, "Placing triggered ability on stack");
    Some(game.zones.push_stack_ability(StackAbilityState {
        id: StackAbilityId::default(),
        kind: StackAbilityKind::Triggered,
        source: trigger.source,
        source_object_id,
        ability_number: trigger.ability_number,
        controller: trigger.controller,
        targets: chosen,
        effects: trigger.effects,
        chosen_x: None,
    }))
}
