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

use data::actions::game_action::{CombatAction, GameAction, PromptAction};
use data::card_states::zones::ZoneQueries;
use data::core::primitives::PlayerName;
use data::game_states::combat_state::CombatState;
use data::game_states::game_state::{GameState, GameStatus};
use data::game_states::pending_decision::PendingDecision;
use data::player_states::player_state::PlayerQueries;
use tracing::instrument;

use crate::casting::cast_spell::{self, CastRequirement};
use crate::casting::{activate_ability, play_land};
use crate::combat::{combat_actions, combat_queries};
use crate::mulligan;
use crate::queries::targets;
use crate::triggers;

/// Returns the name of the player who is currently allowed to take an
/// action, or `None` if the game has ended.
pub fn next_to_act(game: &GameState) -> Option<PlayerName> {
    if game.status.is_over() {
        return None;
    }
    if game.status == GameStatus::ResolveMulligans {
        return mulligan::player_to_act(game);
    }
    if let Some(decision) = &game.pending_decision {
        return Some(decision.player());
    }
    Some(match game.combat.as_ref() {
        Some(CombatState::ProposingAttackers(_)) => game.turn.active_player,
        Some(CombatState::ProposingBlockers(blockers)) => blockers.defender,
        _ => game.priority,
    })
}

/// List of all legal actions the named player can take in the current game
/// state.
///
/// Passing priority and conceding are always present for the player whose
/// turn it is to act; passing maps onto the natural default for the
/// current decision (confirming combat, keeping a hand, and so on).
#[instrument(name = "legal_actions_compute", level = "trace", skip(game))]
pub fn compute(game: &GameState, player: PlayerName) -> Vec<GameAction> {
    let mut result = vec![];
    if next_to_act(game) != Some(player) {
        return result;
    }

    result.push(GameAction::PassPriority);
    result.push(GameAction::Concede);

    if game.status == GameStatus::ResolveMulligans {
        append_mulligan_actions(game, player, &mut result);
        return result;
    }

    if let Some(decision) = &game.pending_decision {
        append_decision_actions(game, player, decision, &mut result);
        return result;
    }

    match game.combat.as_ref() {
        Some(CombatState::ProposingAttackers(_)) => {
            for &id in game.battlefield(player) {
                if combat_queries::is_valid_attacker(game, player, id) {
                    result.push(CombatAction::DeclareAttacker(id).into());
                }
            }
            if combat_actions::can_confirm(game, player) {
                result.push(CombatAction::ConfirmAttackers.into());
            }
            return result;
        }
        Some(CombatState::ProposingBlockers(blockers)) => {
            for &blocker in game.battlefield(player) {
                for attacker in blockers.attackers.all_attackers() {
                    if combat_queries::can_block(game, player, blocker, attacker) {
                        result.push(CombatAction::DeclareBlocker { blocker, attacker }.into());
                    }
                }
            }
            if combat_actions::can_confirm(game, player) {
                result.push(CombatAction::ConfirmBlockers.into());
            }
            return result;
        }
        _ => {}
    }

    append_priority_actions(game, player, &mut result);
    result
}

fn append_mulligan_actions(game: &GameState, player: PlayerName, result: &mut Vec<GameAction>) {
    if !game.player(player).mulligan.kept {
        result.push(PromptAction::KeepHand.into());
        if mulligan::can_mulligan(game, player) {
            result.push(PromptAction::Mulligan.into());
        }
    } else if game.player(player).mulligan.cards_to_bottom > 0 {
        for &card in game.hand(player) {
            result.push(PromptAction::BottomCard(card).into());
        }
    }
}

fn append_decision_actions(
    game: &GameState,
    player: PlayerName,
    decision: &PendingDecision,
    result: &mut Vec<GameAction>,
) {
    match decision {
        PendingDecision::CastChoices { .. } => match cast_spell::next_requirement(game) {
            Some(CastRequirement::Modes { available, chosen }) => {
                for index in available {
                    result.push(PromptAction::ChooseMode(index).into());
                }
                if chosen > 0 {
                    result.push(PromptAction::ConfirmModes.into());
                }
            }
            Some(CastRequirement::VariableX { maximum }) => {
                for x in 0..=maximum {
                    result.push(PromptAction::ChooseX(x).into());
                }
            }
            Some(CastRequirement::Target(spec)) => {
                let Some(pending) = &game.pending_cast else {
                    return;
                };
                let candidates = targets::candidates(game, &spec, player, pending.card);
                for index in 0..candidates.len() {
                    result.push(PromptAction::ChooseTarget(index).into());
                }
            }
            None => {}
        },
        PendingDecision::OrderTriggers { .. } => {
            for index in triggers::orderable_triggers(game, player) {
                result.push(PromptAction::OrderTrigger(index).into());
            }
        }
        PendingDecision::ChooseLegendToKeep { candidates, .. } => {
            for &candidate in candidates {
                result.push(PromptAction::ChooseLegend(candidate).into());
            }
        }
        PendingDecision::DiscardToHandSize { .. } => {
            for &card in game.hand(player) {
                result.push(PromptAction::Discard(card).into());
            }
        }
    }
}

fn append_priority_actions(game: &GameState, player: PlayerName, result: &mut Vec<GameAction>) {
    if game.priority != player {
        return;
    }

    for &card_id in game.hand(player) {
        if play_land::can_play(game, player, card_id) {
            result.push(GameAction::PlayLand(card_id));
        }
        if cast_spell::can_cast(game, player, card_id) {
            result.push(GameAction::CastSpell(card_id));
        }
        if cast_spell::can_cast_adventure(game, player, card_id) {
            result.push(GameAction::CastAdventure(card_id));
        }
    }

    for &card_id in game.battlefield(player) {
        for (number, _) in activate_ability::activated_abilities(game, card_id) {
            if activate_ability::can_activate(game, player, card_id, number) {
                result.push(GameAction::ActivateAbility { card: card_id, number });
            }
        }
        let loyalty_count = game
            .card(card_id)
            .map(|card| card.current_face().planeswalker_abilities.len())
            .unwrap_or(0);
        for index in 0..loyalty_count {
            if activate_ability::can_activate_loyalty(game, player, card_id, index) {
                result.push(GameAction::ActivateLoyaltyAbility { card: card_id, index });
            }
        }
        if activate_ability::can_level_up(game, player, card_id) {
            result.push(GameAction::LevelUp(card_id));
        }
        let door_count = game
            .card(card_id)
            .map(|card| card.current_face().room_doors.len())
            .unwrap_or(0);
        for door in 0..door_count {
            if activate_ability::can_unlock_door(game, player, card_id, door) {
                result.push(GameAction::UnlockDoor { card: card_id, door });
            }
        }
        if activate_ability::can_transform(game, player, card_id) {
            result.push(GameAction::TransformCard(card_id));
        }
    }
}

/// Returns true if the named player can currently legally take the
/// provided [GameAction].
#[instrument(level = "trace", skip(game, action))]
pub fn can_take_action(game: &GameState, player: PlayerName, action: &GameAction) -> bool {
    compute(game, player).iter().any(|legal| legal == action)
}
