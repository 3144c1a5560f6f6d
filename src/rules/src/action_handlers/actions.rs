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
use data::core::primitives::{PlayerName, Source, Zone};
use data::game_states::combat_state::{CombatState, CombatStateKind};
use data::game_states::game_state::{GameState, GameStatus};
use data::game_states::pending_decision::{PendingCastKind, PendingDecision};
use data::player_states::player_state::PlayerQueries;
use enumset::EnumSet;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::Outcome;

use crate::casting::{activate_ability, cast_spell, play_land};
use crate::combat::combat_actions;
use crate::layers;
use crate::legality::legal_actions;
use crate::mulligan;
use crate::mutations::{move_card, priority, state_based_actions};
use crate::steps::step;
use crate::triggers;

/// Options for executing a game action
#[derive(Debug, Clone, Copy)]
pub struct ExecuteAction {
    /// True if this action should be checked for legality before running
    pub validate: bool,
}

/// Executes a game action for the named player, then runs the engine's
/// between-action checks (layers, state-based actions, pending triggers).
#[instrument(name = "actions_execute", level = "debug", skip(game))]
pub fn execute(
    game: &mut GameState,
    player: PlayerName,
    action: GameAction,
    options: ExecuteAction,
) {
    if options.validate {
        assert!(
            legal_actions::can_take_action(game, player, &action),
            "Illegal game action {action:?} for player {player:?}"
        );
    }

    outcome::execute(|| match action {
        GameAction::PassPriority => handle_pass(game, player),
        GameAction::Concede => concede(game, player),
        GameAction::PlayLand(card_id) => play_land::execute(game, Source::Game, player, card_id),
        GameAction::CastSpell(card_id) => {
            cast_spell::begin(game, player, card_id, PendingCastKind::Spell)
        }
        GameAction::CastAdventure(card_id) => {
            cast_spell::begin(game, player, card_id, PendingCastKind::Adventure)
        }
        GameAction::ActivateAbility { card, number } => {
            activate_ability::begin(game, player, card, number)
        }
        GameAction::ActivateLoyaltyAbility { card, index } => {
            activate_ability::begin_loyalty(game, player, card, index)
        }
        GameAction::LevelUp(card) => activate_ability::level_up(game, player, card),
        GameAction::UnlockDoor { card, door } => {
            activate_ability::unlock_door(game, player, card, door)
        }
        GameAction::TransformCard(card) => activate_ability::transform(game, player, card),
        GameAction::CombatAction(combat) => combat_actions::execute(game, player, combat),
        GameAction::PromptAction(prompt) => handle_prompt(game, player, prompt),
    });

    run_state_checks(game);
}

/// Between-action engine work: recompute layers, run state-based actions
/// to a fixpoint, and put pending triggers on the stack.
pub fn run_state_checks(game: &mut GameState) {
    outcome::execute(|| {
        layers::recalculate(game);
        state_based_actions::run(game)?;
        if game.pending_decision.is_none() && game.pending_cast.is_none() {
            triggers::place_pending_on_stack(game)?;
        }
        outcome::OK
    });
}

/// Conceding loses the game immediately.
fn concede(game: &mut GameState, player: PlayerName) -> Outcome {
    debug!(?player, "Player concedes");
    game.status = GameStatus::GameOver { winners: EnumSet::only(player.opponent()) };
    outcome::GAME_OVER
}

/// Passing priority doubles as the "default" choice for every decision
/// point, so it is always a legal action: it confirms combat proposals,
/// keeps hands, abandons unfinished casts, and auto-resolves pending
/// choices in deterministic order.
fn handle_pass(game: &mut GameState, player: PlayerName) -> Outcome {
    if game.status == GameStatus::ResolveMulligans {
        if !game.player(player).mulligan.kept {
            return mulligan::keep_hand(game, player);
        }
        let Some(&card) = game.hand(player).iter().next() else {
            return outcome::OK;
        };
        return mulligan::bottom_card(game, player, card);
    }

    if let Some(decision) = game.pending_decision.clone() {
        return default_decision(game, player, decision);
    }

    match game.combat.as_ref().map(CombatState::kind) {
        Some(CombatStateKind::ProposingAttackers) => {
            return combat_actions::execute(game, player, CombatAction::ConfirmAttackers);
        }
        Some(CombatStateKind::ProposingBlockers) => {
            return combat_actions::execute(game, player, CombatAction::ConfirmBlockers);
        }
        _ => {}
    }

    priority::pass(game, player)
}

/// The deterministic default for each pending decision, used when a player
/// passes instead of choosing.
fn default_decision(
    game: &mut GameState,
    player: PlayerName,
    decision: PendingDecision,
) -> Outcome {
    match decision {
        PendingDecision::CastChoices { .. } => {
            // Abandoning an unfinished cast has no game effect; no costs
            // have been paid yet.
            game.pending_cast = None;
            game.pending_decision = None;
            outcome::OK
        }
        PendingDecision::OrderTriggers { .. } => {
            let Some(&index) = triggers::orderable_triggers(game, player).first() else {
                game.pending_decision = None;
                return outcome::OK;
            };
            triggers::order_trigger(game, player, index)
        }
        PendingDecision::ChooseLegendToKeep { candidates, .. } => {
            let keep = candidates.first().copied();
            match keep {
                Some(keep) => state_based_actions::resolve_legend_choice(game, player, keep),
                None => {
                    game.pending_decision = None;
                    outcome::OK
                }
            }
        }
        PendingDecision::DiscardToHandSize { .. } => {
            let Some(&card) = game.hand(player).iter().next() else {
                game.pending_decision = None;
                return outcome::OK;
            };
            handle_prompt(game, player, PromptAction::Discard(card))
        }
    }
}

fn handle_prompt(game: &mut GameState, player: PlayerName, prompt: PromptAction) -> Outcome {
    match prompt {
        PromptAction::Mulligan => mulligan::take_mulligan(game, player),
        PromptAction::KeepHand => mulligan::keep_hand(game, player),
        PromptAction::BottomCard(card) => mulligan::bottom_card(game, player, card),
        PromptAction::ChooseMode(index) => cast_spell::choose_mode(game, index),
        PromptAction::ConfirmModes => cast_spell::confirm_modes(game),
        PromptAction::ChooseX(x) => cast_spell::choose_x(game, x),
        PromptAction::ChooseTarget(index) => cast_spell::choose_target(game, index),
        PromptAction::OrderTrigger(index) => triggers::order_trigger(game, player, index),
        PromptAction::ChooseLegend(card) => {
            state_based_actions::resolve_legend_choice(game, player, card)
        }
        PromptAction::Discard(card) => {
            if !matches!(
                game.pending_decision,
                Some(PendingDecision::DiscardToHandSize { .. })
            ) {
                return outcome::OK;
            }
            move_card::run(game, Source::Game, card, Zone::Graveyard)?;
            let player_state = game.player(player);
            if game.hand(player).len() <= player_state.maximum_hand_size {
                game.pending_decision = None;
                step::finish_cleanup(game)?;
            }
            outcome::OK
        }
    }
}
