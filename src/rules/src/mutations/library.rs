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

use data::card_states::zones::ZoneQueries;
use data::core::primitives::{HasPlayerName, HasSource, Zone};
use data::events::game_event::GameEvent;
use data::game_states::game_state::GameState;
use data::game_states::state_based_event::StateBasedEvent;
use data::player_states::player_state::PlayerQueries;
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::{abilities, move_card};
use crate::replacement::{self, ReplacementOutcome};

/// Draws a card from the top of the `player`'s library.
///
/// Attempting to draw from an empty library marks the player, which causes
/// them to lose the game the next time state-based actions are checked.
pub fn draw(game: &mut GameState, source: impl HasSource, player: impl HasPlayerName) -> Outcome {
    let player = player.player_name();

    let event = GameEvent::DrewCard { player };
    if replacement::check(game, &event) == ReplacementOutcome::Prevented {
        return outcome::OK;
    }

    let Some(&id) = game.library(player).back() else {
        game.player_mut(player).attempted_draw_from_empty = true;
        game.add_state_based_event(StateBasedEvent::DrawFromEmptyLibrary(player));
        return outcome::OK;
    };
    move_card::run(game, source, id, Zone::Hand)?;
    abilities::fire_event(game, event);
    outcome::OK
}

/// Draws `count` cards in sequence from the top of the `player`'s library.
pub fn draw_cards(
    game: &mut GameState,
    source: impl HasSource,
    player: impl HasPlayerName,
    count: usize,
) -> Outcome {
    let player = player.player_name();
    let source = source.source();
    for _ in 0..count {
        draw(game, source, player)?;
    }
    outcome::OK
}

/// Moves the top `count` cards of the `player`'s library to their
/// graveyard.
pub fn mill(
    game: &mut GameState,
    source: impl HasSource,
    player: impl HasPlayerName,
    count: usize,
) -> Outcome {
    let player = player.player_name();
    let source = source.source();
    for _ in 0..count {
        let Some(&id) = game.library(player).back() else {
            return outcome::OK;
        };
        move_card::run(game, source, id, Zone::Graveyard)?;
    }
    outcome::OK
}

/// Resolves scry N by revealing the top card to its owner and moving it to
/// the bottom when a second consecutive land would be kept.
///
/// A full scry interface would prompt the controller per card; this
/// deterministic policy keeps the choice out of the action space while
/// still reordering the library.
pub fn scry(
    game: &mut GameState,
    _source: impl HasSource,
    player: impl HasPlayerName,
    count: usize,
) -> Outcome {
    let player = player.player_name();
    let turn = game.turn;
    for _ in 0..count {
        let Some(&top) = game.library(player).back() else {
            return outcome::OK;
        };
        let hand_lands = game
            .hand(player)
            .iter()
            .filter(|id| game.card(**id).is_some_and(|card| card.current_face().is_land()))
            .count();
        let top_is_land =
            game.card(top).is_some_and(|card| card.current_face().is_land());
        if top_is_land && hand_lands >= 3 {
            game.zones.move_card_to_library_position(top, 0, turn);
        } else {
            // Keeping a card ends the scry; cards below it stay unseen.
            break;
        }
    }
    outcome::OK
}
