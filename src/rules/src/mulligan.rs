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
use data::core::primitives::{CardId, PlayerName, Source, Zone};
use data::game_states::game_state::{GameState, GameStatus};
use data::player_states::player_state::PlayerQueries;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::{library, move_card};
use crate::steps::step;

/// Opening hand size.
pub const OPENING_HAND_SIZE: usize = 7;

/// The player currently making a mulligan decision, if the game is still
/// resolving mulligans.
///
/// Players resolve in turn order; a player who has kept must bottom cards
/// equal to the number of mulligans they took before the game begins.
///
/// See <https://yawgatog.com/resources/magic-rules/#R1035>
pub fn player_to_act(game: &GameState) -> Option<PlayerName> {
    if game.status != GameStatus::ResolveMulligans {
        return None;
    }
    for player in [PlayerName::One, PlayerName::Two] {
        if !game.player(player).mulligan.kept {
            return Some(player);
        }
    }
    for player in [PlayerName::One, PlayerName::Two] {
        if game.player(player).mulligan.cards_to_bottom > 0 {
            return Some(player);
        }
    }
    None
}

/// True if the player may take another mulligan.
pub fn can_mulligan(game: &GameState, player: PlayerName) -> bool {
    player_to_act(game) == Some(player)
        && !game.player(player).mulligan.kept
        && (game.player(player).mulligan.count as usize) < OPENING_HAND_SIZE
}

/// Shuffles the player's hand back and draws a new hand of seven.
#[instrument(level = "debug", skip(game))]
pub fn take_mulligan(game: &mut GameState, player: PlayerName) -> Outcome {
    debug!(?player, "Taking a mulligan");
    let hand: Vec<CardId> = game.hand(player).iter().copied().collect();
    for card in hand {
        move_card::run(game, Source::Game, card, Zone::Library)?;
    }
    game.shuffle_library(player);
    library::draw_cards(game, Source::Game, player, OPENING_HAND_SIZE)?;
    game.player_mut(player).mulligan.count += 1;
    outcome::OK
}

/// Keeps the current hand. The player will put one card on the bottom of
/// their library for each mulligan taken.
#[instrument(level = "debug", skip(game))]
pub fn keep_hand(game: &mut GameState, player: PlayerName) -> Outcome {
    debug!(?player, mulligans = game.player(player).mulligan.count, "Keeping hand");
    let count = game.player(player).mulligan.count;
    let state = &mut game.player_mut(player).mulligan;
    state.kept = true;
    state.cards_to_bottom = count;
    maybe_start_game(game)
}

/// Puts one card from hand on the bottom of the library after keeping a
/// mulliganed hand.
#[instrument(level = "debug", skip(game))]
pub fn bottom_card(game: &mut GameState, player: PlayerName, card: CardId) -> Outcome {
    if game.player(player).mulligan.cards_to_bottom == 0
        || !game.hand(player).contains(&card)
    {
        return outcome::OK;
    }
    let turn = game.turn;
    game.zones.move_card_to_library_position(card, 0, turn);
    game.player_mut(player).mulligan.cards_to_bottom -= 1;
    maybe_start_game(game)
}

fn maybe_start_game(game: &mut GameState) -> Outcome {
    if player_to_act(game).is_some() {
        return outcome::OK;
    }
    debug!("Mulligans resolved, starting first turn");
    game.status = GameStatus::Playing;
    step::begin_first_turn(game)
}
