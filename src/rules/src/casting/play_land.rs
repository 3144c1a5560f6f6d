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
use data::core::primitives::{CardId, HasSource, PlayerName, Zone};
use data::game_states::game_state::GameState;
use data::player_states::player_state::PlayerQueries;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::move_card;

/// Lands playable per turn without effects modifying the limit.
const LANDS_PER_TURN: u64 = 1;

/// True if the player can currently take the special action of playing
/// this land.
///
/// > 305.1. A player who has priority may play a land card from their hand
/// > during a main phase of their turn when the stack is empty.
///
/// <https://yawgatog.com/resources/magic-rules/#R3051>
pub fn can_play(game: &GameState, player: PlayerName, card_id: CardId) -> bool {
    let Some(card) = game.card(card_id) else {
        return false;
    };
    card.zone == Zone::Hand
        && card.owner == player
        && card.current_face().is_land()
        && game.turn.active_player == player
        && game.priority == player
        && game.step.is_main_phase()
        && game.stack().is_empty()
        && game.player(player).lands_played_this_turn < LANDS_PER_TURN
        && game.pending_decision.is_none()
        && game.pending_cast.is_none()
}

/// Plays a land: moves it to the battlefield without using the stack.
#[instrument(level = "debug", skip(game, source))]
pub fn execute(
    game: &mut GameState,
    source: impl HasSource,
    player: PlayerName,
    card_id: CardId,
) -> Outcome {
    debug!(?player, ?card_id, "Playing land");
    game.player_mut(player).lands_played_this_turn += 1;
    move_card::run(game, source, card_id, Zone::Battlefield)?;
    outcome::OK
}
