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

use data::core::primitives::PlayerName;
use data::game_states::game_state::GameState;
use enumset::EnumSet;

/// Set of players participating in this game.
pub fn all_players(game: &GameState) -> EnumSet<PlayerName> {
    game.configuration.all_players
}

/// Returns the player after `player` in turn order.
pub fn next_player_after(_game: &GameState, player: PlayerName) -> PlayerName {
    player.opponent()
}

/// The player whose turn comes after the active player's.
pub fn next_player(game: &GameState) -> PlayerName {
    next_player_after(game, game.turn.active_player)
}
