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

use data::core::primitives::{HasPlayerName, HasSource, ManaColor, PlayerName};
use data::game_states::game_state::GameState;
use data::player_states::player_state::PlayerQueries;
use utils::outcome;
use utils::outcome::Outcome;

/// Adds mana to a player's pool.
pub fn add(
    game: &mut GameState,
    _source: impl HasSource,
    player: impl HasPlayerName,
    mana: &[ManaColor],
) -> Outcome {
    let player = player.player_name();
    for color in mana {
        game.player_mut(player).mana_pool.add(*color, 1);
    }
    outcome::OK
}

/// Empties both players' mana pools as a step or phase ends.
///
/// > 500.4. When a step or phase ends, any unused mana left in a player's
/// > mana pool empties.
///
/// <https://yawgatog.com/resources/magic-rules/#R5004>
pub fn empty_pools_at_step_end(game: &mut GameState) {
    for player in [PlayerName::One, PlayerName::Two] {
        game.player_mut(player).mana_pool.empty_at_step_end();
    }
}
