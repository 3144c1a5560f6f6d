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

use serde::{Deserialize, Serialize};

use crate::core::numerics::LifeValue;
use crate::core::primitives::{HasPlayerName, PlayerName};
use crate::player_states::mana_pool::ManaPool;
use crate::player_states::player_map::PlayerMap;

pub trait PlayerQueries {
    /// Looks up a player by name
    fn player(&self, name: PlayerName) -> &PlayerState;

    /// Mutable version of [Self::player].
    fn player_mut(&mut self, name: PlayerName) -> &mut PlayerState;
}

/// Counters a player can accumulate.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerCounters {
    pub poison: u64,
    pub energy: u64,
    pub experience: u64,
}

/// Progress of a player through the London mulligan process.
///
/// See <https://yawgatog.com/resources/magic-rules/#R1035>
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MulliganState {
    /// Number of mulligans this player has taken
    pub count: u64,

    /// True once the player has chosen to keep their hand
    pub kept: bool,

    /// Cards still to be put on the bottom of the library after keeping
    pub cards_to_bottom: u64,
}

/// Represents the state of a single player within a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: PlayerName,

    /// Current amount of life for this player
    pub life: LifeValue,

    pub counters: PlayerCounters,

    /// Mana currently available to this player
    pub mana_pool: ManaPool,

    /// Number of lands this player has played this turn
    pub lands_played_this_turn: u64,

    /// Maximum hand size, checked during the cleanup step
    pub maximum_hand_size: usize,

    /// True if this player attempted to draw from an empty library; the
    /// player loses the game the next time state-based actions run.
    pub attempted_draw_from_empty: bool,

    pub mulligan: MulliganState,
}

impl PlayerState {
    pub fn new(name: PlayerName, life: LifeValue) -> Self {
        Self {
            name,
            life,
            counters: PlayerCounters::default(),
            mana_pool: ManaPool::default(),
            lands_played_this_turn: 0,
            maximum_hand_size: 7,
            attempted_draw_from_empty: false,
            mulligan: MulliganState::default(),
        }
    }
}

impl HasPlayerName for PlayerState {
    fn player_name(&self) -> PlayerName {
        self.name
    }
}

/// Represents the state of players within a game
pub type Players = PlayerMap<PlayerState>;

impl PlayerQueries for Players {
    fn player(&self, name: PlayerName) -> &PlayerState {
        self.get(name)
    }

    fn player_mut(&mut self, name: PlayerName) -> &mut PlayerState {
        self.get_mut(name)
    }
}
