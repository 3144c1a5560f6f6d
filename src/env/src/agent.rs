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

use data::actions::game_action::GameAction;
use data::core::primitives::PlayerName;
use data::game_states::game_state::GameState;
use rand::prelude::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::SplitMix64;

/// Something that can pick a game action from the legal set: the opponent
/// inside the environment, or a scripted player in tests.
pub trait Agent: Send {
    fn select(&mut self, game: &GameState, player: PlayerName, legal: &[GameAction])
        -> GameAction;
}

/// Always passes priority (or the contextual default for the current
/// decision).
#[derive(Debug, Default, Clone)]
pub struct PassingAgent;

impl Agent for PassingAgent {
    fn select(
        &mut self,
        _game: &GameState,
        _player: PlayerName,
        _legal: &[GameAction],
    ) -> GameAction {
        GameAction::PassPriority
    }
}

/// Picks a uniformly random legal action, never conceding.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: SplitMix64,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self { rng: SplitMix64::seed_from_u64(seed) }
    }
}

impl Agent for RandomAgent {
    fn select(
        &mut self,
        _game: &GameState,
        _player: PlayerName,
        legal: &[GameAction],
    ) -> GameAction {
        let options: Vec<GameAction> =
            legal.iter().copied().filter(|action| *action != GameAction::Concede).collect();
        options.choose(&mut self.rng).copied().unwrap_or(GameAction::PassPriority)
    }
}
