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

use crate::core::primitives::PlayerName;

/// A container holding one value of type `T` for each player in the game.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    pub one: T,
    pub two: T,
}

impl<T> PlayerMap<T> {
    pub fn get(&self, player: PlayerName) -> &T {
        match player {
            PlayerName::One => &self.one,
            PlayerName::Two => &self.two,
        }
    }

    pub fn get_mut(&mut self, player: PlayerName) -> &mut T {
        match player {
            PlayerName::One => &mut self.one,
            PlayerName::Two => &mut self.two,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerName, &T)> {
        [(PlayerName::One, &self.one), (PlayerName::Two, &self.two)].into_iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        [&self.one, &self.two].into_iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        [&mut self.one, &mut self.two].into_iter()
    }
}
