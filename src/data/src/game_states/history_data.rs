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

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::primitives::CardId;
use crate::player_states::player_map::PlayerMap;

/// Per-player counts of notable events within a single turn.
///
/// Reset when the turn advances; consulted by legality checks and exposed in
/// observations.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryCounters {
    pub spells_cast: u64,
    pub abilities_activated: u64,
    pub creatures_attacked: u64,
}

/// Events tracked for the current turn.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnHistory {
    pub counters: PlayerMap<HistoryCounters>,

    /// Cards which entered the battlefield this turn
    pub entered_this_turn: BTreeSet<CardId>,

    /// Creatures which attacked this turn
    pub attacked_this_turn: BTreeSet<CardId>,
}

impl TurnHistory {
    /// Clears all tracked state as a new turn begins.
    pub fn reset(&mut self) {
        *self = TurnHistory::default();
    }
}
