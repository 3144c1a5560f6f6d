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

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::ManaColor;

/// A restriction on what a piece of floating mana may be spent on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ManaRestriction {
    /// Spend only on creature spells
    CreatureSpells,

    /// Spend only on activated abilities
    ActivatedAbilities,
}

/// A floating mana entry carrying a spend restriction.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct RestrictedMana {
    pub color: ManaColor,
    pub amount: u64,
    pub restriction: ManaRestriction,

    /// True if an effect exempts this mana from emptying as steps and
    /// phases end.
    pub persists_through_steps: bool,
}

/// Unspent mana available to a player.
///
/// Pools empty as each step and phase ends, except for entries explicitly
/// marked as persistent by their generating effect.
///
/// See <https://yawgatog.com/resources/magic-rules/#R1064>
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ManaPool {
    mana: EnumMap<ManaColor, u64>,

    restricted: Vec<RestrictedMana>,
}

impl ManaPool {
    pub fn add(&mut self, color: ManaColor, amount: u64) {
        self.mana[color] += amount;
    }

    pub fn add_restricted(&mut self, entry: RestrictedMana) {
        self.restricted.push(entry);
    }

    /// Unrestricted mana of the given color.
    pub fn amount(&self, color: ManaColor) -> u64 {
        self.mana[color]
    }

    /// Total floating mana, restricted entries included.
    pub fn total(&self) -> u64 {
        self.mana.values().sum::<u64>()
            + self.restricted.iter().map(|entry| entry.amount).sum::<u64>()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Spends unrestricted mana of a color. Returns false without mutating
    /// if the pool holds less than `amount`.
    pub fn spend(&mut self, color: ManaColor, amount: u64) -> bool {
        if self.mana[color] < amount {
            return false;
        }
        self.mana[color] -= amount;
        true
    }

    /// Spends `amount` mana of any colors toward a generic cost, preferring
    /// the most plentiful colors first. Returns false without mutating if
    /// the pool total is insufficient.
    pub fn spend_generic(&mut self, amount: u64) -> bool {
        if self.mana.values().sum::<u64>() < amount {
            return false;
        }
        let mut remaining = amount;
        while remaining > 0 {
            let color = self
                .mana
                .iter()
                .max_by_key(|(_, amount)| **amount)
                .map(|(color, _)| color)
                .expect("mana pool has at least one color entry");
            self.mana[color] -= 1;
            remaining -= 1;
        }
        true
    }

    /// Empties the pool at the end of a step or phase, retaining entries
    /// which persist.
    pub fn empty_at_step_end(&mut self) {
        self.mana = EnumMap::default();
        self.restricted.retain(|entry| entry.persists_through_steps);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ManaColor, u64)> + '_ {
        self.mana.iter().map(|(color, amount)| (color, *amount))
    }
}
