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

use crate::core::numerics::ManaValue;
use crate::core::primitives::ManaColor;

/// Represents the printed mana cost of a card or ability
#[derive(Debug, Clone, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct ManaCost {
    /// List of symbols making up this mana cost
    pub items: Vec<ManaCostItem>,
}

impl ManaCost {
    /// The mana value ("converted mana cost") of this cost, with X counted
    /// as zero.
    ///
    /// See <https://yawgatog.com/resources/magic-rules/#R2034>
    pub fn mana_value(&self) -> ManaValue {
        self.items.iter().map(ManaCostItem::mana_value).sum()
    }

    /// True if this cost contains one or more `{X}` symbols.
    pub fn has_variable_x(&self) -> bool {
        self.items.iter().any(|item| *item == ManaCostItem::VariableX)
    }

    /// Number of `{X}` symbols in this cost.
    pub fn variable_x_count(&self) -> u64 {
        self.items.iter().filter(|item| **item == ManaCostItem::VariableX).count() as u64
    }
}

/// A single symbol within a mana cost.
///
/// Ordered by approximately how difficult this cost is to pay in a typical
/// game state.
///
/// See <https://yawgatog.com/resources/magic-rules/#R1074> for a list of
/// possible symbols.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
pub enum ManaCostItem {
    Snow(ManaColor),
    Colored(ManaColor),
    Hybrid(ManaColor, ManaColor),
    MonoHybrid(ManaColor),
    Phyrexian(ManaColor),
    PhyrexianHybrid(ManaColor, ManaColor),
    VariableX,
    /// One generic mana
    Generic,
}

impl ManaCostItem {
    pub fn mana_value(&self) -> ManaValue {
        match self {
            ManaCostItem::MonoHybrid(_) => 2,
            ManaCostItem::VariableX => 0,
            _ => 1,
        }
    }
}
