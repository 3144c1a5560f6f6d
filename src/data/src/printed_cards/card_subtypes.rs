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

use enum_iterator::Sequence;
use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Land subtypes with intrinsic mana abilities.
///
/// See <https://yawgatog.com/resources/magic-rules/#R3056>
#[derive(
    Debug, Hash, Serialize, Deserialize, EnumSetType, Sequence, Display, EnumString, Ord, PartialOrd,
)]
pub enum LandType {
    Plains,
    Island,
    Swamp,
    Mountain,
    Forest,
}

/// Subtypes for one face of a card.
///
/// Land subtypes are broken out into a typed set because the rules engine
/// consults them for intrinsic mana abilities and landwalk; all other
/// subtypes (creature types, aura, equipment, saga, ...) are matched by
/// name.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CardSubtypes {
    /// Basic land subtypes present on this face
    pub lands: EnumSet<LandType>,

    /// All subtype words from the type line, in printed order
    pub all: Vec<String>,
}

impl CardSubtypes {
    /// Case-insensitive membership test for a subtype word.
    pub fn contains(&self, subtype: &str) -> bool {
        self.all.iter().any(|s| s.eq_ignore_ascii_case(subtype))
    }

    pub fn is_aura(&self) -> bool {
        self.contains("Aura")
    }

    pub fn is_equipment(&self) -> bool {
        self.contains("Equipment")
    }

    pub fn is_saga(&self) -> bool {
        self.contains("Saga")
    }
}
