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

use crate::card_definitions::effect_definition::EffectList;
use crate::card_states::card_state::ChosenTarget;
use crate::core::primitives::{
    AbilityNumber, CardId, HasController, ObjectId, PlayerName, StackAbilityId,
};

/// Distinguishes activated from triggered abilities on the stack.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum StackAbilityKind {
    Activated,
    Triggered,
}

/// State of an activated or triggered ability while it is on the stack.
///
/// Abilities exist independently of their source once they trigger or are
/// activated; the source leaving its zone does not remove the ability.
///
/// See <https://yawgatog.com/resources/magic-rules/#R1132>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackAbilityState {
    pub id: StackAbilityId,

    pub kind: StackAbilityKind,

    /// Card whose ability this is
    pub source: CardId,

    /// Object ID the source had when this ability was created
    pub source_object_id: ObjectId,

    /// Position of this ability in the source's parsed ability list
    pub ability_number: AbilityNumber,

    pub controller: PlayerName,

    pub targets: Vec<ChosenTarget>,

    /// The effects this ability will perform on resolution
    pub effects: EffectList,

    /// X value inherited from the activation, if any
    pub chosen_x: Option<u64>,
}

impl HasController for StackAbilityState {
    fn controller(&self) -> PlayerName {
        self.controller
    }
}
