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

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::card_definitions::ability_definition::{
    AbilityDefinition, StaticAbilityDefinition, TriggeredAbilityDefinition,
};
use crate::card_definitions::effect_definition::EffectList;
use crate::core::numerics::{Power, Toughness};
use crate::core::primitives::CardType;
use crate::printed_cards::mana_cost::ManaCost;

/// One loyalty ability of a planeswalker.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlaneswalkerAbilityDefinition {
    /// Loyalty counters added (positive) or removed (negative) as the
    /// activation cost.
    pub loyalty_change: i64,

    pub effects: EffectList,

    /// Original effect text for this ability
    pub text: String,

    /// True for the large final minus ability
    pub is_ultimate: bool,
}

/// One "+ {cost} — effect" mode of a Spree card.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpreeMode {
    pub cost: ManaCost,
    pub effects: EffectList,
    pub text: String,
}

/// One level band of a Class enchantment.
///
/// Level 1 is the card's base state with no cost; higher levels carry the
/// mana cost paid to advance and the abilities gained.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClassLevel {
    pub level: u8,

    /// Cost to advance to this level; `None` for the base level.
    pub cost: Option<ManaCost>,

    pub abilities: Vec<AbilityDefinition>,

    /// Power override granted at this level, if any
    pub power: Option<Power>,

    pub toughness: Option<Toughness>,

    /// Card types gained at this level (e.g. a Class becoming a Creature)
    pub added_types: EnumSet<CardType>,
}

/// One door of a Room enchantment.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoomDoor {
    pub name: String,

    pub oracle_text: String,

    /// Cost to unlock this door after the room is on the battlefield
    pub unlock_cost: Option<ManaCost>,

    pub triggers: Vec<TriggeredAbilityDefinition>,

    pub statics: Vec<StaticAbilityDefinition>,

    /// One-shot effects which happen as the door unlocks
    pub effects: EffectList,
}

/// One chapter of a Saga.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SagaChapter {
    /// Chapter number, starting from 1
    pub chapter: u8,

    pub effects: EffectList,

    pub text: String,
}

/// The adventure half of an adventurer card.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AdventureData {
    pub name: String,
    pub mana_cost: ManaCost,
    pub card_types: EnumSet<CardType>,
    pub effects: EffectList,
}
