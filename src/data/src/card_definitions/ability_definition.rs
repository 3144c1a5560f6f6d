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

use crate::card_definitions::card_filter::CardFilter;
use crate::card_definitions::effect_definition::EffectList;
use crate::card_states::counters::CounterKind;
use crate::core::keywords::Keyword;
use crate::core::numerics::{Power, Toughness};
use crate::printed_cards::mana_cost::ManaCost;

/// A parsed ability of a card.
///
/// One entry is produced for each clause of the card's oracle text. Clauses
/// the heuristic parser cannot interpret become [AbilityDefinition::Raw];
/// such a card remains playable but the unparsed clause never does anything.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum AbilityDefinition {
    Activated(ActivatedAbilityDefinition),
    Triggered(TriggeredAbilityDefinition),
    Static(StaticAbilityDefinition),
    /// The main effect of an instant or sorcery
    Spell(SpellAbilityDefinition),
    /// Unparsed oracle text clause
    Raw(String),
}

/// When an activated ability may legally be activated.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum AbilityTiming {
    /// Any time its controller has priority
    Instant,
    /// Only during the controller's main phase with an empty stack
    Sorcery,
}

/// One component of an activation cost.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum AbilityCost {
    Mana(ManaCost),
    Tap,
    PayLife(u64),
    SacrificeSelf,
    SacrificePermanent(CardFilter),
    DiscardCard,
    RemoveCounters(CounterKind, u64),
}

/// A "cost: effect" ability.
///
/// See <https://yawgatog.com/resources/magic-rules/#R6023>
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActivatedAbilityDefinition {
    pub costs: Vec<AbilityCost>,
    pub effects: EffectList,
    pub timing: AbilityTiming,

    /// Mana abilities resolve immediately without using the stack.
    ///
    /// See <https://yawgatog.com/resources/magic-rules/#R6051b>
    pub is_mana_ability: bool,
}

/// Events a triggered ability can listen for.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum TriggerCondition {
    /// "When this creature enters the battlefield"
    SelfEntersBattlefield,

    /// "Whenever another creature enters the battlefield under your control"
    CreatureEntersBattlefield(CardFilter),

    /// "When this creature dies"
    SelfDies,

    /// "Whenever a creature dies"
    CreatureDies(CardFilter),

    /// "At the beginning of your upkeep" / "each upkeep"
    BeginningOfUpkeep(PlayerScope),

    /// "At the beginning of your end step" / "each end step"
    BeginningOfEndStep(PlayerScope),

    /// "Whenever this creature attacks"
    SelfAttacks,

    /// "Whenever this creature blocks"
    SelfBlocks,

    /// "Whenever this creature deals combat damage to a player"
    SelfDealsCombatDamageToPlayer,

    /// "Whenever you gain life"
    YouGainLife,

    /// Saga chapter trigger for the given chapter number
    SagaChapter(u8),

    /// Unrecognized trigger text; never fires.
    Raw(String),
}

/// Which player's step a step-based trigger watches.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerScope {
    You,
    Opponent,
    Each,
}

/// A "when/whenever/at" ability.
///
/// See <https://yawgatog.com/resources/magic-rules/#R6031>
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TriggeredAbilityDefinition {
    pub condition: TriggerCondition,
    pub effects: EffectList,

    /// Original oracle text for this clause
    pub text: String,
}

/// Continuous effects a static ability can produce.
///
/// Registered with the layer system while the source is on the battlefield.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum StaticAbilityDefinition {
    /// "Creatures you control get +N/+N" style anthems
    AnthemPowerToughness {
        power: Power,
        toughness: Toughness,
        filter: CardFilter,
    },

    /// "Creatures you control have flying" style keyword grants
    GrantKeyword {
        keyword: Keyword,
        filter: CardFilter,
    },

    /// Aura/equipment grant to the attached permanent
    GrantKeywordToAttached {
        keyword: Keyword,
    },

    /// Aura/equipment P/T modification to the attached permanent
    ModifyAttachedPowerToughness {
        power: Power,
        toughness: Toughness,
    },

    /// Unrecognized static text; has no effect.
    Raw(String),
}

/// The resolution effects of an instant or sorcery.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpellAbilityDefinition {
    pub effects: EffectList,
}
