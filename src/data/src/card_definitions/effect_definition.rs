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

use crate::card_definitions::card_filter::CardFilter;
use crate::card_states::counters::CounterKind;
use crate::core::keywords::Keyword;
use crate::core::numerics::{Power, Toughness};
use crate::core::primitives::{Color, ManaColor};

/// A quantity appearing in an effect, either printed or chosen as `X` when
/// the spell is cast.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum DynamicValue {
    Fixed(i64),
    VariableX,
}

impl DynamicValue {
    /// Resolves this value given the X chosen for the spell, if any.
    pub fn resolve(&self, chosen_x: Option<u64>) -> i64 {
        match self {
            DynamicValue::Fixed(value) => *value,
            DynamicValue::VariableX => chosen_x.unwrap_or(0) as i64,
        }
    }
}

/// Which player an effect applies to, relative to the controller of its
/// source.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerSpec {
    Controller,
    Opponent,
    EachPlayer,
    /// The player chosen as this effect's target
    Target,
}

/// What an effect requires as a target when its spell or ability is put on
/// the stack.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum TargetSpec {
    /// The effect does not target
    None,

    /// The effect applies to its own source
    Source,

    /// The permanent this aura or equipment is attached to
    Attached,

    /// "any target": a creature, player, or planeswalker
    AnyTarget,

    /// A permanent matching the filter
    Permanent(CardFilter),

    /// A player
    Player,

    /// A spell on the stack
    Spell,
}

impl TargetSpec {
    /// True if putting this effect on the stack requires choosing a target.
    pub fn requires_target(&self) -> bool {
        !matches!(self, TargetSpec::None | TargetSpec::Source | TargetSpec::Attached)
    }
}

/// How long a one-shot grant (pump, keyword) lasts.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum GrantDuration {
    EndOfTurn,
    EndOfCombat,
    Permanently,
}

/// Structured description of a one-shot effect, produced by the oracle-text
/// parser and interpreted at resolution time.
///
/// Text the parser does not understand becomes [Effect::Raw], which resolves
/// without doing anything.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    DealDamage {
        amount: DynamicValue,
        target: TargetSpec,
    },

    DrawCards {
        player: PlayerSpec,
        count: DynamicValue,
    },

    GainLife {
        player: PlayerSpec,
        amount: DynamicValue,
    },

    LoseLife {
        player: PlayerSpec,
        amount: DynamicValue,
    },

    Destroy {
        target: TargetSpec,
    },

    Exile {
        target: TargetSpec,
    },

    ReturnToHand {
        target: TargetSpec,
    },

    /// Counter target spell and put it into its owner's graveyard
    CounterSpell {
        target: TargetSpec,
    },

    /// +N/+N or -N/-N until end of turn (or other duration)
    ModifyPowerToughness {
        power: DynamicValue,
        toughness: DynamicValue,
        target: TargetSpec,
        duration: GrantDuration,
    },

    GrantKeyword {
        keyword: Keyword,
        target: TargetSpec,
        duration: GrantDuration,
    },

    AddCounters {
        kind: CounterKind,
        count: DynamicValue,
        target: TargetSpec,
    },

    CreateTokens {
        count: DynamicValue,
        power: Power,
        toughness: Toughness,
        name: String,
        subtypes: Vec<String>,
        colors: EnumSet<Color>,
        keywords: EnumSet<Keyword>,
    },

    /// Add the listed mana to the controller's mana pool
    AddMana {
        mana: Vec<ManaColor>,
    },

    Tap {
        target: TargetSpec,
    },

    Untap {
        target: TargetSpec,
    },

    Scry {
        count: DynamicValue,
    },

    Mill {
        player: PlayerSpec,
        count: DynamicValue,
    },

    DiscardCards {
        player: PlayerSpec,
        count: DynamicValue,
    },

    /// Attach the source permanent (an aura or equipment) to the target
    AttachTo {
        target: TargetSpec,
    },

    /// Transform the source permanent to its other face
    TransformSource,

    /// Unparsed effect text; resolving it is a no-op.
    Raw(String),
}

/// Shared spec instance for effects targeting a player.
const PLAYER_TARGET: TargetSpec = TargetSpec::Player;

impl Effect {
    /// The target requirement of this effect, if it targets.
    pub fn target_spec(&self) -> Option<&TargetSpec> {
        let spec = match self {
            Effect::DrawCards { player: PlayerSpec::Target, .. }
            | Effect::GainLife { player: PlayerSpec::Target, .. }
            | Effect::LoseLife { player: PlayerSpec::Target, .. }
            | Effect::Mill { player: PlayerSpec::Target, .. }
            | Effect::DiscardCards { player: PlayerSpec::Target, .. } => return Some(&PLAYER_TARGET),
            Effect::DealDamage { target, .. }
            | Effect::Destroy { target }
            | Effect::Exile { target }
            | Effect::ReturnToHand { target }
            | Effect::CounterSpell { target }
            | Effect::ModifyPowerToughness { target, .. }
            | Effect::GrantKeyword { target, .. }
            | Effect::AddCounters { target, .. }
            | Effect::Tap { target }
            | Effect::Untap { target }
            | Effect::AttachTo { target } => target,
            _ => return None,
        };
        spec.requires_target().then_some(spec)
    }

    /// True if any quantity in this effect is an `X` to be chosen by the
    /// caster.
    pub fn uses_variable_x(&self) -> bool {
        matches!(
            self,
            Effect::DealDamage { amount: DynamicValue::VariableX, .. }
                | Effect::DrawCards { count: DynamicValue::VariableX, .. }
                | Effect::GainLife { amount: DynamicValue::VariableX, .. }
                | Effect::LoseLife { amount: DynamicValue::VariableX, .. }
                | Effect::AddCounters { count: DynamicValue::VariableX, .. }
                | Effect::CreateTokens { count: DynamicValue::VariableX, .. }
                | Effect::ModifyPowerToughness { power: DynamicValue::VariableX, .. }
        )
    }
}

/// A list of effects resolving in sequence.
pub type EffectList = Vec<Effect>;
