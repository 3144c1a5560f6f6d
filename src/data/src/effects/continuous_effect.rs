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
use crate::core::keywords::{Keyword, ProtectionFrom};
use crate::core::numerics::{Power, Toughness};
use crate::core::primitives::{CardId, CardSupertype, CardType, Color, PlayerName, Timestamp};
use crate::game_states::game_state::TurnData;

/// Unique identifier for a registered continuous or replacement effect.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct EffectId(pub u64);

/// Layers and sublayers in which continuous effects apply, in application
/// order.
///
/// Layer 7b (counter adjustments) is not represented here because counters
/// are read from live card state by the pipeline rather than being
/// registered effects.
///
/// See <https://yawgatog.com/resources/magic-rules/#R6131>
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum EffectLayer {
    /// Layer 1: copy effects
    Copy,
    /// Layer 2: control-changing effects
    Control,
    /// Layer 3: text-changing effects
    Text,
    /// Layer 4: type-changing effects
    Type,
    /// Layer 5: color-changing effects
    Color,
    /// Layer 6: ability-adding and ability-removing effects
    Ability,
    /// Layer 7a: characteristic-defining and set P/T effects
    PowerToughnessSetting,
    /// Layer 7c: P/T modifications
    PowerToughnessModifying,
    /// Layer 7d: P/T switching
    PowerToughnessSwitching,
}

/// Which cards a continuous effect applies to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum EffectTargets {
    /// A single card, e.g. an aura's host
    Single(CardId),

    /// A fixed list captured at registration time
    Cards(Vec<CardId>),

    /// All battlefield cards matching a filter, evaluated dynamically at
    /// each layer application
    Filter(CardFilter),
}

/// The modification a continuous effect performs within its layer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum ContinuousEffectKind {
    /// Overwrite copiable values with those of another card's printed front
    /// face
    CopyOf(CardId),

    SetController(PlayerName),

    SetName(String),

    AddType(CardType),
    RemoveType(CardType),
    SetTypes(EnumSet<CardType>),
    AddSubtype(String),
    RemoveSubtype(String),
    AddSupertype(CardSupertype),

    AddColors(EnumSet<Color>),
    SetColors(EnumSet<Color>),
    RemoveColors(EnumSet<Color>),

    AddKeyword(Keyword),
    RemoveKeyword(Keyword),
    RemoveAllAbilities,
    GrantProtection(ProtectionFrom),
    GrantWard(u64),

    SetPowerToughness { power: Power, toughness: Toughness },
    ModifyPowerToughness { power: Power, toughness: Toughness },
    SwitchPowerToughness,
}

/// How long a continuous effect remains registered.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum EffectDuration {
    /// Until explicitly removed
    Permanent,

    /// While the source permanent remains on the battlefield
    WhileSourceOnBattlefield,

    /// Until the cleanup step of the current turn
    EndOfTurn,

    /// Until the start of the named player's next turn
    UntilYourNextTurn(PlayerName, TurnData),

    /// Until the end of the current combat phase
    EndOfCombat,
}

/// An optional predicate gating whether a registered effect currently
/// applies.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum EffectCondition {
    /// Applies only while the source is untapped
    SourceUntapped,

    /// Applies only during the named player's turn
    DuringTurnOf(PlayerName),
}

/// A registered continuous effect.
///
/// Effects are ordered within a layer by [Timestamp]; the timestamp is
/// assigned by the registry when the effect is registered.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ContinuousEffect {
    pub id: EffectId,

    /// Card which generated this effect
    pub source: CardId,

    pub controller: PlayerName,

    pub layer: EffectLayer,

    pub targets: EffectTargets,

    pub kind: ContinuousEffectKind,

    pub duration: EffectDuration,

    pub timestamp: Timestamp,

    pub condition: Option<EffectCondition>,
}
