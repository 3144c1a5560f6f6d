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
use crate::card_states::counters::CounterKind;
use crate::core::primitives::{CardId, PlayerName, Timestamp};
use crate::effects::continuous_effect::EffectId;
use crate::events::game_event::GameEventKind;

/// Which objects or players an interception applies to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum ReplacementScope {
    /// The effect's own source card
    Source,

    /// Any battlefield card matching the filter
    Filter(CardFilter),

    /// Events affecting the effect's controller
    Controller,
}

/// The substitution a replacement effect performs when its event matches.
///
/// See <https://yawgatog.com/resources/magic-rules/#R6141>
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum ReplacementAction {
    /// "[This permanent] enters the battlefield tapped."
    EntersTapped,

    /// "[This permanent] enters the battlefield with N [kind] counters."
    EntersWithCounters(CounterKind, u64),

    /// "[This permanent] doesn't untap during your untap step."
    SkipUntap,

    /// "Prevent all damage that would be dealt to [scope]."
    PreventDamage,

    /// "If [this] would die, exile it instead."
    DiesToExileInstead,

    /// Unparsed replacement text; never modifies its event.
    Raw(String),
}

/// A registered replacement effect.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReplacementEffect {
    pub id: EffectId,

    /// Card whose ability created this interception
    pub source: CardId,

    pub controller: PlayerName,

    /// Event kind this effect intercepts
    pub event_kind: GameEventKind,

    pub scope: ReplacementScope,

    pub action: ReplacementAction,

    pub timestamp: Timestamp,
}
