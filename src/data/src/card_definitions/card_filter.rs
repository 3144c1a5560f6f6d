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

use crate::core::primitives::{CardType, Color};

/// Restricts which player must control a matched permanent, relative to the
/// controller of the effect's source.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ControllerRestriction {
    You,
    Opponent,
}

/// A structural predicate over permanents, used by continuous-effect target
/// selection, triggered-ability conditions, and spell targeting.
///
/// An empty field imposes no restriction.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CardFilter {
    /// Required card types; a permanent matches if it has any of these.
    pub card_types: EnumSet<CardType>,

    /// Required subtype word, e.g. "Goblin"
    pub subtype: Option<String>,

    /// Which player must control the permanent
    pub controller: Option<ControllerRestriction>,

    /// Required colors; a permanent matches if its colors intersect these.
    pub colors: EnumSet<Color>,

    /// If true, the effect's own source never matches ("other creatures...")
    pub exclude_source: bool,
}

impl CardFilter {
    /// Filter matching every creature.
    pub fn creatures() -> Self {
        CardFilter { card_types: EnumSet::only(CardType::Creature), ..Self::default() }
    }

    /// Filter matching creatures the effect's controller controls.
    pub fn your_creatures() -> Self {
        CardFilter {
            card_types: EnumSet::only(CardType::Creature),
            controller: Some(ControllerRestriction::You),
            ..Self::default()
        }
    }

    /// Filter matching any permanent.
    pub fn permanents() -> Self {
        Self::default()
    }
}
