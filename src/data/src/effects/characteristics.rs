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

use crate::core::keywords::{Keyword, KeywordGrants};
use crate::core::numerics::{Power, Toughness};
use crate::core::primitives::{CardSupertype, CardType, Color, PlayerName};
use crate::printed_cards::card_subtypes::CardSubtypes;
use crate::printed_cards::printed_card::PrintedCardFace;

/// The characteristics of a card after all continuous effects have been
/// applied.
///
/// Produced by the layer pipeline; never mutated outside it. For cards with
/// no applicable effects these equal the printed characteristics plus
/// counter adjustments.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CalculatedCharacteristics {
    pub name: String,

    pub card_types: EnumSet<CardType>,

    pub supertypes: EnumSet<CardSupertype>,

    pub subtypes: CardSubtypes,

    pub colors: EnumSet<Color>,

    /// Final keyword set: (inherent ∪ granted) ∖ removed
    pub keywords: EnumSet<Keyword>,

    pub keyword_grants: KeywordGrants,

    /// Controller after layer 2 effects
    pub controller: PlayerName,

    pub power: Power,

    pub toughness: Toughness,
}

impl CalculatedCharacteristics {
    /// Snapshot of the printed characteristics of a card face, before any
    /// continuous effects apply.
    ///
    /// Non-creature cards report zero power and toughness.
    pub fn base(face: &PrintedCardFace, controller: PlayerName) -> Self {
        Self {
            name: face.name.clone(),
            card_types: face.card_types,
            supertypes: face.supertypes,
            subtypes: face.subtypes.clone(),
            colors: face.colors,
            keywords: face.keywords,
            keyword_grants: face.keyword_grants.clone(),
            controller,
            power: face.power.map(|p| p.base_value()).unwrap_or(0),
            toughness: face.toughness.map(|t| t.base_value()).unwrap_or(0),
        }
    }

    pub fn is_creature(&self) -> bool {
        self.card_types.contains(CardType::Creature)
    }

    pub fn has(&self, keyword: Keyword) -> bool {
        self.keywords.contains(keyword)
    }
}
