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

use crate::card_definitions::ability_definition::AbilityDefinition;
use crate::card_definitions::variant_data::{
    AdventureData, ClassLevel, PlaneswalkerAbilityDefinition, RoomDoor, SagaChapter, SpreeMode,
};
use crate::core::keywords::{Keyword, KeywordGrants};
use crate::core::numerics::ManaValue;
use crate::core::primitives::{CardNumber, CardSupertype, CardType, Color};
use crate::printed_cards::card_subtypes::CardSubtypes;
use crate::printed_cards::mana_cost::ManaCost;
use crate::printed_cards::printed_primitives::{PrintedLoyalty, PrintedPower, PrintedToughness};

/// Parsed, immutable representation of a card in the database.
///
/// Created once per card number when a deck is instantiated; card instances
/// hold a shared reference to this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintedCard {
    /// Database key for this card
    pub number: CardNumber,

    /// Faces of this card, front face first.
    ///
    /// Single-faced cards have exactly one entry.
    pub faces: Vec<PrintedCardFace>,

    pub layout: CardLayout,

    /// For double-faced cards, how the transformation is initiated.
    pub transform_trigger: Option<TransformTriggerKind>,
}

impl PrintedCard {
    /// The front (default) face.
    pub fn front(&self) -> &PrintedCardFace {
        &self.faces[0]
    }

    pub fn face(&self, index: usize) -> Option<&PrintedCardFace> {
        self.faces.get(index)
    }

    /// True if this card has a second face it can turn into after entering
    /// the battlefield.
    ///
    /// Covers transforming double-faced cards and flip cards (which turn
    /// 180 degrees to their bottom half). Modal double-faced cards choose a
    /// face as they are played and never transform afterwards.
    pub fn is_transforming_dfc(&self) -> bool {
        matches!(self.layout, CardLayout::Transform | CardLayout::Flip) && self.faces.len() > 1
    }

    pub fn is_modal_dfc(&self) -> bool {
        self.layout == CardLayout::ModalDfc && self.faces.len() > 1
    }
}

/// One face of a printed card with all parsed characteristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintedCardFace {
    pub name: String,

    pub supertypes: EnumSet<CardSupertype>,

    pub card_types: EnumSet<CardType>,

    pub subtypes: CardSubtypes,

    pub oracle_text: String,

    pub colors: EnumSet<Color>,

    pub mana_cost: ManaCost,

    pub mana_value: ManaValue,

    pub power: Option<PrintedPower>,

    pub toughness: Option<PrintedToughness>,

    pub loyalty: Option<PrintedLoyalty>,

    /// Keywords detected in the oracle text
    pub keywords: EnumSet<Keyword>,

    /// Parameters for ward / protection / landwalk keywords
    pub keyword_grants: KeywordGrants,

    /// Parsed abilities, one per oracle text clause.
    ///
    /// Clauses the parser does not understand appear as
    /// [AbilityDefinition::Raw] entries.
    pub abilities: Vec<AbilityDefinition>,

    /// Loyalty abilities, for planeswalker faces
    pub planeswalker_abilities: Vec<PlaneswalkerAbilityDefinition>,

    /// Additional-cost modes, for Spree cards
    pub spree_modes: Vec<SpreeMode>,

    /// Level definitions, for Class cards, sorted ascending by level
    pub class_levels: Vec<ClassLevel>,

    /// Door definitions, for Room cards
    pub room_doors: Vec<RoomDoor>,

    /// Chapter definitions, for Saga cards
    pub saga_chapters: Vec<SagaChapter>,

    /// Adventure half, when this card can be cast as an adventure
    pub adventure: Option<AdventureData>,
}

impl PrintedCardFace {
    pub fn is_creature(&self) -> bool {
        self.card_types.contains(CardType::Creature)
    }

    pub fn is_land(&self) -> bool {
        self.card_types.contains(CardType::Land)
    }

    pub fn is_planeswalker(&self) -> bool {
        self.card_types.contains(CardType::Planeswalker)
    }

    /// True if this face becomes a permanent when it resolves.
    pub fn is_permanent_type(&self) -> bool {
        !self.card_types.contains(CardType::Instant)
            && !self.card_types.contains(CardType::Sorcery)
    }

    pub fn is_legendary(&self) -> bool {
        self.supertypes.contains(CardSupertype::Legendary)
    }

    pub fn is_basic(&self) -> bool {
        self.supertypes.contains(CardSupertype::Basic)
    }
}

/// Physical layout of a printed card.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardLayout {
    Normal,
    Transform,
    ModalDfc,
    Adventure,
    Split,
    Flip,
    Meld,
    Class,
    Room,
    Saga,
}

/// How a transforming double-faced card initiates its transformation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TransformTriggerKind {
    /// Daybound/nightbound day-night cycle
    DayNight,
    /// Flip cards which turn 180 degrees on a condition
    Flip,
    /// Meld pairs
    Meld,
    /// "Transform [this]" instruction in a resolved effect
    Manual,
    /// Transforms when a stated game condition becomes true
    Condition,
    /// Activated cost which transforms, e.g. werewolf-style pay-to-flip
    Cost,
}
