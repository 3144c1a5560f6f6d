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

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::card_states::counters::Counters;
use crate::core::numerics::Damage;
use crate::core::primitives::{
    CardId, CardNumber, HasCardId, HasController, HasObjectId, HasPlayerName, ObjectId,
    PlayerName, StackAbilityId, Zone,
};
use crate::effects::characteristics::CalculatedCharacteristics;
use crate::game_states::game_state::TurnData;
use crate::printed_cards::printed_card::{PrintedCard, PrintedCardFace};

/// Whether a card is a normal card or a token.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum CardKind {
    Normal,
    Token,
}

/// Whether a card is tapped or untapped.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TappedState {
    Untapped,
    Tapped,
}

impl TappedState {
    pub fn is_tapped(&self) -> bool {
        *self == TappedState::Tapped
    }
}

/// Facing for a card: face down, or with the indexed printed face up.
///
/// The face index selects into [PrintedCard::faces]; transforming a
/// double-faced card changes the index.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum CardFacing {
    FaceDown,
    FaceUp(usize),
}

/// A target chosen for a spell or ability on the stack.
///
/// Card targets record the object ID at selection time so that a zone change
/// (which assigns a new object ID) makes the target illegal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ChosenTarget {
    Card { id: CardId, object_id: ObjectId },
    Player(PlayerName),
    StackAbility(StackAbilityId),
}

/// Represents the state of a card or card-like object.
///
/// The term "card" is used broadly here to include normal cards, tokens, and
/// copies of cards on the stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardState {
    /// Unique identifier for this card in the card arena
    pub id: CardId,

    /// Object ID for this card. Cards receive a new one every time they
    /// change zones.
    ///
    /// Do not mutate this field directly, use the methods on the `Zones`
    /// struct instead.
    pub object_id: ObjectId,

    /// Database key of the printed card backing this instance
    pub card_number: CardNumber,

    pub kind: CardKind,

    /// The player who starts the game with this card or who created this
    /// token. Do not mutate this field.
    ///
    /// See <https://yawgatog.com/resources/magic-rules/#R1083>
    pub owner: PlayerName,

    /// The player who can currently make decisions about this card.
    ///
    /// For cards not on the battlefield or stack this is the owner. Layer 2
    /// control-changing effects write this field back after each layer
    /// application.
    pub controller: PlayerName,

    /// Current game zone. Do not mutate directly; use `Zones::move_card`.
    pub zone: Zone,

    pub facing: CardFacing,

    /// A card not on the battlefield is always untapped.
    pub tapped_state: TappedState,

    /// Damage marked on this card this turn
    pub damage: Damage,

    /// True if any of the damage marked this turn was dealt by a source with
    /// deathtouch.
    pub damaged_by_deathtouch: bool,

    pub counters: Counters,

    /// The permanent this aura or equipment is attached to
    pub attached_to: Option<CardId>,

    /// Auras and equipment currently attached to this permanent
    pub attachments: Vec<CardId>,

    /// Targets chosen when this card was put on the stack
    pub targets: Vec<ChosenTarget>,

    /// Spree or modal choices made when this card was cast, as indices into
    /// the face's mode list
    pub chosen_modes: Vec<usize>,

    /// Value chosen for X when this card was cast
    pub chosen_x: Option<u64>,

    /// The turn on which this card entered its current zone.
    ///
    /// Used for summoning sickness: a creature is sick if it entered the
    /// battlefield this turn and lacks haste.
    pub entered_current_zone: TurnData,

    /// Current level for Class cards (1-based)
    pub class_level: u8,

    /// Indices of unlocked doors for Room cards
    pub unlocked_doors: Vec<usize>,

    /// True once a loyalty ability of this planeswalker has been activated
    /// this turn
    pub loyalty_activated_this_turn: bool,

    /// Characteristics produced by the most recent continuous-effect layer
    /// application. `None` off the battlefield.
    #[serde(skip)]
    pub derived: Option<CalculatedCharacteristics>,

    /// Printed card backing this instance. Populated at creation and after
    /// deserialization; use [Self::printed] instead of accessing directly.
    #[serde(skip)]
    pub printed_card_reference: Option<Arc<PrintedCard>>,
}

impl HasCardId for CardState {
    fn card_id(&self) -> CardId {
        self.id
    }
}

impl HasObjectId for CardState {
    fn object_id(&self) -> ObjectId {
        self.object_id
    }
}

impl HasPlayerName for CardState {
    fn player_name(&self) -> PlayerName {
        self.owner
    }
}

impl HasController for CardState {
    fn controller(&self) -> PlayerName {
        self.controller
    }
}

impl CardState {
    /// Returns the [PrintedCard] for this card.
    pub fn printed(&self) -> &PrintedCard {
        self.printed_card_reference.as_ref().expect("Printed card reference not populated")
    }

    /// Returns the currently active [PrintedCardFace].
    ///
    /// Face-down cards report their front face; the engine does not
    /// currently model morph characteristics.
    pub fn current_face(&self) -> &PrintedCardFace {
        let index = match self.facing {
            CardFacing::FaceDown => 0,
            CardFacing::FaceUp(index) => index,
        };
        self.printed().face(index).unwrap_or_else(|| self.printed().front())
    }

    /// Index of the currently face-up face.
    pub fn face_index(&self) -> usize {
        match self.facing {
            CardFacing::FaceDown => 0,
            CardFacing::FaceUp(index) => index,
        }
    }

    pub fn displayed_name(&self) -> &str {
        &self.current_face().name
    }
}
