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

use enum_iterator::Sequence;
use enum_map::Enum;
use enumset::{enum_set, EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use uuid::Uuid;

/// The five canonical colors of magic.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Ord, PartialOrd, Sequence)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

/// Possible colors of mana
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Enum, Ord, PartialOrd, Sequence)]
pub enum ManaColor {
    Colorless,
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl From<Color> for ManaColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => ManaColor::White,
            Color::Blue => ManaColor::Blue,
            Color::Black => ManaColor::Black,
            Color::Red => ManaColor::Red,
            Color::Green => ManaColor::Green,
        }
    }
}

/// Supertypes for a card.
///
/// See <https://yawgatog.com/resources/magic-rules/#R2054>
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Sequence)]
pub enum CardSupertype {
    Basic,
    Legendary,
    Ongoing,
    Snow,
    World,
}

/// Types for a card.
///
/// See <https://yawgatog.com/resources/magic-rules/#R2052>
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Sequence)]
pub enum CardType {
    Artifact,
    Battle,
    Creature,
    Enchantment,
    Instant,
    Kindred,
    Land,
    Planeswalker,
    Sorcery,
}

/// Identifies one of the players in a game
#[derive(Debug, Default, Hash, Serialize, Deserialize, EnumSetType, Enum, Ord, PartialOrd, Sequence)]
pub enum PlayerName {
    /// The player who plays first, who is "on the play"
    #[default]
    One,
    /// The player who plays second, who is "on the draw"
    Two,
}

impl PlayerName {
    /// Returns the other player in a two-player game.
    pub fn opponent(&self) -> PlayerName {
        match self {
            PlayerName::One => PlayerName::Two,
            PlayerName::Two => PlayerName::One,
        }
    }
}

/// Set of players participating in a two-player game.
pub const ALL_POSSIBLE_PLAYERS: EnumSet<PlayerName> =
    enum_set!(PlayerName::One | PlayerName::Two);

/// Identifies a struct that is 1:1 associated with a given [PlayerName].
pub trait HasPlayerName {
    fn player_name(&self) -> PlayerName;
}

impl HasPlayerName for PlayerName {
    fn player_name(&self) -> PlayerName {
        *self
    }
}

/// Identifies a struct that has a controller.
pub trait HasController {
    fn controller(&self) -> PlayerName;
}

new_key_type! {
    /// Identifies a card or card-like object such as:
    ///
    /// - A normal card
    /// - A token
    /// - A copy of a card on the stack
    pub struct CardId;
}

new_key_type! {
    /// Identifies an activated or triggered ability while it is on the stack.
    pub struct StackAbilityId;
}

/// Identifies a struct that is 1:1 associated with a given [CardId].
pub trait HasCardId {
    fn card_id(&self) -> CardId;
}

impl HasCardId for CardId {
    fn card_id(&self) -> CardId {
        *self
    }
}

/// An identifier for an object within a game.
///
/// Cards receive a new object ID each time they change zones. In most typical
/// game situations the rules only 'remember' effects that happen to a
/// specific object, e.g. if you exile a card and return it to the battlefield
/// it gets a new object ID and effects targeting it will end.
///
/// See <https://yawgatog.com/resources/magic-rules/#R1091>
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct ObjectId(pub u64);

pub trait HasObjectId {
    fn object_id(&self) -> ObjectId;
}

impl HasObjectId for ObjectId {
    fn object_id(&self) -> ObjectId {
        *self
    }
}

/// A monotonically increasing counter used to order continuous effects within
/// a layer.
///
/// See <https://yawgatog.com/resources/magic-rules/#R6137>
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

/// Identifies an ability of a card.
///
/// Abilities are written in oracle text separated by newline characters. This
/// number is the (0-indexed) position of the ability within that text.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AbilityNumber(pub usize);

/// An item on the stack: either a card being cast as a spell or an activated
/// or triggered ability.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StackItemId {
    Card(CardId),
    Ability(StackAbilityId),
}

/// The card number keying a card's definition in the card database.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct CardNumber(pub u32);

/// A zone is a place where objects can be during the game.
///
/// See <https://yawgatog.com/resources/magic-rules/#R4001>
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Sequence)]
pub enum Zone {
    Hand,
    Graveyard,
    Library,
    Battlefield,
    Stack,
    Exiled,
}

impl Zone {
    /// Is this zone a public zone?
    ///
    /// See <https://yawgatog.com/resources/magic-rules/#R4002>
    pub fn is_public(&self) -> bool {
        match self {
            Zone::Hand => false,
            Zone::Graveyard => true,
            Zone::Library => false,
            Zone::Battlefield => true,
            Zone::Stack => true,
            Zone::Exiled => true,
        }
    }
}

/// Identifies the origin of a game mutation, for replacement-effect matching
/// and logging.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Source {
    /// Mutation caused by the structure of the game itself, e.g. a turn-based
    /// action or a state-based action.
    Game,

    /// Mutation caused by a resolving spell or ability of the [CardId] card.
    Card(CardId),
}

pub trait HasSource {
    fn source(&self) -> Source;
}

impl HasSource for Source {
    fn source(&self) -> Source {
        *self
    }
}

impl HasSource for CardId {
    fn source(&self) -> Source {
        Source::Card(*self)
    }
}

/// Unique identifier for a game
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);
