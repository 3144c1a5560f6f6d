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

use crate::card_states::card_state::ChosenTarget;
use crate::core::primitives::{AbilityNumber, CardId, PlayerName};

/// What a partially-specified spell or ability activation is.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PendingCastKind {
    /// Casting the card itself as a spell
    Spell,

    /// Casting the card's adventure half
    Adventure,

    /// Activating the card's ability with this number
    Ability(AbilityNumber),

    /// Activating a planeswalker loyalty ability by index
    LoyaltyAbility(usize),
}

/// A spell being cast or ability being activated for which the controller
/// still has choices to make (modes, X, targets) before it goes on the
/// stack.
///
/// Costs are paid and the object moves to the stack only once every choice
/// has been supplied; abandoning an unfinished cast has no game effect.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PendingCast {
    pub kind: PendingCastKind,

    pub card: CardId,

    pub controller: PlayerName,

    /// Mode indices chosen so far (spree modes)
    pub chosen_modes: Vec<usize>,

    /// True once mode selection is complete
    pub modes_confirmed: bool,

    pub chosen_x: Option<u64>,

    /// Targets chosen so far, in requirement order
    pub targets: Vec<ChosenTarget>,
}

/// A choice a player must make before the game can continue, outside of the
/// normal priority system.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PendingDecision {
    /// Choices for the in-progress cast in `GameState::pending_cast`
    CastChoices { player: PlayerName },

    /// Put pending triggers controlled by this player on the stack in an
    /// order of their choosing
    OrderTriggers { player: PlayerName },

    /// The legend rule: choose which of several identically-named legendary
    /// permanents to keep
    ChooseLegendToKeep { player: PlayerName, candidates: Vec<CardId> },

    /// Discard down to maximum hand size during cleanup
    DiscardToHandSize { player: PlayerName },
}

impl PendingDecision {
    pub fn player(&self) -> PlayerName {
        match self {
            PendingDecision::CastChoices { player } => *player,
            PendingDecision::OrderTriggers { player } => *player,
            PendingDecision::ChooseLegendToKeep { player, .. } => *player,
            PendingDecision::DiscardToHandSize { player } => *player,
        }
    }
}
