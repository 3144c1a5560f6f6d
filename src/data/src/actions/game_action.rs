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

use crate::core::primitives::{AbilityNumber, CardId};
use crate::game_states::combat_state::{AttackerId, BlockerId};

/// Actions within a combat phase
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CombatAction {
    /// Adds a creature to the proposed attack, attacking the defending
    /// player.
    DeclareAttacker(AttackerId),

    /// Lock in the current set of proposed attacks for the declare
    /// attackers step.
    ConfirmAttackers,

    /// Proposes blocking `attacker` with `blocker`.
    DeclareBlocker { blocker: BlockerId, attacker: AttackerId },

    /// Lock in the blocking decisions for the declare blockers step.
    ConfirmBlockers,
}

impl From<CombatAction> for GameAction {
    fn from(value: CombatAction) -> Self {
        GameAction::CombatAction(value)
    }
}

/// Responses to a pending decision or an in-progress cast.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PromptAction {
    /// Shuffle the hand away and draw a new one
    Mulligan,

    /// Keep the current hand
    KeepHand,

    /// Put this card on the bottom of the library after a mulligan
    BottomCard(CardId),

    /// Add the mode with this index to the in-progress cast
    ChooseMode(usize),

    /// Stop adding modes to the in-progress cast
    ConfirmModes,

    /// Choose this value for X for the in-progress cast
    ChooseX(u64),

    /// Choose the candidate target with this index for the in-progress cast
    ChooseTarget(usize),

    /// Put the pending trigger with this index on the stack next
    OrderTrigger(usize),

    /// Keep this permanent for the legend rule; other copies go to the
    /// graveyard
    ChooseLegend(CardId),

    /// Discard this card during the cleanup step
    Discard(CardId),
}

impl From<PromptAction> for GameAction {
    fn from(value: PromptAction) -> Self {
        GameAction::PromptAction(value)
    }
}

/// An atomic action a player can take when it is their turn to act.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Pass priority on the current stack item or game step.
    ///
    /// > If all players pass in succession (that is, if all players pass
    /// > without taking any actions in between passing), the spell or
    /// > ability on top of the stack resolves or, if the stack is empty,
    /// > the phase or step ends.
    ///
    /// <https://yawgatog.com/resources/magic-rules/#R1174>
    PassPriority,

    /// Immediately lose the game.
    ///
    /// <https://yawgatog.com/resources/magic-rules/#R1043a>
    Concede,

    /// Play a land from hand as a special action
    PlayLand(CardId),

    /// Begin casting a spell from hand.
    ///
    /// The player will be prompted for modes, X, and targets as needed
    /// before costs are paid and the spell moves to the stack.
    CastSpell(CardId),

    /// Begin casting the adventure half of a card in hand
    CastAdventure(CardId),

    /// Begin activating an ability of a permanent
    ActivateAbility { card: CardId, number: AbilityNumber },

    /// Begin activating a planeswalker loyalty ability by index
    ActivateLoyaltyAbility { card: CardId, index: usize },

    /// Pay a Class card's cost to advance it to the next level
    LevelUp(CardId),

    /// Pay to unlock a door of a Room card
    UnlockDoor { card: CardId, door: usize },

    /// Pay a cost-transform permanent's cost to turn it over
    TransformCard(CardId),

    /// Take an action within a combat phase
    CombatAction(CombatAction),

    /// Respond to a pending decision
    PromptAction(PromptAction),
}
