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

use enum_kinds::EnumKind;
use serde::{Deserialize, Serialize};

use crate::core::numerics::{Damage, LifeValue};
use crate::core::primitives::{CardId, PlayerName};
use crate::game_states::game_phase_step::GamePhaseStep;

/// The recipient of damage.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum DamageTarget {
    Player(PlayerName),
    Permanent(CardId),
}

/// A game occurrence that triggered abilities listen for and replacement
/// effects may intercept.
///
/// Mutations construct the event that is *about* to happen, pass it through
/// the replacement registry, and then fire the final version at the trigger
/// registry once it has actually happened.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, EnumKind)]
#[enum_kind(GameEventKind, derive(Hash, Ord, PartialOrd, Serialize, Deserialize))]
pub enum GameEvent {
    EnteredBattlefield {
        card: CardId,
    },

    Died {
        card: CardId,
    },

    DamageDealt {
        source: CardId,
        target: DamageTarget,
        amount: Damage,
        combat: bool,
    },

    LifeLost {
        player: PlayerName,
        amount: LifeValue,
    },

    LifeGained {
        player: PlayerName,
        amount: LifeValue,
    },

    DrewCard {
        player: PlayerName,
    },

    Untapped {
        card: CardId,
    },

    StepBegan {
        step: GamePhaseStep,
        active_player: PlayerName,
    },

    AttackDeclared {
        attacker: CardId,
    },

    BlockDeclared {
        blocker: CardId,
        attacker: CardId,
    },

    DealtCombatDamageToPlayer {
        source: CardId,
        player: PlayerName,
    },

    SpellCast {
        card: CardId,
        controller: PlayerName,
    },

    SagaChapterBegan {
        card: CardId,
        chapter: u8,
    },

    DoorUnlocked {
        card: CardId,
        door: usize,
    },
}
