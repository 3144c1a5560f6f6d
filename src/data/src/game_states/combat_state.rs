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

use std::collections::BTreeMap;

use enum_kinds::EnumKind;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{CardId, PlayerName};

/// Entity which has been declared as an attacker
pub type AttackerId = CardId;

/// Entity which has been declared as a blocker
pub type BlockerId = CardId;

/// Possible entities a creature may attack
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AttackTarget {
    Player(PlayerName),
    Planeswalker(PlayerName, CardId),
}

impl AttackTarget {
    pub fn defending_player(&self) -> PlayerName {
        match self {
            Self::Player(player) => *player,
            Self::Planeswalker(player, _) => *player,
        }
    }
}

/// Represents declared attacks within a combat phase
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AttackerMap {
    attacks: BTreeMap<AttackerId, AttackTarget>,
}

impl AttackerMap {
    pub fn contains(&self, attacker: AttackerId) -> bool {
        self.attacks.contains_key(&attacker)
    }

    pub fn insert(&mut self, attacker: AttackerId, target: AttackTarget) {
        self.attacks.insert(attacker, target);
    }

    pub fn remove(&mut self, attacker: AttackerId) {
        self.attacks.remove(&attacker);
    }

    /// Iterator over all declared attackers
    pub fn all_attackers(&self) -> impl Iterator<Item = AttackerId> + '_ {
        self.attacks.keys().copied()
    }

    pub fn all(&self) -> impl Iterator<Item = (&AttackerId, &AttackTarget)> + '_ {
        self.attacks.iter()
    }

    pub fn get_target(&self, attacker: AttackerId) -> Option<AttackTarget> {
        self.attacks.get(&attacker).copied()
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

/// Blocks the defending player is considering
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProposedBlockers {
    /// The player who is proposing blockers
    pub defender: PlayerName,

    /// Attacking creatures
    pub attackers: AttackerMap,

    /// Current proposed blocks, in declaration order.
    ///
    /// Declaration order is also the order in which the attacking player
    /// assigns combat damage among multiple blockers.
    pub proposed_blocks: Vec<(BlockerId, AttackerId)>,
}

/// Finalized blocking assignments.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockerMap {
    /// All declared attackers along with their attack targets
    pub attackers: AttackerMap,

    /// Blockers for each blocked attacker, in declaration order.
    ///
    /// The attacking player assigns combat damage among these blockers in
    /// this order. A blocker is retained here even if it subsequently
    /// leaves the battlefield.
    pub blocked_attackers: BTreeMap<AttackerId, Vec<BlockerId>>,

    /// Map from blocker to the attacker that creature is blocking
    pub reverse_lookup: BTreeMap<BlockerId, AttackerId>,
}

/// Tracks the state of creatures participating in a combat phase
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, EnumKind)]
#[enum_kind(CombatStateKind)]
pub enum CombatState {
    /// The active player is selecting attackers and has currently picked
    /// this set of creatures to attack the indicated [AttackTarget]s.
    ProposingAttackers(AttackerMap),

    /// The active player has confirmed this set of attackers, and it has
    /// been validated as a legal attack.
    ConfirmedAttackers(AttackerMap),

    /// The defending player is selecting blockers and has currently picked
    /// this set of blockers.
    ProposingBlockers(ProposedBlockers),

    /// The defending player has confirmed this set of blockers, and it has
    /// been validated as legal.
    ConfirmedBlockers(BlockerMap),
}

impl CombatState {
    pub fn kind(&self) -> CombatStateKind {
        self.into()
    }

    /// Returns all confirmed attackers for this combat state, or None if
    /// attackers have not yet been confirmed.
    pub fn confirmed_attackers(&self) -> Option<&AttackerMap> {
        match self {
            Self::ProposingAttackers(_) => None,
            Self::ConfirmedAttackers(attackers) => Some(attackers),
            Self::ProposingBlockers(blockers) => Some(&blockers.attackers),
            Self::ConfirmedBlockers(blockers) => Some(&blockers.attackers),
        }
    }
}
