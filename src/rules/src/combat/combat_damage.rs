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

use data::card_states::zones::ZoneQueries;
use data::core::keywords::Keyword;
use data::core::numerics::{power_to_damage, Damage};
use data::core::primitives::{CardId, PlayerName, Source, Zone};
use data::game_states::combat_state::{AttackTarget, BlockerMap, CombatState};
use data::game_states::game_state::GameState;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::{permanents, players};
use crate::queries::card_queries;

/// One assignment of combat damage, computed for all combatants before any
/// damage is dealt.
enum DamageAssignment {
    ToPlayer { source: CardId, player: PlayerName, amount: Damage },
    ToPlaneswalker { source: CardId, permanent: CardId, amount: Damage },
    ToCreature { source: CardId, creature: CardId, amount: Damage },
}

/// Deals combat damage for the current substep.
///
/// > 510.2. Second, all combat damage that's been assigned is dealt
/// > simultaneously. This turn-based action doesn't use the stack.
///
/// <https://yawgatog.com/resources/magic-rules/#R5102>
///
/// `first_strike` selects which creatures deal damage: only first and
/// double strikers in the first-strike step; everyone except pure first
/// strikers in the regular step.
#[instrument(name = "combat_damage_deal", level = "debug", skip(game))]
pub fn deal(game: &mut GameState, first_strike: bool) -> Outcome {
    let Some(CombatState::ConfirmedBlockers(blockers)) = game.combat.clone() else {
        return outcome::OK;
    };

    let mut assignments = vec![];
    assign_attacker_damage(game, &blockers, first_strike, &mut assignments);
    assign_blocker_damage(game, &blockers, first_strike, &mut assignments);

    for assignment in assignments {
        match assignment {
            DamageAssignment::ToPlayer { source, player, amount } => {
                players::deal_damage(game, Source::Card(source), player, amount, true)?;
            }
            DamageAssignment::ToPlaneswalker { source, permanent, amount }
            | DamageAssignment::ToCreature { source, creature: permanent, amount } => {
                permanents::deal_damage(game, Source::Card(source), permanent, amount, true)?;
            }
        }
    }
    outcome::OK
}

fn participates(game: &GameState, id: CardId, first_strike: bool) -> bool {
    let keywords = card_queries::keywords(game, id);
    if first_strike {
        keywords.contains(Keyword::FirstStrike) || keywords.contains(Keyword::DoubleStrike)
    } else {
        !keywords.contains(Keyword::FirstStrike) || keywords.contains(Keyword::DoubleStrike)
    }
}

fn alive_on_battlefield(game: &GameState, id: CardId) -> bool {
    game.card(id).is_some_and(|card| card.zone == Zone::Battlefield)
}

/// Attackers assign damage to their blockers in declaration order, with
/// deathtouch making any nonzero assignment lethal and trample sending the
/// excess to the defending player.
fn assign_attacker_damage(
    game: &GameState,
    blockers: &BlockerMap,
    first_strike: bool,
    assignments: &mut Vec<DamageAssignment>,
) {
    for (&attacker, target) in blockers.attackers.all() {
        if !alive_on_battlefield(game, attacker) || !participates(game, attacker, first_strike) {
            continue;
        }

        let keywords = card_queries::keywords(game, attacker);
        let mut remaining = power_to_damage(card_queries::power(game, attacker));
        if remaining == 0 {
            continue;
        }

        let Some(declared_blockers) = blockers.blocked_attackers.get(&attacker) else {
            push_defender_damage(assignments, attacker, *target, remaining);
            continue;
        };

        // Damage is assigned among blockers in declaration order. A blocker
        // which has already left combat (e.g. destroyed by first-strike
        // damage) still uses up its share of the assignment; the damage is
        // simply not dealt.
        let deathtouch = keywords.contains(Keyword::Deathtouch);
        let count = declared_blockers.len();
        for (index, blocker) in declared_blockers.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            // > 510.1c. ... that creature must be assigned lethal damage
            // > before any damage can be assigned to another recipient.
            let lethal: Damage = if deathtouch {
                1
            } else {
                card_queries::remaining_toughness(game, *blocker).max(1) as Damage
            };
            let is_last = index + 1 == count;
            let amount = if is_last && !keywords.contains(Keyword::Trample) {
                remaining
            } else {
                lethal.min(remaining)
            };
            if alive_on_battlefield(game, *blocker) {
                assignments.push(DamageAssignment::ToCreature {
                    source: attacker,
                    creature: *blocker,
                    amount,
                });
            }
            remaining -= amount;
        }

        if remaining > 0 && keywords.contains(Keyword::Trample) {
            // > 702.19e. ... the attacking creature's controller ... can
            // > assign the rest of its damage to the player or planeswalker
            // > the creature is attacking.
            push_defender_damage(assignments, attacker, *target, remaining);
        }
    }
}

fn push_defender_damage(
    assignments: &mut Vec<DamageAssignment>,
    attacker: CardId,
    target: AttackTarget,
    amount: Damage,
) {
    match target {
        AttackTarget::Player(player) => {
            assignments.push(DamageAssignment::ToPlayer { source: attacker, player, amount })
        }
        AttackTarget::Planeswalker(_, permanent) => assignments.push(
            DamageAssignment::ToPlaneswalker { source: attacker, permanent, amount },
        ),
    }
}

/// Each blocker assigns its damage to the attacker it blocked.
fn assign_blocker_damage(
    game: &GameState,
    blockers: &BlockerMap,
    first_strike: bool,
    assignments: &mut Vec<DamageAssignment>,
) {
    for (&blocker, &attacker) in &blockers.reverse_lookup {
        if !alive_on_battlefield(game, blocker)
            || !alive_on_battlefield(game, attacker)
            || !participates(game, blocker, first_strike)
        {
            continue;
        }
        let amount = power_to_damage(card_queries::power(game, blocker));
        if amount > 0 {
            debug!(?blocker, ?attacker, amount, "Blocker assigning damage");
            assignments.push(DamageAssignment::ToCreature {
                source: blocker,
                creature: attacker,
                amount,
            });
        }
    }
}
