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

use data::actions::game_action::CombatAction;
use data::core::keywords::Keyword;
use data::core::primitives::{PlayerName, Source};
use data::events::game_event::GameEvent;
use data::game_states::combat_state::{
    AttackTarget, AttackerId, BlockerId, BlockerMap, CombatState, ProposedBlockers,
};
use data::game_states::game_state::GameState;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::Outcome;

use crate::combat::combat_queries;
use crate::mutations::{abilities, permanents};
use crate::queries::card_queries;

/// Executes a combat action for the given player.
#[instrument(name = "combat_actions_execute", level = "debug", skip(game))]
pub fn execute(game: &mut GameState, player: PlayerName, action: CombatAction) -> Outcome {
    match action {
        CombatAction::DeclareAttacker(attacker) => declare_attacker(game, player, attacker),
        CombatAction::ConfirmAttackers => confirm_attackers(game, player),
        CombatAction::DeclareBlocker { blocker, attacker } => {
            declare_blocker(game, player, blocker, attacker)
        }
        CombatAction::ConfirmBlockers => confirm_blockers(game, player),
    }
}

fn declare_attacker(game: &mut GameState, player: PlayerName, attacker: AttackerId) -> Outcome {
    let defender = player.opponent();
    let Some(CombatState::ProposingAttackers(attackers)) = &mut game.combat else {
        return outcome::OK;
    };
    if attackers.contains(attacker) {
        attackers.remove(attacker);
    } else {
        attackers.insert(attacker, AttackTarget::Player(defender));
    }
    outcome::OK
}

/// Locks in the proposed attack.
///
/// Attackers tap unless they have vigilance; attack triggers fire.
///
/// > 508.1f. The active player taps the chosen creatures.
///
/// <https://yawgatog.com/resources/magic-rules/#R5081>
fn confirm_attackers(game: &mut GameState, player: PlayerName) -> Outcome {
    let Some(CombatState::ProposingAttackers(attackers)) = game.combat.take() else {
        return outcome::OK;
    };

    for attacker in attackers.all_attackers() {
        if !card_queries::has_keyword(game, attacker, Keyword::Vigilance) {
            permanents::tap(game, Source::Game, attacker)?;
        }
        game.this_turn.attacked_this_turn.insert(attacker);
        game.this_turn.counters.get_mut(player).creatures_attacked += 1;
    }

    debug!(?player, count = attackers.len(), "Attackers confirmed");
    let attacker_ids: Vec<AttackerId> = attackers.all_attackers().collect();
    game.combat = Some(CombatState::ConfirmedAttackers(attackers));
    for attacker in attacker_ids {
        abilities::fire_event(game, GameEvent::AttackDeclared { attacker });
    }

    game.priority = game.turn.active_player;
    game.clear_passed();
    outcome::OK
}

fn declare_blocker(
    game: &mut GameState,
    player: PlayerName,
    blocker: BlockerId,
    attacker: AttackerId,
) -> Outcome {
    let Some(CombatState::ProposingBlockers(blockers)) = &mut game.combat else {
        return outcome::OK;
    };
    if blockers.defender != player || !blockers.attackers.contains(attacker) {
        return outcome::OK;
    }
    if let Some(position) =
        blockers.proposed_blocks.iter().position(|(b, a)| *b == blocker && *a == attacker)
    {
        blockers.proposed_blocks.remove(position);
    } else {
        blockers.proposed_blocks.retain(|(b, _)| *b != blocker);
        blockers.proposed_blocks.push((blocker, attacker));
    }
    outcome::OK
}

/// Locks in the proposed blocks, producing the final [BlockerMap] used for
/// damage assignment.
fn confirm_blockers(game: &mut GameState, player: PlayerName) -> Outcome {
    let Some(CombatState::ProposingBlockers(mut proposed)) = game.combat.take() else {
        return outcome::OK;
    };
    if proposed.defender != player {
        game.combat = Some(CombatState::ProposingBlockers(proposed));
        return outcome::OK;
    }

    // Blocks which fail menace are dropped rather than rejected, so that
    // confirming (or passing) always produces a legal block assignment.
    if !combat_queries::blocks_satisfy_menace(game, &proposed.proposed_blocks) {
        let mut counts: BTreeMap<AttackerId, usize> = BTreeMap::new();
        for (_, attacker) in &proposed.proposed_blocks {
            *counts.entry(*attacker).or_default() += 1;
        }
        let blocks = proposed.proposed_blocks.clone();
        proposed.proposed_blocks = blocks
            .into_iter()
            .filter(|(_, attacker)| {
                !card_queries::has_keyword(game, *attacker, Keyword::Menace)
                    || counts.get(attacker).copied().unwrap_or_default() >= 2
            })
            .collect();
    }

    let blocker_map = build_blocker_map(&proposed);
    let block_events: Vec<(BlockerId, AttackerId)> = proposed.proposed_blocks.clone();
    debug!(?player, blocks = block_events.len(), "Blockers confirmed");
    game.combat = Some(CombatState::ConfirmedBlockers(blocker_map));

    for (blocker, attacker) in block_events {
        abilities::fire_event(game, GameEvent::BlockDeclared { blocker, attacker });
    }

    game.priority = game.turn.active_player;
    game.clear_passed();
    outcome::OK
}

fn build_blocker_map(proposed: &ProposedBlockers) -> BlockerMap {
    let mut blocked_attackers: BTreeMap<AttackerId, Vec<BlockerId>> = BTreeMap::new();
    let mut reverse_lookup: BTreeMap<BlockerId, AttackerId> = BTreeMap::new();
    for (blocker, attacker) in &proposed.proposed_blocks {
        blocked_attackers.entry(*attacker).or_default().push(*blocker);
        reverse_lookup.insert(*blocker, *attacker);
    }
    BlockerMap { attackers: proposed.attackers.clone(), blocked_attackers, reverse_lookup }
}

/// True if the player may confirm the current proposal.
pub fn can_confirm(game: &GameState, player: PlayerName) -> bool {
    match &game.combat {
        Some(CombatState::ProposingAttackers(attackers)) => {
            game.turn.active_player == player
                && attackers
                    .all_attackers()
                    .all(|attacker| combat_queries::is_valid_attacker(game, player, attacker))
        }
        Some(CombatState::ProposingBlockers(blockers)) => {
            blockers.defender == player
                && combat_queries::blocks_satisfy_menace(game, &blockers.proposed_blocks)
        }
        _ => false,
    }
}
