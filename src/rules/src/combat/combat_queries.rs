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

use data::card_states::card_state::TappedState;
use data::card_states::zones::ZoneQueries;
use data::core::keywords::Keyword;
use data::core::primitives::{CardId, CardType, Color, PlayerName, Zone};
use data::game_states::combat_state::{AttackerId, BlockerId, CombatState};
use data::game_states::game_state::GameState;

use crate::queries::card_queries;

/// True if this creature may legally be declared as an attacker.
///
/// > 508.1a. The chosen creatures must be untapped, ... and each one must
/// > either have haste or have been controlled by the active player
/// > continuously since the turn began.
///
/// <https://yawgatog.com/resources/magic-rules/#R5081a>
pub fn is_valid_attacker(game: &GameState, player: PlayerName, id: CardId) -> bool {
    let Some(card) = game.card(id) else {
        return false;
    };
    card.zone == Zone::Battlefield
        && card.controller == player
        && card.tapped_state == TappedState::Untapped
        && card_queries::is_creature(game, id)
        && !card_queries::has_summoning_sickness(game, id)
        && !card_queries::has_keyword(game, id, Keyword::Defender)
}

/// True if `blocker` may legally block `attacker`, considering evasion
/// abilities and protection.
pub fn can_block(
    game: &GameState,
    defender: PlayerName,
    blocker: BlockerId,
    attacker: AttackerId,
) -> bool {
    let Some(card) = game.card(blocker) else {
        return false;
    };
    if card.zone != Zone::Battlefield
        || card.controller != defender
        || card.tapped_state == TappedState::Tapped
        || !card_queries::is_creature(game, blocker)
    {
        return false;
    }

    let attacker_keywords = card_queries::keywords(game, attacker);
    let blocker_keywords = card_queries::keywords(game, blocker);

    if attacker_keywords.contains(Keyword::Unblockable) {
        return false;
    }
    if attacker_keywords.contains(Keyword::Flying)
        && !blocker_keywords.contains(Keyword::Flying)
        && !blocker_keywords.contains(Keyword::Reach)
    {
        return false;
    }
    if attacker_keywords.contains(Keyword::Shadow) != blocker_keywords.contains(Keyword::Shadow) {
        return false;
    }
    if attacker_keywords.contains(Keyword::Horsemanship)
        && !blocker_keywords.contains(Keyword::Horsemanship)
    {
        return false;
    }
    if attacker_keywords.contains(Keyword::Fear) {
        let blocker_colors = card_queries::colors(game, blocker);
        let blocker_types = card_queries::card_types(game, blocker);
        if !blocker_colors.contains(Color::Black) && !blocker_types.contains(CardType::Artifact) {
            return false;
        }
    }
    if attacker_keywords.contains(Keyword::Intimidate) {
        let shared = card_queries::colors(game, blocker) & card_queries::colors(game, attacker);
        let artifact = card_queries::card_types(game, blocker).contains(CardType::Artifact);
        if shared.is_empty() && !artifact {
            return false;
        }
    }
    if attacker_keywords.contains(Keyword::Skulk)
        && card_queries::power(game, blocker) > card_queries::power(game, attacker)
    {
        return false;
    }
    if attacker_keywords.contains(Keyword::Landwalk) {
        let walks = card_queries::keyword_grants(game, attacker).landwalks;
        let unblockable = walks.iter().any(|land| {
            game.battlefield(defender).iter().any(|&permanent| {
                card_queries::characteristics(game, permanent)
                    .is_some_and(|c| c.subtypes.lands.contains(*land))
            })
        });
        if unblockable {
            return false;
        }
    }
    if card_queries::has_protection_from(game, attacker, blocker) {
        return false;
    }

    true
}

/// True if a proposed block assignment satisfies menace.
///
/// > 702.111a. Menace means "This creature can't be blocked except by two
/// > or more creatures."
///
/// <https://yawgatog.com/resources/magic-rules/#R702111>
pub fn blocks_satisfy_menace(game: &GameState, blocks: &[(BlockerId, AttackerId)]) -> bool {
    let mut counts: std::collections::BTreeMap<AttackerId, usize> = Default::default();
    for (_, attacker) in blocks {
        *counts.entry(*attacker).or_default() += 1;
    }
    counts.iter().all(|(attacker, count)| {
        !card_queries::has_keyword(game, *attacker, Keyword::Menace) || *count >= 2
    })
}

/// True if any creature in the current combat deals first-strike damage,
/// requiring the first-strike combat damage step.
///
/// See <https://yawgatog.com/resources/magic-rules/#R5101a>
pub fn combat_requires_first_strike_step(game: &GameState) -> bool {
    let Some(CombatState::ConfirmedBlockers(blockers)) = &game.combat else {
        return false;
    };
    let attackers = blockers.attackers.all_attackers();
    let blocking: Vec<BlockerId> = blockers.reverse_lookup.keys().copied().collect();
    attackers.chain(blocking).any(|id| {
        let keywords = card_queries::keywords(game, id);
        keywords.contains(Keyword::FirstStrike) || keywords.contains(Keyword::DoubleStrike)
    })
}
