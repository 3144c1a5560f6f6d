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

use data::card_definitions::card_filter::CardFilter;
use data::card_definitions::effect_definition::TargetSpec;
use data::card_states::card_state::ChosenTarget;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{CardId, CardType, PlayerName, StackItemId};
use data::game_states::game_state::GameState;
use enum_iterator::all;

use crate::queries::card_queries;

/// Enumerates the legal targets for one target requirement, in a
/// deterministic order.
///
/// The index of a target in this list is the stable parameter used by the
/// `ChooseTarget` action, so mask generation and action execution must both
/// go through this function.
pub fn candidates(
    game: &GameState,
    spec: &TargetSpec,
    controller: PlayerName,
    source: CardId,
) -> Vec<ChosenTarget> {
    match spec {
        TargetSpec::None | TargetSpec::Source | TargetSpec::Attached => vec![],

        TargetSpec::AnyTarget => {
            let mut result = battlefield_matching(game, controller, source, |game, id| {
                let types = card_queries::card_types(game, id);
                types.contains(CardType::Creature) || types.contains(CardType::Planeswalker)
            });
            result.extend(all::<PlayerName>().map(ChosenTarget::Player));
            result
        }

        TargetSpec::Permanent(filter) => {
            battlefield_matching(game, controller, source, |game, id| {
                card_queries::matches_filter(game, id, filter, controller, Some(source))
            })
        }

        TargetSpec::Player => all::<PlayerName>().map(ChosenTarget::Player).collect(),

        TargetSpec::Spell => game
            .stack()
            .iter()
            .filter_map(|item| match item {
                StackItemId::Card(id) if *id != source => {
                    let card = game.card(*id)?;
                    Some(ChosenTarget::Card { id: *id, object_id: card.object_id })
                }
                _ => None,
            })
            .collect(),
    }
}

fn battlefield_matching(
    game: &GameState,
    controller: PlayerName,
    source: CardId,
    predicate: impl Fn(&GameState, CardId) -> bool,
) -> Vec<ChosenTarget> {
    let mut result = vec![];
    for player in all::<PlayerName>() {
        for &id in game.battlefield(player) {
            if predicate(game, id) && card_queries::can_be_targeted_by(game, id, controller, source)
            {
                if let Some(card) = game.card(id) {
                    result.push(ChosenTarget::Card { id, object_id: card.object_id });
                }
            }
        }
    }
    result
}

/// Rechecks a chosen target's legality, as performed when the spell or
/// ability resolves.
///
/// See <https://yawgatog.com/resources/magic-rules/#R6081b>
pub fn still_legal(
    game: &GameState,
    target: &ChosenTarget,
    spec: &TargetSpec,
    controller: PlayerName,
    source: CardId,
) -> bool {
    if !game.target_still_exists(target) {
        return false;
    }
    match (target, spec) {
        (ChosenTarget::Player(_), _) => true,
        (ChosenTarget::Card { id, .. }, TargetSpec::Spell) => {
            game.stack().contains(&StackItemId::Card(*id))
        }
        (ChosenTarget::Card { id, .. }, TargetSpec::Permanent(filter)) => {
            card_queries::matches_filter(game, *id, filter, controller, Some(source))
                && card_queries::can_be_targeted_by(game, *id, controller, source)
        }
        (ChosenTarget::Card { id, .. }, TargetSpec::AnyTarget) => {
            let types = card_queries::card_types(game, *id);
            (types.contains(CardType::Creature) || types.contains(CardType::Planeswalker))
                && card_queries::can_be_targeted_by(game, *id, controller, source)
        }
        (ChosenTarget::Card { id, .. }, _) => {
            card_queries::matches_filter(
                game,
                *id,
                &CardFilter::default(),
                controller,
                Some(source),
            ) && card_queries::can_be_targeted_by(game, *id, controller, source)
        }
        (ChosenTarget::StackAbility(_), _) => true,
    }
}
