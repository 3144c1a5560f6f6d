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
use data::core::numerics::{Damage, LifeValue};
use data::core::primitives::{HasPlayerName, HasSource, PlayerName, Source};
use data::events::game_event::{DamageTarget, GameEvent};
use data::game_states::game_state::GameState;
use data::game_states::state_based_event::StateBasedEvent;
use data::player_states::player_state::PlayerQueries;
use tracing::debug;
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::abilities;
use crate::queries::card_queries;
use crate::replacement::{self, ReplacementOutcome};

/// Causes a player to lose life, e.g. from an effect or combat damage.
pub fn lose_life(
    game: &mut GameState,
    _source: impl HasSource,
    player: impl HasPlayerName,
    amount: LifeValue,
) -> Outcome {
    let player = player.player_name();
    if amount <= 0 {
        return outcome::OK;
    }
    let event = GameEvent::LifeLost { player, amount };
    if replacement::check(game, &event) == ReplacementOutcome::Prevented {
        return outcome::OK;
    }
    game.player_mut(player).life -= amount;
    game.add_state_based_event(StateBasedEvent::LifeTotalDecrease(player));
    abilities::fire_event(game, event);
    outcome::OK
}

/// Causes a player to gain life.
pub fn gain_life(
    game: &mut GameState,
    _source: impl HasSource,
    player: impl HasPlayerName,
    amount: LifeValue,
) -> Outcome {
    let player = player.player_name();
    if amount <= 0 {
        return outcome::OK;
    }
    game.player_mut(player).life += amount;
    abilities::fire_event(game, GameEvent::LifeGained { player, amount });
    outcome::OK
}

/// Deals damage to a player.
///
/// Damage from a source with infect gives poison counters instead of
/// causing life loss; lifelink gains the source's controller life.
pub fn deal_damage(
    game: &mut GameState,
    source: Source,
    player: PlayerName,
    damage: Damage,
    combat: bool,
) -> Outcome {
    if damage == 0 {
        return outcome::OK;
    }

    if let Source::Card(source_card) = source {
        let event = GameEvent::DamageDealt {
            source: source_card,
            target: DamageTarget::Player(player),
            amount: damage,
            combat,
        };
        if replacement::check(game, &event) == ReplacementOutcome::Prevented {
            return outcome::OK;
        }

        debug!(?source_card, ?player, damage, "Dealing damage to player");
        let keywords = card_queries::keywords(game, source_card);
        if keywords.contains(Keyword::Lifelink) {
            let controller = game.card(source_card).map(|card| card.controller);
            if let Some(controller) = controller {
                gain_life(game, source, controller, damage as i64)?;
            }
        }

        if keywords.contains(Keyword::Infect) {
            add_poison_counters(game, player, damage);
            abilities::fire_event(game, event);
            return outcome::OK;
        }

        lose_life(game, source, player, damage as i64)?;
        abilities::fire_event(game, event);
        if combat {
            abilities::fire_event(
                game,
                GameEvent::DealtCombatDamageToPlayer { source: source_card, player },
            );
        }
        return outcome::OK;
    }

    lose_life(game, source, player, damage as i64)
}

/// Gives a player poison counters.
///
/// See <https://yawgatog.com/resources/magic-rules/#R7045c>
pub fn add_poison_counters(game: &mut GameState, player: PlayerName, count: u64) {
    game.player_mut(player).counters.poison += count;
    game.add_state_based_event(StateBasedEvent::GainedPoisonCounters(player));
}
