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
use data::core::primitives::{CardId, PlayerName};
use data::effects::replacement::{ReplacementAction, ReplacementScope};
use data::events::game_event::{DamageTarget, GameEvent, GameEventKind};
use data::game_states::game_state::GameState;

use crate::queries::card_queries;

/// The result of consulting the replacement registry for an event.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReplacementOutcome {
    /// No effect applies; perform the event as proposed
    Unchanged,

    /// The event is replaced by nothing
    Prevented,
}

/// Checks whether any replacement effect prevents the proposed event.
///
/// Effects are consulted in timestamp order. When several effects could
/// apply to the same event, the affected object's controller's effects are
/// applied in registration order rather than by an interactive choice,
/// which keeps self-play deterministic.
///
/// See <https://yawgatog.com/resources/magic-rules/#R6161>
pub fn check(game: &GameState, event: &GameEvent) -> ReplacementOutcome {
    let kind = GameEventKind::from(event);
    for effect in game.effects.replacements_for(kind) {
        if !scope_matches(game, &effect.scope, effect.source, effect.controller, event) {
            continue;
        }
        match &effect.action {
            ReplacementAction::SkipUntap if kind == GameEventKind::Untapped => {
                return ReplacementOutcome::Prevented;
            }
            ReplacementAction::PreventDamage if kind == GameEventKind::DamageDealt => {
                return ReplacementOutcome::Prevented;
            }
            _ => {}
        }
    }
    ReplacementOutcome::Unchanged
}

/// True if a "dies" event for this card is replaced by exiling it.
pub fn dies_to_exile(game: &GameState, id: CardId) -> bool {
    game.effects.replacements_for(GameEventKind::Died).iter().any(|effect| {
        effect.source == id && effect.action == ReplacementAction::DiesToExileInstead
    })
}

fn scope_matches(
    game: &GameState,
    scope: &ReplacementScope,
    source: CardId,
    controller: PlayerName,
    event: &GameEvent,
) -> bool {
    let affected_card = match event {
        GameEvent::EnteredBattlefield { card }
        | GameEvent::Died { card }
        | GameEvent::Untapped { card } => Some(*card),
        GameEvent::DamageDealt { target: DamageTarget::Permanent(card), .. } => Some(*card),
        GameEvent::DamageDealt { target: DamageTarget::Player(player), .. }
        | GameEvent::LifeLost { player, .. }
        | GameEvent::DrewCard { player } => {
            return matches!(scope, ReplacementScope::Controller) && *player == controller;
        }
        _ => None,
    };

    match scope {
        ReplacementScope::Source => affected_card == Some(source),
        ReplacementScope::Controller => false,
        ReplacementScope::Filter(filter) => affected_card.is_some_and(|card| {
            game.card(card).is_some()
                && card_queries::matches_filter(game, card, filter, controller, Some(source))
        }),
    }
}
