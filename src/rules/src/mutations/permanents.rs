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

use data::card_states::card_state::{CardFacing, TappedState};
use data::card_states::counters::CounterKind;
use data::card_states::zones::ZoneQueries;
use data::core::keywords::Keyword;
use data::core::numerics::Damage;
use data::core::primitives::{CardId, CardType, HasSource, Source, Zone};
use data::events::game_event::{DamageTarget, GameEvent};
use data::game_states::game_state::GameState;
use data::game_states::state_based_event::StateBasedEvent;
use tracing::debug;
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::{abilities, move_card, players};
use crate::queries::card_queries;
use crate::replacement::{self, ReplacementOutcome};

/// Taps a permanent.
pub fn tap(game: &mut GameState, _source: impl HasSource, id: CardId) -> Outcome {
    if let Some(card) = game.card_mut(id) {
        if card.zone == Zone::Battlefield {
            card.tapped_state = TappedState::Tapped;
        }
    }
    outcome::OK
}

/// Untaps a permanent, unless a replacement effect keeps it tapped.
pub fn untap(game: &mut GameState, _source: impl HasSource, id: CardId) -> Outcome {
    let event = GameEvent::Untapped { card: id };
    if replacement::check(game, &event) == ReplacementOutcome::Prevented {
        return outcome::OK;
    }
    if let Some(card) = game.card_mut(id) {
        card.tapped_state = TappedState::Untapped;
    }
    abilities::fire_event(game, event);
    outcome::OK
}

/// Deals non-combat or combat damage to a permanent.
///
/// Damage to creatures is marked and checked by state-based actions;
/// damage to planeswalkers removes loyalty counters. Lifelink damage gains
/// its source's controller that much life.
pub fn deal_damage(
    game: &mut GameState,
    source: Source,
    id: CardId,
    damage: Damage,
    combat: bool,
) -> Outcome {
    if damage == 0 {
        return outcome::OK;
    }
    let Some(source_card) = (match source {
        Source::Card(card) => Some(card),
        Source::Game => None,
    }) else {
        return mark_damage(game, id, damage, false);
    };

    if card_queries::has_protection_from(game, id, source_card) {
        return outcome::OK;
    }

    let event = GameEvent::DamageDealt {
        source: source_card,
        target: DamageTarget::Permanent(id),
        amount: damage,
        combat,
    };
    if replacement::check(game, &event) == ReplacementOutcome::Prevented {
        return outcome::OK;
    }

    debug!(?source_card, ?id, damage, "Dealing damage to permanent");
    let keywords = card_queries::keywords(game, source_card);
    if keywords.contains(Keyword::Lifelink) {
        let controller = game.card(source_card).map(|card| card.controller);
        if let Some(controller) = controller {
            players::gain_life(game, source, controller, damage as i64)?;
        }
    }

    if card_queries::card_types(game, id).contains(CardType::Planeswalker) {
        if let Some(card) = game.card_mut(id) {
            card.counters.remove(CounterKind::Loyalty, damage);
        }
        game.add_state_based_event(StateBasedEvent::PlaneswalkerLostLoyalty(id));
        abilities::fire_event(game, event);
        return outcome::OK;
    }

    mark_damage(game, id, damage, keywords.contains(Keyword::Deathtouch))?;
    abilities::fire_event(game, event);
    outcome::OK
}

fn mark_damage(game: &mut GameState, id: CardId, damage: Damage, deathtouch: bool) -> Outcome {
    if let Some(card) = game.card_mut(id) {
        card.damage += damage;
        card.damaged_by_deathtouch |= deathtouch;
    }
    game.add_state_based_event(if deathtouch {
        StateBasedEvent::CreatureDamagedByDeathtouch(id)
    } else {
        StateBasedEvent::CreatureDamaged(id)
    });
    outcome::OK
}

/// Adds counters to a permanent.
pub fn add_counters(
    game: &mut GameState,
    _source: impl HasSource,
    id: CardId,
    kind: CounterKind,
    count: u64,
) -> Outcome {
    if let Some(card) = game.card_mut(id) {
        card.counters.add(kind, count);
    }
    game.add_state_based_event(StateBasedEvent::CountersAdded(id));
    if kind == CounterKind::MinusOneMinusOne {
        game.add_state_based_event(StateBasedEvent::CreatureToughnessChanged(id));
    }
    game.effects.invalidate_cache();
    outcome::OK
}

/// Sacrifices a permanent.
pub fn sacrifice(game: &mut GameState, source: impl HasSource, id: CardId) -> Outcome {
    move_card::run(game, source, id, Zone::Graveyard)
}

/// Attaches an aura or equipment to a host permanent, re-registering its
/// attachment-dependent effects.
pub fn attach(game: &mut GameState, _source: impl HasSource, id: CardId, host: CardId) -> Outcome {
    let old_host = game.card(id).and_then(|card| card.attached_to);
    if let Some(old_host) = old_host {
        if let Some(card) = game.card_mut(old_host) {
            card.attachments.retain(|existing| *existing != id);
        }
    }
    if let Some(card) = game.card_mut(id) {
        card.attached_to = Some(host);
    }
    if let Some(card) = game.card_mut(host) {
        card.attachments.push(id);
    }
    abilities::refresh_attachment_effects(game, id);
    game.add_state_based_event(StateBasedEvent::AttachmentChanged(id));
    outcome::OK
}

/// Turns a transforming double-faced permanent to its other face.
///
/// Characteristics are re-derived from the new face on the next layer
/// application.
pub fn transform(game: &mut GameState, _source: impl HasSource, id: CardId) -> Outcome {
    let Some(card) = game.card(id) else {
        return outcome::OK;
    };
    if !card.printed().is_transforming_dfc() {
        return outcome::OK;
    }
    let next_face = 1 - card.face_index().min(1);
    if let Some(card) = game.card_mut(id) {
        card.facing = CardFacing::FaceUp(next_face);
    }
    abilities::refresh_attachment_effects(game, id);
    game.effects.invalidate_cache();
    outcome::OK
}
