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

use data::card_states::card_state::{CardFacing, CardKind, TappedState};
use data::card_states::counters::CounterKind;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{CardId, CardType, HasCardId, HasSource, Zone};
use data::events::game_event::GameEvent;
use data::game_states::game_state::GameState;
use data::game_states::state_based_event::StateBasedEvent;
use data::printed_cards::printed_primitives::PrintedLoyalty;
use oracle::ability_parser::ParsedReplacement;
use oracle::card_parser;
use tracing::debug;
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::abilities;
use crate::replacement;

/// Moves a card to a new zone, updating indices, assigning a new object id,
/// and firing all relevant events.
///
/// The card is added as the top card of the target zone if it is ordered.
/// Moving a card off the battlefield resets its temporary state per rules
/// 613 and 614: counters, damage, attachments, face orientation.
pub fn run(
    game: &mut GameState,
    _source: impl HasSource,
    id: impl HasCardId,
    zone: Zone,
) -> Outcome {
    let id = id.card_id();
    let Some(card) = game.card(id) else {
        return outcome::OK;
    };
    let old_zone = card.zone;
    debug!(?id, ?old_zone, ?zone, "Moving card to zone");

    // > 614.6. If an event is replaced, it never happens. A modified event
    // > occurs instead.
    // <https://yawgatog.com/resources/magic-rules/#R6146>
    let mut destination = zone;
    if old_zone == Zone::Battlefield
        && zone == Zone::Graveyard
        && replacement::dies_to_exile(game, id)
    {
        destination = Zone::Exiled;
    }

    on_leave_zone(game, id, old_zone);
    let turn = game.turn;
    game.zones.move_card(id, destination, turn);
    on_enter_zone(game, id, destination, old_zone);
    outcome::OK
}

fn on_leave_zone(game: &mut GameState, id: CardId, zone: Zone) {
    match zone {
        Zone::Stack => {
            if let Some(card) = game.card_mut(id) {
                card.targets.clear();
                card.chosen_modes.clear();
                card.chosen_x = None;
            }
        }
        Zone::Battlefield => {
            abilities::unregister(game, id);

            // Detach anything attached to this permanent and detach it from
            // its own host.
            let attachments = game.card(id).map(|card| card.attachments.clone()).unwrap_or_default();
            for attachment in attachments {
                if let Some(card) = game.card_mut(attachment) {
                    card.attached_to = None;
                }
                abilities::refresh_attachment_effects(game, attachment);
                game.add_state_based_event(StateBasedEvent::AttachmentChanged(attachment));
            }
            let host = game.card(id).and_then(|card| card.attached_to);
            if let Some(host) = host {
                if let Some(card) = game.card_mut(host) {
                    card.attachments.retain(|existing| *existing != id);
                }
            }

            if let Some(card) = game.card_mut(id) {
                card.tapped_state = TappedState::Untapped;
                card.damage = 0;
                card.damaged_by_deathtouch = false;
                card.counters.clear();
                card.attached_to = None;
                card.attachments.clear();
                card.facing = CardFacing::FaceUp(0);
                card.class_level = 1;
                card.unlocked_doors.clear();
                card.loyalty_activated_this_turn = false;
                card.derived = None;
            }
            game.effects.invalidate_cache();
        }
        _ => {}
    }
}

fn on_enter_zone(game: &mut GameState, id: CardId, zone: Zone, old_zone: Zone) {
    match zone {
        Zone::Battlefield => on_enter_battlefield(game, id),
        Zone::Graveyard if old_zone == Zone::Battlefield => {
            abilities::fire_event(game, GameEvent::Died { card: id });
        }
        _ => {}
    }

    let Some(card) = game.card(id) else {
        return;
    };
    if card.kind == CardKind::Token && zone != Zone::Battlefield {
        game.add_state_based_event(StateBasedEvent::TokenLeftBattlefield(id));
    }
}

fn on_enter_battlefield(game: &mut GameState, id: CardId) {
    let Some(card) = game.card(id) else {
        return;
    };
    let face = card.current_face().clone();

    // Enter-the-battlefield replacements modify how the permanent arrives.
    for replacement in card_parser::face_replacements(&face) {
        match replacement {
            ParsedReplacement::EntersTapped => {
                if let Some(card) = game.card_mut(id) {
                    card.tapped_state = TappedState::Tapped;
                }
            }
            ParsedReplacement::EntersWithCounters(count) => {
                if let Some(card) = game.card_mut(id) {
                    card.counters.add(CounterKind::PlusOnePlusOne, count);
                }
            }
            _ => {}
        }
    }

    if face.card_types.contains(CardType::Planeswalker) {
        let loyalty = match face.loyalty {
            Some(PrintedLoyalty::Fixed(loyalty)) => loyalty,
            _ => 0,
        };
        if let Some(card) = game.card_mut(id) {
            card.counters.set(CounterKind::Loyalty, loyalty);
        }
    }

    abilities::register_battlefield_abilities(game, id);
    abilities::register_variant_abilities(game, id);

    if face.is_legendary() {
        game.add_state_based_event(StateBasedEvent::LegendaryPermanentEntered(id));
    }

    game.this_turn.entered_this_turn.insert(id);
    game.effects.invalidate_cache();
    abilities::fire_event(game, GameEvent::EnteredBattlefield { card: id });
}
