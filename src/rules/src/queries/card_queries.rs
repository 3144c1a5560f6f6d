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

use data::card_definitions::card_filter::{CardFilter, ControllerRestriction};
use data::card_states::card_state::CardState;
use data::card_states::counters::CounterKind;
use data::card_states::zones::ZoneQueries;
use data::core::keywords::{Keyword, KeywordGrants, ProtectionFrom};
use data::core::numerics::{Power, Toughness};
use data::core::primitives::{CardId, CardType, Color, HasCardId, PlayerName, StackItemId, Zone};
use data::effects::characteristics::CalculatedCharacteristics;
use data::game_states::game_state::GameState;
use enumset::EnumSet;

/// Current characteristics of a card, after continuous effects.
///
/// Battlefield cards carry the result of the most recent layer application;
/// cards elsewhere report printed characteristics plus counters.
pub fn characteristics(game: &GameState, id: impl HasCardId) -> Option<CalculatedCharacteristics> {
    let card = game.card(id)?;
    if let Some(derived) = &card.derived {
        return Some(derived.clone());
    }
    Some(base_with_counters(card))
}

/// Characteristics ignoring the layer pipeline: printed values plus
/// counter adjustments.
pub fn base_with_counters(card: &CardState) -> CalculatedCharacteristics {
    let mut characteristics = CalculatedCharacteristics::base(card.current_face(), card.controller);
    let plus = card.counters.count(CounterKind::PlusOnePlusOne) as i64;
    let minus = card.counters.count(CounterKind::MinusOneMinusOne) as i64;
    characteristics.power += plus - minus;
    characteristics.toughness += plus - minus;
    characteristics
}

pub fn power(game: &GameState, id: impl HasCardId) -> Power {
    characteristics(game, id).map(|c| c.power).unwrap_or(0)
}

pub fn toughness(game: &GameState, id: impl HasCardId) -> Toughness {
    characteristics(game, id).map(|c| c.toughness).unwrap_or(0)
}

pub fn card_types(game: &GameState, id: impl HasCardId) -> EnumSet<CardType> {
    characteristics(game, id).map(|c| c.card_types).unwrap_or_default()
}

pub fn colors(game: &GameState, id: impl HasCardId) -> EnumSet<Color> {
    characteristics(game, id).map(|c| c.colors).unwrap_or_default()
}

pub fn keywords(game: &GameState, id: impl HasCardId) -> EnumSet<Keyword> {
    characteristics(game, id).map(|c| c.keywords).unwrap_or_default()
}

pub fn keyword_grants(game: &GameState, id: impl HasCardId) -> KeywordGrants {
    characteristics(game, id).map(|c| c.keyword_grants).unwrap_or_default()
}

pub fn has_keyword(game: &GameState, id: CardId, keyword: Keyword) -> bool {
    keywords(game, id).contains(keyword)
}

pub fn is_creature(game: &GameState, id: CardId) -> bool {
    card_types(game, id).contains(CardType::Creature)
}

/// True if this creature entered the battlefield under its controller's
/// control after the start of their most recent turn and lacks haste.
///
/// See <https://yawgatog.com/resources/magic-rules/#R3025>
pub fn has_summoning_sickness(game: &GameState, id: CardId) -> bool {
    let Some(card) = game.card(id) else {
        return false;
    };
    card.zone == Zone::Battlefield
        && card.entered_current_zone == game.turn
        && !has_keyword(game, id, Keyword::Haste)
}

/// Damage required to destroy this creature, accounting for damage already
/// marked.
pub fn remaining_toughness(game: &GameState, id: CardId) -> Toughness {
    let toughness = toughness(game, id);
    let damage = game.card(id).map(|card| card.damage).unwrap_or(0);
    toughness - damage as i64
}

/// True if the card matches a structural filter, evaluated relative to the
/// filter controller's perspective.
pub fn matches_filter(
    game: &GameState,
    id: CardId,
    filter: &CardFilter,
    filter_controller: PlayerName,
    source: Option<CardId>,
) -> bool {
    let Some(card) = game.card(id) else {
        return false;
    };
    let Some(characteristics) = characteristics(game, id) else {
        return false;
    };

    if filter.exclude_source && source == Some(id) {
        return false;
    }
    if !filter.card_types.is_empty() && filter.card_types.is_disjoint(characteristics.card_types) {
        return false;
    }
    if let Some(subtype) = &filter.subtype {
        let is_changeling = characteristics.has(Keyword::Changeling);
        if !characteristics.subtypes.contains(subtype) && !is_changeling {
            return false;
        }
    }
    if let Some(restriction) = filter.controller {
        let matches = match restriction {
            ControllerRestriction::You => card.controller == filter_controller,
            ControllerRestriction::Opponent => card.controller != filter_controller,
        };
        if !matches {
            return false;
        }
    }
    if !filter.colors.is_empty() && filter.colors.is_disjoint(characteristics.colors) {
        return false;
    }
    true
}

/// True if the permanent has protection from the given source card's
/// colors, or from creatures when the source is a creature.
pub fn has_protection_from(game: &GameState, id: CardId, source: CardId) -> bool {
    let grants = keyword_grants(game, id);
    if grants.protections.is_empty() {
        return false;
    }
    let source_colors = colors(game, source);
    let source_is_creature = is_creature(game, source);
    grants.protections.iter().any(|protection| match protection {
        ProtectionFrom::Color(color) => source_colors.contains(*color),
        ProtectionFrom::AllColors => !source_colors.is_empty(),
        ProtectionFrom::Creatures => source_is_creature,
        ProtectionFrom::Everything => true,
    })
}

/// True if any item on the stack has split second, which suppresses all
/// player actions other than mana abilities.
///
/// See <https://yawgatog.com/resources/magic-rules/#R7024>
pub fn stack_has_split_second(game: &GameState) -> bool {
    game.stack().iter().any(|item| match item {
        StackItemId::Card(id) => has_keyword(game, *id, Keyword::SplitSecond),
        StackItemId::Ability(_) => false,
    })
}

/// True if a spell or ability controlled by `player` could target this
/// permanent, considering hexproof, shroud, and protection.
pub fn can_be_targeted_by(game: &GameState, id: CardId, player: PlayerName, source: CardId) -> bool {
    let Some(card) = game.card(id) else {
        return false;
    };
    let keywords = keywords(game, id);
    if keywords.contains(Keyword::Shroud) {
        return false;
    }
    if keywords.contains(Keyword::Hexproof) && card.controller != player {
        return false;
    }
    if has_protection_from(game, id, source) {
        return false;
    }
    true
}
