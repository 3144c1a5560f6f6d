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

use std::str::FromStr;

use data::core::primitives::{CardSupertype, CardType};
use data::printed_cards::card_subtypes::{CardSubtypes, LandType};
use enumset::EnumSet;

/// The parsed parts of a type line.
#[derive(Debug, Clone, Default)]
pub struct ParsedTypeLine {
    pub supertypes: EnumSet<CardSupertype>,
    pub card_types: EnumSet<CardType>,
    pub subtypes: CardSubtypes,
}

/// Splits a type line on the em dash and classifies each word.
///
/// Words to the left of the dash are matched against the supertype and card
/// type vocabularies; words on the right are subtypes. Unknown words are
/// tolerated by recording them as subtype words, which keeps unusual cards
/// playable.
pub fn parse(type_line: &str) -> ParsedTypeLine {
    let mut result = ParsedTypeLine::default();
    let normalized = type_line.replace("—", "-").replace("–", "-");
    let mut sides = normalized.splitn(2, " - ");
    let left = sides.next().unwrap_or_default();
    let right = sides.next().unwrap_or_default();

    for word in left.split_whitespace() {
        if let Some(supertype) = parse_supertype(word) {
            result.supertypes.insert(supertype);
        } else if let Some(card_type) = parse_card_type(word) {
            result.card_types.insert(card_type);
        } else {
            add_subtype(&mut result.subtypes, word);
        }
    }

    for word in right.split_whitespace() {
        add_subtype(&mut result.subtypes, word);
    }

    result
}

fn add_subtype(subtypes: &mut CardSubtypes, word: &str) {
    if let Ok(land) = LandType::from_str(word) {
        subtypes.lands.insert(land);
    }
    subtypes.all.push(word.to_string());
}

fn parse_supertype(word: &str) -> Option<CardSupertype> {
    let supertype = match word.to_ascii_lowercase().as_str() {
        "basic" => CardSupertype::Basic,
        "legendary" => CardSupertype::Legendary,
        "ongoing" => CardSupertype::Ongoing,
        "snow" => CardSupertype::Snow,
        "world" => CardSupertype::World,
        _ => return None,
    };
    Some(supertype)
}

fn parse_card_type(word: &str) -> Option<CardType> {
    let card_type = match word.to_ascii_lowercase().as_str() {
        "artifact" => CardType::Artifact,
        "battle" => CardType::Battle,
        "creature" => CardType::Creature,
        "enchantment" => CardType::Enchantment,
        "instant" => CardType::Instant,
        "kindred" | "tribal" => CardType::Kindred,
        "land" => CardType::Land,
        "planeswalker" => CardType::Planeswalker,
        "sorcery" => CardType::Sorcery,
        _ => return None,
    };
    Some(card_type)
}
