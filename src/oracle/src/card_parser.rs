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

use data::card_definitions::ability_definition::AbilityDefinition;
use data::card_definitions::variant_data::AdventureData;
use data::core::primitives::{CardNumber, CardType, Color};
use data::printed_cards::database_card::{DatabaseCard, DatabaseCardFace};
use data::printed_cards::mana_cost::ManaCost;
use data::printed_cards::printed_card::{CardLayout, PrintedCard, PrintedCardFace};
use data::printed_cards::printed_primitives::{PrintedLoyalty, PrintedPower, PrintedToughness};
use enumset::EnumSet;
use utils::outcome::Value;

use crate::ability_parser::{self, ParsedReplacement};
use crate::cost_parser;
use crate::keyword_parser;
use crate::type_line_parser;
use crate::variant_parser;

/// Turns a [DatabaseCard] into a [PrintedCard].
///
/// This parses the raw database record — type line, mana cost, oracle text
/// — into the structured form the rules engine consumes. Parsing happens
/// once per card number when the database loads.
pub fn parse(number: CardNumber, card: &DatabaseCard) -> Value<PrintedCard> {
    let mut faces = match &card.card_faces {
        Some(db_faces) if !db_faces.is_empty() => {
            db_faces.iter().map(|face| build_face_from_db_face(card, face)).collect::<Value<_>>()?
        }
        _ => vec![build_face(card)?],
    };

    let layout = classify_layout(card, &faces);

    if layout == CardLayout::Adventure && faces.len() > 1 {
        let adventure_face = faces.remove(1);
        let effects = adventure_face
            .abilities
            .iter()
            .filter_map(|ability| match ability {
                AbilityDefinition::Spell(spell) => Some(spell.effects.clone()),
                _ => None,
            })
            .flatten()
            .collect();
        faces[0].adventure = Some(AdventureData {
            name: adventure_face.name.clone(),
            mana_cost: adventure_face.mana_cost.clone(),
            card_types: adventure_face.card_types,
            effects,
        });
    }

    if layout == CardLayout::Room {
        let doors: Vec<_> = faces
            .iter()
            .map(|face| {
                let unlock_cost =
                    (!face.mana_cost.items.is_empty()).then(|| face.mana_cost.clone());
                variant_parser::parse_room_door(&face.name, unlock_cost, &face.oracle_text)
            })
            .collect();
        faces[0].room_doors = doors;
        faces.truncate(1);
    }
    let transform_trigger = if layout == CardLayout::Transform || layout == CardLayout::Flip {
        let combined: String =
            faces.iter().map(|face| face.oracle_text.as_str()).collect::<Vec<_>>().join("\n");
        Some(variant_parser::classify_transform_trigger(&combined))
    } else {
        None
    };

    Ok(PrintedCard { number, faces, layout, transform_trigger })
}

/// Recognized replacement clauses for a face, re-parsed on demand by card
/// initialization.
pub fn face_replacements(face: &PrintedCardFace) -> Vec<ParsedReplacement> {
    ability_parser::parse(&face.name, &face.oracle_text, false).replacements
}

fn build_face(card: &DatabaseCard) -> Value<PrintedCardFace> {
    build_face_fields(
        &card.name,
        card.mana_cost.as_deref(),
        &card.type_line,
        &card.oracle_text,
        card.power.as_deref(),
        card.toughness.as_deref(),
        card.loyalty.as_deref(),
        card.colors.as_deref(),
    )
}

fn build_face_from_db_face(card: &DatabaseCard, face: &DatabaseCardFace) -> Value<PrintedCardFace> {
    build_face_fields(
        &face.name,
        face.mana_cost.as_deref().or(card.mana_cost.as_deref()),
        if face.type_line.is_empty() { &card.type_line } else { &face.type_line },
        &face.oracle_text,
        face.power.as_deref(),
        face.toughness.as_deref(),
        face.loyalty.as_deref(),
        face.colors.as_deref().or(card.colors.as_deref()),
    )
}

#[allow(clippy::too_many_arguments)]
fn build_face_fields(
    name: &str,
    mana_cost: Option<&str>,
    type_line: &str,
    oracle_text: &str,
    power: Option<&str>,
    toughness: Option<&str>,
    loyalty: Option<&str>,
    colors: Option<&[String]>,
) -> Value<PrintedCardFace> {
    let parsed_types = type_line_parser::parse(type_line);
    let mana_cost = match mana_cost {
        Some(cost) => cost_parser::parse(cost)?,
        None => ManaCost::default(),
    };
    let (keywords, keyword_grants) = keyword_parser::extract(oracle_text);

    let is_spell = parsed_types.card_types.contains(CardType::Instant)
        || parsed_types.card_types.contains(CardType::Sorcery);
    let parsed = ability_parser::parse(name, oracle_text, is_spell);

    let is_planeswalker = parsed_types.card_types.contains(CardType::Planeswalker);
    let planeswalker_abilities = if is_planeswalker {
        variant_parser::parse_planeswalker_abilities(oracle_text)
    } else {
        vec![]
    };

    let spree_modes = if oracle_text.contains("Spree") {
        variant_parser::parse_spree_modes(oracle_text)
    } else {
        vec![]
    };

    let class_levels = if parsed_types.subtypes.contains("Class") {
        variant_parser::parse_class_levels(name, oracle_text)
    } else {
        vec![]
    };

    let saga_chapters = if parsed_types.subtypes.is_saga() {
        variant_parser::parse_saga_chapters(oracle_text)
    } else {
        vec![]
    };

    // Class cards carry their abilities inside the level bands; the raw
    // gate lines would otherwise parse as meaningless activated abilities.
    let abilities = if class_levels.is_empty() { parsed.abilities } else { vec![] };

    let mana_value = mana_cost.mana_value();
    Ok(PrintedCardFace {
        name: name.to_string(),
        supertypes: parsed_types.supertypes,
        card_types: parsed_types.card_types,
        subtypes: parsed_types.subtypes,
        oracle_text: oracle_text.to_string(),
        colors: parse_colors(colors, &mana_cost),
        mana_cost,
        mana_value,
        power: power.map(parse_power),
        toughness: toughness.map(parse_toughness),
        loyalty: loyalty.map(parse_loyalty),
        keywords,
        keyword_grants,
        abilities,
        planeswalker_abilities,
        spree_modes,
        class_levels,
        room_doors: vec![],
        saga_chapters,
        adventure: None,
    })
}

/// Colors from the explicit database list, falling back to the colors of
/// the mana cost symbols.
fn parse_colors(colors: Option<&[String]>, mana_cost: &ManaCost) -> EnumSet<Color> {
    if let Some(colors) = colors {
        let mut result = EnumSet::empty();
        for letter in colors {
            match letter.as_str() {
                "W" => result.insert(Color::White),
                "U" => result.insert(Color::Blue),
                "B" => result.insert(Color::Black),
                "R" => result.insert(Color::Red),
                "G" => result.insert(Color::Green),
                _ => false,
            };
        }
        return result;
    }

    use data::core::primitives::ManaColor;
    use data::printed_cards::mana_cost::ManaCostItem;
    let mut result = EnumSet::empty();
    for item in &mana_cost.items {
        let colors: &[ManaColor] = match item {
            ManaCostItem::Colored(color)
            | ManaCostItem::Snow(color)
            | ManaCostItem::MonoHybrid(color)
            | ManaCostItem::Phyrexian(color) => std::slice::from_ref(color),
            ManaCostItem::Hybrid(a, b) | ManaCostItem::PhyrexianHybrid(a, b) => &[*a, *b][..],
            _ => &[],
        };
        for mana_color in colors {
            match mana_color {
                ManaColor::White => result.insert(Color::White),
                ManaColor::Blue => result.insert(Color::Blue),
                ManaColor::Black => result.insert(Color::Black),
                ManaColor::Red => result.insert(Color::Red),
                ManaColor::Green => result.insert(Color::Green),
                ManaColor::Colorless => false,
            };
        }
    }
    result
}

fn parse_power(power: &str) -> PrintedPower {
    match power.parse() {
        Ok(value) => PrintedPower::Fixed(value),
        Err(_) => PrintedPower::Variable,
    }
}

fn parse_toughness(toughness: &str) -> PrintedToughness {
    match toughness.parse() {
        Ok(value) => PrintedToughness::Fixed(value),
        Err(_) => PrintedToughness::Variable,
    }
}

fn parse_loyalty(loyalty: &str) -> PrintedLoyalty {
    match loyalty.parse() {
        Ok(value) => PrintedLoyalty::Fixed(value),
        Err(_) => PrintedLoyalty::Variable,
    }
}

/// Classifies the physical layout of a card from its parsed faces.
fn classify_layout(card: &DatabaseCard, faces: &[PrintedCardFace]) -> CardLayout {
    if let Some(face) = faces.first() {
        if face.subtypes.contains("Class") {
            return CardLayout::Class;
        }
        if face.subtypes.is_saga() {
            return CardLayout::Saga;
        }
    }

    if card.name.contains(" // ") && faces.iter().any(|face| face.subtypes.contains("Room")) {
        return CardLayout::Room;
    }

    if faces.len() > 1 {
        if faces[1].subtypes.contains("Adventure") {
            return CardLayout::Adventure;
        }
        // Flip cards turn 180 degrees rather than over; their top half
        // carries a "flip [this]" instruction and the bottom half has no
        // mana cost of its own.
        let has_flip = faces.iter().any(|face| {
            variant_parser::has_flip_instruction(&face.oracle_text.to_ascii_lowercase())
        });
        if has_flip && faces[1].mana_cost.items.is_empty() {
            return CardLayout::Flip;
        }
        // A back face with its own mana cost can be cast directly, which
        // makes the card a modal DFC rather than a transforming one.
        if !faces[1].mana_cost.items.is_empty() {
            return CardLayout::ModalDfc;
        }
        return CardLayout::Transform;
    }

    CardLayout::Normal
}
