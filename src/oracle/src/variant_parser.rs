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
use data::card_definitions::variant_data::{
    ClassLevel, PlaneswalkerAbilityDefinition, RoomDoor, SagaChapter, SpreeMode,
};
use data::printed_cards::mana_cost::ManaCost;
use data::printed_cards::printed_card::TransformTriggerKind;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ability_parser;
use crate::cost_parser;
use crate::effect_parser;

static LOYALTY_ABILITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+\-−]?)(\d+|X):\s*(.+)$").expect("valid loyalty regex"));

static SPREE_MODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\s*(\{[^—-]+?\})\s*[—-]\s*(.+)$").expect("valid spree regex"));

static CLASS_GATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\{[^:]+\}):\s*Level (\d+)$").expect("valid class regex"));

static SAGA_CHAPTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:[IVX]+, )*[IVX]+)\s*[—-]\s*(.+)$").expect("valid saga regex")
});

static COST_TRANSFORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]+\}[^:\n]*:\s*[^\n]*transform").expect("valid transform regex"));

/// Parses planeswalker loyalty abilities by the `[+N]: effect` pattern, one
/// per oracle text line.
///
/// An ability is flagged as the ultimate if its cost is -6 or steeper;
/// when no ability qualifies, the final minus ability is flagged instead.
pub fn parse_planeswalker_abilities(oracle_text: &str) -> Vec<PlaneswalkerAbilityDefinition> {
    let mut abilities = vec![];
    for line in oracle_text.lines() {
        let line = line.trim().trim_start_matches('[').replace("]:", ":");
        let Some(captures) = LOYALTY_ABILITY.captures(&line) else {
            continue;
        };
        let magnitude: i64 = captures[2].parse().unwrap_or(0);
        let loyalty_change = match &captures[1] {
            "-" | "−" => -magnitude,
            _ => magnitude,
        };
        let text = captures[3].to_string();
        abilities.push(PlaneswalkerAbilityDefinition {
            loyalty_change,
            effects: effect_parser::parse_effects(&text.to_ascii_lowercase()),
            text,
            is_ultimate: loyalty_change <= -6,
        });
    }

    if !abilities.iter().any(|ability| ability.is_ultimate) {
        if let Some(last_minus) =
            abilities.iter_mut().rev().find(|ability| ability.loyalty_change < 0)
        {
            last_minus.is_ultimate = true;
        }
    }

    abilities
}

/// Parses Spree mode lines of the form `+ {cost} — effect`.
pub fn parse_spree_modes(oracle_text: &str) -> Vec<SpreeMode> {
    let mut modes = vec![];
    for line in oracle_text.lines() {
        let Some(captures) = SPREE_MODE.captures(line.trim()) else {
            continue;
        };
        let Ok(cost) = cost_parser::parse(&captures[1]) else {
            continue;
        };
        let text = captures[2].to_string();
        modes.push(SpreeMode {
            cost,
            effects: effect_parser::parse_effects(&text.to_ascii_lowercase()),
            text,
        });
    }
    modes
}

/// Parses Class level bands.
///
/// The base level holds every ability before the first `{cost}: Level N`
/// gate; each gate starts a new band with the cost paid to reach it.
/// Returned levels are sorted ascending.
pub fn parse_class_levels(face_name: &str, oracle_text: &str) -> Vec<ClassLevel> {
    let mut levels = vec![ClassLevel {
        level: 1,
        cost: None,
        abilities: vec![],
        power: None,
        toughness: None,
        added_types: enumset::EnumSet::empty(),
    }];
    let mut block = String::new();

    for line in oracle_text.lines() {
        let line = line.trim();
        if let Some(captures) = CLASS_GATE.captures(line) {
            finish_class_block(face_name, &mut block, &mut levels);
            let cost = cost_parser::parse(&captures[1]).ok();
            let level = captures[2].parse().unwrap_or(levels.len() as u8 + 1);
            levels.push(ClassLevel {
                level,
                cost,
                abilities: vec![],
                power: None,
                toughness: None,
                added_types: enumset::EnumSet::empty(),
            });
        } else if !line.is_empty() {
            block.push_str(line);
            block.push('\n');
        }
    }
    finish_class_block(face_name, &mut block, &mut levels);
    levels.sort_by_key(|level| level.level);
    levels
}

fn finish_class_block(face_name: &str, block: &mut String, levels: &mut Vec<ClassLevel>) {
    if block.is_empty() {
        return;
    }
    let parsed = ability_parser::parse(face_name, block, false);
    if let Some(level) = levels.last_mut() {
        level.abilities.extend(parsed.abilities);
    }
    block.clear();
}

/// Parses Saga chapter lines of the form `I — effect` or `I, II — effect`.
pub fn parse_saga_chapters(oracle_text: &str) -> Vec<SagaChapter> {
    let mut chapters = vec![];
    for line in oracle_text.lines() {
        let Some(captures) = SAGA_CHAPTER.captures(line.trim()) else {
            continue;
        };
        let text = captures[2].to_string();
        let effects = effect_parser::parse_effects(&text.to_ascii_lowercase());
        for numeral in captures[1].split(", ") {
            if let Some(chapter) = roman_numeral(numeral) {
                chapters.push(SagaChapter { chapter, effects: effects.clone(), text: text.clone() });
            }
        }
    }
    chapters.sort_by_key(|chapter| chapter.chapter);
    chapters
}

fn roman_numeral(numeral: &str) -> Option<u8> {
    match numeral {
        "I" => Some(1),
        "II" => Some(2),
        "III" => Some(3),
        "IV" => Some(4),
        "V" => Some(5),
        "VI" => Some(6),
        _ => None,
    }
}

/// Builds Room doors from a room card's face halves.
///
/// Each half contributes one door carrying its own triggers, statics, and
/// unlock cost.
pub fn parse_room_door(
    name: &str,
    unlock_cost: Option<ManaCost>,
    oracle_text: &str,
) -> RoomDoor {
    let parsed = ability_parser::parse(name, oracle_text, false);
    let mut triggers = vec![];
    let mut statics = vec![];
    let mut effects = vec![];
    for ability in parsed.abilities {
        match ability {
            AbilityDefinition::Triggered(trigger) => triggers.push(trigger),
            AbilityDefinition::Static(statik) => statics.push(statik),
            AbilityDefinition::Spell(spell) => effects.extend(spell.effects),
            _ => {}
        }
    }
    RoomDoor {
        name: name.to_string(),
        oracle_text: oracle_text.to_string(),
        unlock_cost,
        triggers,
        statics,
        effects,
    }
}

/// Classifies how a two-faced card initiates its transformation, from the
/// combined oracle text of both faces.
pub fn classify_transform_trigger(combined_text: &str) -> TransformTriggerKind {
    let lower = combined_text.to_ascii_lowercase();
    if lower.contains("daybound") || lower.contains("nightbound") {
        return TransformTriggerKind::DayNight;
    }
    if lower.contains("meld") {
        return TransformTriggerKind::Meld;
    }
    if has_flip_instruction(&lower) {
        return TransformTriggerKind::Flip;
    }
    if COST_TRANSFORM.is_match(&lower) {
        return TransformTriggerKind::Cost;
    }
    let has_transform_trigger = lower.lines().any(|line| {
        (line.starts_with("when") || line.starts_with("at "))
            && line.contains("transform")
    });
    if has_transform_trigger {
        return TransformTriggerKind::Condition;
    }
    TransformTriggerKind::Manual
}

/// True if lowercased oracle text contains a "flip [this card]"
/// instruction, the phrasing flip cards use to turn 180 degrees.
///
/// Coin flips ("flip a coin") are not flip instructions.
pub fn has_flip_instruction(lower_text: &str) -> bool {
    let mut start = 0;
    while let Some(found) = lower_text[start..].find("flip ") {
        let begin = start + found;
        let rest = &lower_text[begin + "flip ".len()..];
        if !rest.starts_with("a coin") && !rest.starts_with("two coins") {
            return true;
        }
        start = begin + "flip ".len();
    }
    false
}
