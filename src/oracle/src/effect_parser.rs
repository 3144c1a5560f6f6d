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
use data::card_definitions::effect_definition::{
    DynamicValue, Effect, EffectList, GrantDuration, PlayerSpec, TargetSpec,
};
use data::card_states::counters::CounterKind;
use data::core::keywords::Keyword;
use data::core::primitives::{CardType, Color, ManaColor};
use enumset::EnumSet;
use once_cell::sync::Lazy;
use regex::Regex;

static DEAL_DAMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:this \w+ |[\w\s,']+? )?deals? (\w+) damage to (.+?)$").expect("damage regex")
});

static DRAW_CARDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(you |each player |target player )?draws? (\w+) cards?$").expect("draw regex")
});

static GAIN_LIFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(you |each player |target player )?gains? (\w+) life$").expect("gain regex"));

static LOSE_LIFE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(you |each opponent |each player |target player )?loses? (\w+) life$")
        .expect("lose regex")
});

static PUMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?) gets? ([+-])(\w+)/([+-])(\w+)(?: and gains? (.+?))?(?: until end of turn)?$")
        .expect("pump regex")
});

static GAINS_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?) gains? ([\w ]+?)(?: until end of turn)?$").expect("gains regex")
});

static ADD_COUNTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^put (\w+) ([+-]1/[+-]1|loyalty|charge) counters? on (.+?)$")
        .expect("counters regex")
});

static CREATE_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^create (\w+) (\d+)/(\d+) ([\w\s]+?) creature tokens?(?: .*)?$")
        .expect("token regex")
});

static ADD_MANA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^add ((?:\{[WUBRGC]\})+)$").expect("mana regex"));

static SCRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^scry (\w+)$").expect("scry regex"));

static MILL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(you |each player |target player )?mills? (\w+) cards?$").expect("mill regex")
});

static DISCARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(you |each player |each opponent |target player )?discards? (\w+) cards?(?: at random)?$")
        .expect("discard regex")
});

/// Parses one oracle clause into a list of effects.
///
/// The clause is split into sentences and parsed one at a time; any
/// sentence the grammar does not recognize becomes [Effect::Raw], which
/// resolves without doing anything.
pub fn parse_effects(text: &str) -> EffectList {
    let mut effects = vec![];
    for sentence in split_sentences(text) {
        effects.push(parse_sentence(&sentence).unwrap_or(Effect::Raw(sentence)));
    }
    effects
}

fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', ';'])
        .flat_map(|part| part.split(", then "))
        .map(|part| part.trim().trim_start_matches("then ").to_ascii_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_sentence(sentence: &str) -> Option<Effect> {
    if let Some(captures) = DEAL_DAMAGE.captures(sentence) {
        return Some(Effect::DealDamage {
            amount: parse_amount(&captures[1])?,
            target: parse_damage_recipient(&captures[2])?,
        });
    }

    if let Some(captures) = DRAW_CARDS.captures(sentence) {
        return Some(Effect::DrawCards {
            player: parse_player(captures.get(1).map_or("you", |m| m.as_str())),
            count: parse_amount(&captures[2])?,
        });
    }

    if let Some(captures) = GAIN_LIFE.captures(sentence) {
        return Some(Effect::GainLife {
            player: parse_player(captures.get(1).map_or("you", |m| m.as_str())),
            amount: parse_amount(&captures[2])?,
        });
    }

    if let Some(captures) = LOSE_LIFE.captures(sentence) {
        return Some(Effect::LoseLife {
            player: parse_player(captures.get(1).map_or("you", |m| m.as_str())),
            amount: parse_amount(&captures[2])?,
        });
    }

    if let Some(rest) = sentence.strip_prefix("destroy ") {
        return Some(Effect::Destroy { target: parse_object(rest)? });
    }

    if let Some(rest) = sentence.strip_prefix("exile ") {
        return Some(Effect::Exile { target: parse_object(rest)? });
    }

    if let Some(rest) = sentence.strip_prefix("counter ") {
        if rest.starts_with("target spell") {
            return Some(Effect::CounterSpell { target: TargetSpec::Spell });
        }
        return None;
    }

    if let Some(rest) = sentence.strip_prefix("return ") {
        let object = rest
            .strip_suffix(" to its owner's hand")
            .or_else(|| rest.strip_suffix(" to their owners' hands"))?;
        return Some(Effect::ReturnToHand { target: parse_object(object)? });
    }

    if let Some(captures) = ADD_COUNTERS.captures(sentence) {
        return Some(Effect::AddCounters {
            kind: parse_counter_kind(&captures[2])?,
            count: parse_amount(&captures[1])?,
            target: parse_object(&captures[3])?,
        });
    }

    if let Some(captures) = CREATE_TOKENS.captures(sentence) {
        let descriptors = captures[4].trim().to_string();
        let (colors, subtypes) = parse_token_descriptors(&descriptors);
        return Some(Effect::CreateTokens {
            count: parse_amount(&captures[1])?,
            power: captures[2].parse().ok()?,
            toughness: captures[3].parse().ok()?,
            name: token_name(&subtypes, &descriptors),
            subtypes,
            colors,
            keywords: EnumSet::empty(),
        });
    }

    if let Some(captures) = ADD_MANA.captures(sentence) {
        return Some(Effect::AddMana { mana: parse_mana_symbols(&captures[1]) });
    }

    if let Some(rest) = sentence.strip_prefix("tap ") {
        return Some(Effect::Tap { target: parse_object(rest)? });
    }

    if let Some(rest) = sentence.strip_prefix("untap ") {
        return Some(Effect::Untap { target: parse_object(rest)? });
    }

    if let Some(captures) = SCRY.captures(sentence) {
        return Some(Effect::Scry { count: parse_amount(&captures[1])? });
    }

    if let Some(captures) = MILL.captures(sentence) {
        return Some(Effect::Mill {
            player: parse_player(captures.get(1).map_or("you", |m| m.as_str())),
            count: parse_amount(&captures[2])?,
        });
    }

    if let Some(captures) = DISCARD.captures(sentence) {
        return Some(Effect::DiscardCards {
            player: parse_player(captures.get(1).map_or("you", |m| m.as_str())),
            count: parse_amount(&captures[2])?,
        });
    }

    if sentence == "transform this permanent" || sentence == "transform this creature" {
        return Some(Effect::TransformSource);
    }

    if let Some(captures) = PUMP.captures(sentence) {
        let target = parse_object(&captures[1])?;
        let power = signed_amount(&captures[2], &captures[3])?;
        let toughness = signed_amount(&captures[4], &captures[5])?;
        return Some(Effect::ModifyPowerToughness {
            power,
            toughness,
            target,
            duration: GrantDuration::EndOfTurn,
        });
    }

    if let Some(captures) = GAINS_KEYWORD.captures(sentence) {
        let target = parse_object(&captures[1])?;
        let keyword = parse_keyword_word(captures[2].trim())?;
        return Some(Effect::GrantKeyword { keyword, target, duration: GrantDuration::EndOfTurn });
    }

    None
}

/// Parses a quantity word: a digit string, a number word, or `x`.
pub fn parse_amount(word: &str) -> Option<DynamicValue> {
    if word == "x" {
        return Some(DynamicValue::VariableX);
    }
    if let Ok(value) = word.parse::<i64>() {
        return Some(DynamicValue::Fixed(value));
    }
    let value = match word {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        _ => return None,
    };
    Some(DynamicValue::Fixed(value))
}

fn signed_amount(sign: &str, word: &str) -> Option<DynamicValue> {
    let amount = parse_amount(word)?;
    Some(match (sign, amount) {
        ("-", DynamicValue::Fixed(value)) => DynamicValue::Fixed(-value),
        _ => amount,
    })
}

fn parse_player(prefix: &str) -> PlayerSpec {
    match prefix.trim() {
        "each opponent" => PlayerSpec::Opponent,
        "each player" => PlayerSpec::EachPlayer,
        "target player" => PlayerSpec::Target,
        _ => PlayerSpec::Controller,
    }
}

/// Parses a damage recipient: "any target", a targeted object, or a player.
fn parse_damage_recipient(text: &str) -> Option<TargetSpec> {
    match text {
        "any target" => Some(TargetSpec::AnyTarget),
        "target player" | "target player or planeswalker" => Some(TargetSpec::Player),
        "each opponent" | "you" => Some(TargetSpec::None),
        _ => parse_object(text),
    }
}

/// Parses an object reference: a target description, a self reference, or
/// an attached-host reference.
fn parse_object(text: &str) -> Option<TargetSpec> {
    let text = text.trim();
    if text.starts_with("this ") || text == "it" {
        return Some(TargetSpec::Source);
    }
    if text.starts_with("enchanted ") || text.starts_with("equipped ") {
        return Some(TargetSpec::Attached);
    }
    if text == "target spell" {
        return Some(TargetSpec::Spell);
    }
    if text == "target player" {
        return Some(TargetSpec::Player);
    }
    if text == "any target" {
        return Some(TargetSpec::AnyTarget);
    }

    let description = text.strip_prefix("target ")?;
    let mut filter = CardFilter::default();
    let mut words = description.split_whitespace().peekable();
    while let Some(word) = words.next() {
        match word {
            "creature" => {
                filter.card_types.insert(CardType::Creature);
            }
            "artifact" => {
                filter.card_types.insert(CardType::Artifact);
            }
            "enchantment" => {
                filter.card_types.insert(CardType::Enchantment);
            }
            "land" => {
                filter.card_types.insert(CardType::Land);
            }
            "planeswalker" => {
                filter.card_types.insert(CardType::Planeswalker);
            }
            "permanent" => {}
            "or" => {}
            "you" => {
                // "you control" / "you don't control"
                match words.peek().copied() {
                    Some("control") => {
                        filter.controller = Some(ControllerRestriction::You);
                        words.next();
                    }
                    Some("don't") => {
                        filter.controller = Some(ControllerRestriction::Opponent);
                        words.next();
                        words.next();
                    }
                    _ => {}
                }
            }
            "white" => {
                filter.colors.insert(Color::White);
            }
            "blue" => {
                filter.colors.insert(Color::Blue);
            }
            "black" => {
                filter.colors.insert(Color::Black);
            }
            "red" => {
                filter.colors.insert(Color::Red);
            }
            "green" => {
                filter.colors.insert(Color::Green);
            }
            other => {
                let mut subtype = other.to_string();
                if let Some(first) = subtype.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                filter.subtype = Some(subtype);
            }
        }
    }

    if filter == CardFilter::default() {
        return None;
    }
    Some(TargetSpec::Permanent(filter))
}

fn parse_counter_kind(text: &str) -> Option<CounterKind> {
    match text {
        "+1/+1" => Some(CounterKind::PlusOnePlusOne),
        "-1/-1" => Some(CounterKind::MinusOneMinusOne),
        "loyalty" => Some(CounterKind::Loyalty),
        "charge" => Some(CounterKind::Charge),
        _ => None,
    }
}

fn parse_token_descriptors(descriptors: &str) -> (EnumSet<Color>, Vec<String>) {
    let mut colors = EnumSet::empty();
    let mut subtypes = vec![];
    for word in descriptors.split_whitespace() {
        match word {
            "white" => {
                colors.insert(Color::White);
            }
            "blue" => {
                colors.insert(Color::Blue);
            }
            "black" => {
                colors.insert(Color::Black);
            }
            "red" => {
                colors.insert(Color::Red);
            }
            "green" => {
                colors.insert(Color::Green);
            }
            "colorless" => {}
            other => {
                let mut subtype = other.to_string();
                if let Some(first) = subtype.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                subtypes.push(subtype);
            }
        }
    }
    (colors, subtypes)
}

fn token_name(subtypes: &[String], descriptors: &str) -> String {
    if subtypes.is_empty() {
        descriptors.to_string()
    } else {
        subtypes.join(" ")
    }
}

fn parse_mana_symbols(symbols: &str) -> Vec<ManaColor> {
    symbols
        .trim_matches(['{', '}'])
        .split("}{")
        .filter_map(|symbol| match symbol {
            "W" => Some(ManaColor::White),
            "U" => Some(ManaColor::Blue),
            "B" => Some(ManaColor::Black),
            "R" => Some(ManaColor::Red),
            "G" => Some(ManaColor::Green),
            "C" => Some(ManaColor::Colorless),
            _ => None,
        })
        .collect()
}

/// Parses a single keyword word for "gains <keyword>" grants.
fn parse_keyword_word(word: &str) -> Option<Keyword> {
    enum_iterator::all::<Keyword>().find(|keyword| keyword.to_string() == word)
}
