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

use data::card_definitions::ability_definition::{
    AbilityCost, AbilityDefinition, AbilityTiming, ActivatedAbilityDefinition, PlayerScope,
    SpellAbilityDefinition, StaticAbilityDefinition, TriggerCondition, TriggeredAbilityDefinition,
};
use data::card_definitions::card_filter::{CardFilter, ControllerRestriction};
use data::card_definitions::effect_definition::{DynamicValue, Effect, TargetSpec};
use data::card_states::counters::CounterKind;
use data::core::keywords::Keyword;
use data::core::primitives::CardType;
use enumset::EnumSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cost_parser;
use crate::effect_parser;

static REMINDER_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid reminder-text regex"));

static ACTIVATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:\n]+):\s*(.+)$").expect("valid activated regex"));

static ANTHEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(other )?creatures you control get ([+-]\d+)/([+-]\d+)$")
        .expect("valid anthem regex")
});

static ANTHEM_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(other )?creatures you control have ([\w ]+)$").expect("valid grant regex")
});

static ATTACHED_PUMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:enchanted|equipped) creature gets ([+-]\d+)/([+-]\d+)$")
        .expect("valid attached pump regex")
});

static ATTACHED_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:enchanted|equipped) creature has ([\w ]+)$")
        .expect("valid attached keyword regex")
});

static ENTERS_WITH_COUNTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^this \w+ enters(?: the battlefield)? with (\w+) \+1/\+1 counters? on it$")
        .expect("valid counters regex")
});

static PAY_LIFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pay (\d+) life$").expect("valid life regex"));

static REMOVE_COUNTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^remove (\w+) \+1/\+1 counters? from this \w+$").expect("valid remove regex")
});

/// Replacement-style clauses recognized directly on a card.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParsedReplacement {
    EntersTapped,
    EntersWithCounters(u64),
    SkipUntap,
    DiesToExileInstead,
}

/// Output of parsing one card face's oracle text.
#[derive(Debug, Clone, Default)]
pub struct ParsedAbilities {
    pub abilities: Vec<AbilityDefinition>,
    pub replacements: Vec<ParsedReplacement>,
}

/// Parses oracle text into a structured ability list, one entry per clause.
///
/// `face_name` is used to recognize self-references; `is_spell` selects
/// spell-effect parsing for instants and sorceries.
pub fn parse(face_name: &str, oracle_text: &str, is_spell: bool) -> ParsedAbilities {
    let mut result = ParsedAbilities::default();
    let stripped = REMINDER_TEXT.replace_all(oracle_text, "");

    for raw_line in stripped.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = normalize_self(face_name, line);

        if is_keyword_line(&lower) {
            continue;
        }

        if let Some(replacement) = parse_replacement(&lower) {
            result.replacements.push(replacement);
            continue;
        }

        if let Some(trigger) = parse_trigger(&lower, line) {
            result.abilities.push(AbilityDefinition::Triggered(trigger));
            continue;
        }

        if let Some(activated) = parse_activated(&lower) {
            result.abilities.push(AbilityDefinition::Activated(activated));
            continue;
        }

        if let Some(statik) = parse_static(&lower) {
            result.abilities.push(AbilityDefinition::Static(statik));
            continue;
        }

        if is_spell {
            result.abilities.push(AbilityDefinition::Spell(SpellAbilityDefinition {
                effects: effect_parser::parse_effects(&lower),
            }));
            continue;
        }

        result.abilities.push(AbilityDefinition::Raw(line.to_string()));
    }

    result
}

/// Rewrites self-references ("CARDNAME", "this creature") to a canonical
/// form and lowercases the line.
fn normalize_self(face_name: &str, line: &str) -> String {
    let lower = line.to_ascii_lowercase();
    let name = face_name.to_ascii_lowercase();
    let replaced = lower.replace(&name, "this permanent");
    replaced
        .replace("this creature", "this permanent")
        .replace("this artifact", "this permanent")
        .replace("this enchantment", "this permanent")
        .replace("this land", "this permanent")
        .replace("this planeswalker", "this permanent")
}

/// True if every comma-separated token on the line is a recognized keyword,
/// possibly with parameters (ward cost, protection choice, landwalk).
fn is_keyword_line(line: &str) -> bool {
    line.split(',').map(str::trim).filter(|token| !token.is_empty()).all(is_keyword_token)
}

fn is_keyword_token(token: &str) -> bool {
    if token.starts_with("ward ")
        || token.starts_with("protection from ")
        || token.ends_with("walk")
    {
        return true;
    }
    enum_iterator::all::<Keyword>().any(|keyword| keyword.to_string() == token)
}

fn parse_replacement(line: &str) -> Option<ParsedReplacement> {
    if line == "this permanent enters the battlefield tapped"
        || line == "this permanent enters tapped"
    {
        return Some(ParsedReplacement::EntersTapped);
    }
    if let Some(captures) = ENTERS_WITH_COUNTERS.captures(line) {
        if let Some(DynamicValue::Fixed(count)) = effect_parser::parse_amount(&captures[1]) {
            return Some(ParsedReplacement::EntersWithCounters(count as u64));
        }
    }
    if line == "this permanent doesn't untap during your untap step" {
        return Some(ParsedReplacement::SkipUntap);
    }
    if line == "if this permanent would die, exile it instead" {
        return Some(ParsedReplacement::DiesToExileInstead);
    }
    None
}

fn parse_trigger(lower: &str, original: &str) -> Option<TriggeredAbilityDefinition> {
    let starts_trigger = lower.starts_with("when ")
        || lower.starts_with("whenever ")
        || lower.starts_with("at the beginning of ");
    if !starts_trigger {
        return None;
    }

    let (condition_text, effect_text) = lower.split_once(", ")?;
    let condition = parse_trigger_condition(condition_text);
    Some(TriggeredAbilityDefinition {
        condition,
        effects: effect_parser::parse_effects(effect_text),
        text: original.to_string(),
    })
}

fn parse_trigger_condition(text: &str) -> TriggerCondition {
    let condition = text
        .trim_start_matches("whenever ")
        .trim_start_matches("when ")
        .trim_start_matches("at the beginning of ");

    match condition {
        "this permanent enters the battlefield" | "this permanent enters" => {
            return TriggerCondition::SelfEntersBattlefield
        }
        "this permanent dies" => return TriggerCondition::SelfDies,
        "this permanent attacks" => return TriggerCondition::SelfAttacks,
        "this permanent blocks" => return TriggerCondition::SelfBlocks,
        "this permanent deals combat damage to a player" => {
            return TriggerCondition::SelfDealsCombatDamageToPlayer
        }
        "you gain life" => return TriggerCondition::YouGainLife,
        _ => {}
    }

    if condition == "a creature dies" || condition == "another creature dies" {
        let mut filter = CardFilter::creatures();
        filter.exclude_source = condition.starts_with("another");
        return TriggerCondition::CreatureDies(filter);
    }

    if condition.starts_with("a creature enters")
        || condition.starts_with("another creature enters")
    {
        let mut filter = CardFilter::creatures();
        filter.exclude_source = condition.starts_with("another");
        if condition.ends_with("under your control") {
            filter.controller = Some(ControllerRestriction::You);
        }
        return TriggerCondition::CreatureEntersBattlefield(filter);
    }

    if let Some(rest) = condition.strip_suffix(" upkeep") {
        return TriggerCondition::BeginningOfUpkeep(parse_scope(rest));
    }

    if let Some(rest) = condition.strip_suffix(" end step") {
        return TriggerCondition::BeginningOfEndStep(parse_scope(rest));
    }

    TriggerCondition::Raw(condition.to_string())
}

fn parse_scope(text: &str) -> PlayerScope {
    if text.contains("each") {
        PlayerScope::Each
    } else if text.contains("opponent") {
        PlayerScope::Opponent
    } else {
        PlayerScope::You
    }
}

fn parse_activated(line: &str) -> Option<ActivatedAbilityDefinition> {
    let captures = ACTIVATED.captures(line)?;
    let costs = parse_ability_costs(&captures[1])?;
    let effect_text = &captures[2];

    let timing = if effect_text.contains("activate only as a sorcery")
        || effect_text.contains("activate this ability only any time you could cast a sorcery")
    {
        AbilityTiming::Sorcery
    } else {
        AbilityTiming::Instant
    };

    let effects = effect_parser::parse_effects(effect_text);
    let is_mana_ability = !effects.is_empty()
        && effects.iter().all(|effect| matches!(effect, Effect::AddMana { .. }));

    Some(ActivatedAbilityDefinition { costs, effects, timing, is_mana_ability })
}

fn parse_ability_costs(text: &str) -> Option<Vec<AbilityCost>> {
    let mut costs = vec![];
    for part in text.split(", ") {
        let part = part.trim();
        if part == "{t}" {
            costs.push(AbilityCost::Tap);
        } else if part.starts_with('{') {
            let cost = cost_parser::parse(&part.to_ascii_uppercase()).ok()?;
            costs.push(AbilityCost::Mana(cost));
        } else if let Some(captures) = PAY_LIFE.captures(part) {
            costs.push(AbilityCost::PayLife(captures[1].parse().ok()?));
        } else if part == "sacrifice this permanent" {
            costs.push(AbilityCost::SacrificeSelf);
        } else if let Some(rest) = part.strip_prefix("sacrifice a ") {
            costs.push(AbilityCost::SacrificePermanent(subtype_filter(rest)));
        } else if part == "discard a card" {
            costs.push(AbilityCost::DiscardCard);
        } else if let Some(captures) = REMOVE_COUNTERS.captures(part) {
            let count = match effect_parser::parse_amount(&captures[1])? {
                DynamicValue::Fixed(count) => count as u64,
                _ => return None,
            };
            costs.push(AbilityCost::RemoveCounters(CounterKind::PlusOnePlusOne, count));
        } else {
            return None;
        }
    }
    if costs.is_empty() {
        None
    } else {
        Some(costs)
    }
}

fn subtype_filter(noun: &str) -> CardFilter {
    match noun {
        "creature" => CardFilter::creatures(),
        "land" => CardFilter {
            card_types: EnumSet::only(CardType::Land),
            ..CardFilter::default()
        },
        "artifact" => CardFilter {
            card_types: EnumSet::only(CardType::Artifact),
            ..CardFilter::default()
        },
        other => {
            let mut subtype = other.to_string();
            if let Some(first) = subtype.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            CardFilter { subtype: Some(subtype), ..CardFilter::default() }
        }
    }
}

fn parse_static(line: &str) -> Option<StaticAbilityDefinition> {
    if let Some(captures) = ANTHEM.captures(line) {
        let mut filter = CardFilter::your_creatures();
        filter.exclude_source = captures.get(1).is_some();
        return Some(StaticAbilityDefinition::AnthemPowerToughness {
            power: captures[2].parse().ok()?,
            toughness: captures[3].parse().ok()?,
            filter,
        });
    }

    if let Some(captures) = ANTHEM_KEYWORD.captures(line) {
        let mut filter = CardFilter::your_creatures();
        filter.exclude_source = captures.get(1).is_some();
        let keyword = find_keyword(captures[2].trim())?;
        return Some(StaticAbilityDefinition::GrantKeyword { keyword, filter });
    }

    if let Some(captures) = ATTACHED_PUMP.captures(line) {
        return Some(StaticAbilityDefinition::ModifyAttachedPowerToughness {
            power: captures[1].parse().ok()?,
            toughness: captures[2].parse().ok()?,
        });
    }

    if let Some(captures) = ATTACHED_KEYWORD.captures(line) {
        let keyword = find_keyword(captures[1].trim())?;
        return Some(StaticAbilityDefinition::GrantKeywordToAttached { keyword });
    }

    None
}

fn find_keyword(word: &str) -> Option<Keyword> {
    enum_iterator::all::<Keyword>().find(|keyword| keyword.to_string() == word)
}

/// Builds the targeting requirement implied by an "enchant ..." line, used
/// when casting auras.
pub fn enchant_target(oracle_text: &str) -> Option<TargetSpec> {
    let lower = oracle_text.to_ascii_lowercase();
    for line in lower.lines() {
        if let Some(rest) = line.trim().strip_prefix("enchant ") {
            return match rest.trim() {
                "creature" => Some(TargetSpec::Permanent(CardFilter::creatures())),
                "permanent" => Some(TargetSpec::Permanent(CardFilter::permanents())),
                "land" => Some(TargetSpec::Permanent(CardFilter {
                    card_types: EnumSet::only(CardType::Land),
                    ..CardFilter::default()
                })),
                other => Some(TargetSpec::Permanent(subtype_filter(other))),
            };
        }
    }
    None
}
