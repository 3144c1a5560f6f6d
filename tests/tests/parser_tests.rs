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
use data::card_definitions::effect_definition::{DynamicValue, Effect, TargetSpec};
use data::core::keywords::{Keyword, ProtectionFrom};
use data::core::primitives::{CardSupertype, CardType, Color};
use data::printed_cards::card_subtypes::LandType;
use data::printed_cards::mana_cost::ManaCostItem;
use data::printed_cards::printed_card::{CardLayout, TransformTriggerKind};
use oracle::card_database::CardSource;
use oracle::{cost_parser, keyword_parser, type_line_parser, variant_parser};
use testing::test_cards::{self, DATABASE};

#[test]
fn type_line_splits_on_em_dash() {
    let parsed = type_line_parser::parse("Legendary Creature — Goblin Warrior");
    assert!(parsed.supertypes.contains(CardSupertype::Legendary));
    assert!(parsed.card_types.contains(CardType::Creature));
    assert!(parsed.subtypes.contains("Goblin"));
    assert!(parsed.subtypes.contains("Warrior"));
}

#[test]
fn type_line_records_basic_land_types() {
    let parsed = type_line_parser::parse("Basic Land — Forest");
    assert!(parsed.supertypes.contains(CardSupertype::Basic));
    assert!(parsed.card_types.contains(CardType::Land));
    assert!(parsed.subtypes.lands.contains(LandType::Forest));
}

#[test]
fn type_line_tolerates_unknown_words() {
    let parsed = type_line_parser::parse("Frobnicated Creature — Bear");
    assert!(parsed.card_types.contains(CardType::Creature));
    assert!(parsed.subtypes.contains("Frobnicated"));
}

#[test]
fn mana_cost_symbols() {
    let cost = cost_parser::parse("{2}{W}{W}").unwrap();
    assert_eq!(cost.mana_value(), 4);
    assert_eq!(
        cost.items.iter().filter(|item| **item == ManaCostItem::Generic).count(),
        2
    );

    let hybrid = cost_parser::parse("{W/U}").unwrap();
    assert!(matches!(hybrid.items[0], ManaCostItem::Hybrid(_, _)));

    let phyrexian = cost_parser::parse("{B/P}").unwrap();
    assert!(matches!(phyrexian.items[0], ManaCostItem::Phyrexian(_)));

    let variable = cost_parser::parse("{X}{R}{R}").unwrap();
    assert!(variable.has_variable_x());
    assert_eq!(variable.mana_value(), 2);
}

#[test]
fn invalid_mana_cost_is_rejected() {
    assert!(cost_parser::parse("{Q").is_err());
    assert!(cost_parser::parse("{FOO}").is_err());
}

#[test]
fn keywords_use_word_boundaries() {
    let (keywords, _) = keyword_parser::extract("Flying, vigilance");
    assert!(keywords.contains(Keyword::Flying));
    assert!(keywords.contains(Keyword::Vigilance));

    // "flashback" must not light up "flash"
    let (keywords, _) = keyword_parser::extract("Flashback {2}{R}");
    assert!(keywords.contains(Keyword::Flashback));
    assert!(!keywords.contains(Keyword::Flash));
}

#[test]
fn parameterized_keywords_capture_values() {
    let (keywords, grants) = keyword_parser::extract("Ward {2}");
    assert!(keywords.contains(Keyword::Ward));
    assert_eq!(grants.ward_cost, Some(2));

    let (keywords, grants) = keyword_parser::extract("Protection from red");
    assert!(keywords.contains(Keyword::Protection));
    assert_eq!(grants.protections, vec![ProtectionFrom::Color(Color::Red)]);

    let (keywords, grants) = keyword_parser::extract("Islandwalk");
    assert!(keywords.contains(Keyword::Landwalk));
    assert_eq!(grants.landwalks, vec![LandType::Island]);
}

#[test]
fn bolt_parses_to_a_damage_effect() {
    let bolt = DATABASE.printed(test_cards::LIGHTNING_BOLT).unwrap();
    let spell = bolt.front().abilities.iter().find_map(|ability| match ability {
        AbilityDefinition::Spell(spell) => Some(spell),
        _ => None,
    });
    assert_eq!(
        spell.unwrap().effects,
        vec![Effect::DealDamage {
            amount: DynamicValue::Fixed(3),
            target: TargetSpec::AnyTarget
        }]
    );
}

#[test]
fn mana_ability_is_detected() {
    let elves = DATABASE.printed(test_cards::LLANOWAR_ELVES).unwrap();
    let activated = elves.front().abilities.iter().find_map(|ability| match ability {
        AbilityDefinition::Activated(activated) => Some(activated),
        _ => None,
    });
    assert!(activated.unwrap().is_mana_ability);
}

#[test]
fn unparsed_text_falls_back_to_raw() {
    let parsed = oracle::ability_parser::parse(
        "Mystery Card",
        "Whelm the doubtful with unknowable grandeur.",
        false,
    );
    assert!(matches!(parsed.abilities.as_slice(), [AbilityDefinition::Raw(_)]));
}

#[test]
fn planeswalker_abilities_parse_with_ultimate() {
    let jace = DATABASE.printed(test_cards::JACE_MEMORY_ADEPT).unwrap();
    let abilities = &jace.front().planeswalker_abilities;
    assert_eq!(abilities.len(), 3);
    assert_eq!(abilities[0].loyalty_change, 1);
    assert_eq!(abilities[1].loyalty_change, 0);
    assert_eq!(abilities[2].loyalty_change, -7);
    assert!(abilities[2].is_ultimate);
    assert!(!abilities[0].is_ultimate);
}

#[test]
fn spree_modes_parse() {
    let modes =
        variant_parser::parse_spree_modes("Spree\n+ {1} — Draw a card.\n+ {2} — Destroy target creature.");
    assert_eq!(modes.len(), 2);
    assert_eq!(modes[0].cost.mana_value(), 1);
    assert_eq!(modes[0].effects.len(), 1);
}

#[test]
fn class_levels_parse_sorted() {
    let class = DATABASE.printed(test_cards::RANGER_CLASS).unwrap();
    let levels = &class.front().class_levels;
    assert_eq!(levels.len(), 3);
    assert_eq!(levels[0].level, 1);
    assert!(levels[0].cost.is_none());
    assert_eq!(levels[1].level, 2);
    assert_eq!(levels[1].cost.as_ref().unwrap().mana_value(), 2);
    assert_eq!(levels[2].level, 3);
}

#[test]
fn saga_chapters_parse() {
    let saga = DATABASE.printed(test_cards::HISTORY_OF_BENALIA).unwrap();
    let chapters = &saga.front().saga_chapters;
    assert_eq!(chapters.len(), 3);
    assert_eq!(chapters[0].chapter, 1);
    assert_eq!(chapters[1].chapter, 2);
    assert_eq!(chapters[0].effects, chapters[1].effects);
    assert_eq!(chapters[2].chapter, 3);
}

#[test]
fn transforming_dfc_is_classified() {
    let delver = DATABASE.printed(test_cards::DELVER_OF_SECRETS).unwrap();
    assert_eq!(delver.layout, CardLayout::Transform);
    assert!(delver.is_transforming_dfc());
    assert!(!delver.is_modal_dfc());
    assert_eq!(delver.transform_trigger, Some(TransformTriggerKind::Condition));
    assert_eq!(delver.faces.len(), 2);
    assert_eq!(delver.faces[1].name, "Insectile Aberration");
}

#[test]
fn flip_cards_are_classified_as_flip() {
    let bushi = DATABASE.printed(test_cards::BUSHI_TENDERFOOT).unwrap();
    assert_eq!(bushi.layout, CardLayout::Flip);
    assert_eq!(bushi.transform_trigger, Some(TransformTriggerKind::Flip));
    assert!(bushi.is_transforming_dfc());
    assert_eq!(bushi.faces[1].name, "Kenzo the Hardhearted");
}

#[test]
fn coin_flips_are_not_flip_instructions() {
    assert!(!oracle::variant_parser::has_flip_instruction("flip a coin"));
    assert!(oracle::variant_parser::has_flip_instruction(
        "when this creature dies, flip bushi tenderfoot"
    ));
}

#[test]
fn auras_parse_an_enchant_requirement() {
    let aura = DATABASE.printed(test_cards::HOLY_STRENGTH).unwrap();
    let spec = oracle::ability_parser::enchant_target(&aura.front().oracle_text);
    assert!(matches!(spec, Some(TargetSpec::Permanent(_))));
}
