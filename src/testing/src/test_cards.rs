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

use std::collections::HashMap;

use data::core::primitives::CardNumber;
use data::printed_cards::database_card::{DatabaseCard, DatabaseCardFace};
use once_cell::sync::Lazy;
use oracle::card_database::JsonCardDatabase;

pub const PLAINS: CardNumber = CardNumber(1);
pub const ISLAND: CardNumber = CardNumber(2);
pub const SWAMP: CardNumber = CardNumber(3);
pub const MOUNTAIN: CardNumber = CardNumber(4);
pub const FOREST: CardNumber = CardNumber(5);

pub const LIGHTNING_BOLT: CardNumber = CardNumber(10);
pub const GRIZZLY_BEARS: CardNumber = CardNumber(11);
pub const COUNTERSPELL: CardNumber = CardNumber(12);
pub const GIANT_GROWTH: CardNumber = CardNumber(13);
pub const SERRA_ANGEL: CardNumber = CardNumber(14);
pub const CRAW_WURM: CardNumber = CardNumber(15);
pub const WIND_DRAKE: CardNumber = CardNumber(16);
pub const GLORY_SEEKER: CardNumber = CardNumber(17);
pub const HILL_GIANT: CardNumber = CardNumber(18);
pub const COLOSSAL_DREADMAW: CardNumber = CardNumber(19);
pub const TYPHOID_RATS: CardNumber = CardNumber(20);
pub const FENCING_ACE: CardNumber = CardNumber(21);
pub const YOUTHFUL_KNIGHT: CardNumber = CardNumber(22);
pub const HOLY_STRENGTH: CardNumber = CardNumber(23);
pub const GLORIOUS_ANTHEM: CardNumber = CardNumber(24);
pub const DARKSTEEL_MYR: CardNumber = CardNumber(25);
pub const ISAMARU: CardNumber = CardNumber(26);
pub const RAGING_GOBLIN: CardNumber = CardNumber(27);
pub const DEADLY_RECLUSE: CardNumber = CardNumber(28);
pub const LONE_MISSIONARY: CardNumber = CardNumber(29);
pub const ALLEY_STRANGLER: CardNumber = CardNumber(30);
pub const AIR_ELEMENTAL: CardNumber = CardNumber(31);
pub const PRODIGAL_PYROMANCER: CardNumber = CardNumber(32);
pub const LLANOWAR_ELVES: CardNumber = CardNumber(33);
pub const WALL_OF_WOOD: CardNumber = CardNumber(34);
pub const DIVINATION: CardNumber = CardNumber(35);
pub const LAVA_AXE: CardNumber = CardNumber(36);
pub const MURDER: CardNumber = CardNumber(37);
pub const UNSUMMON: CardNumber = CardNumber(38);
pub const VOLCANIC_GEYSER: CardNumber = CardNumber(39);
pub const RAISE_THE_ALARM: CardNumber = CardNumber(40);
pub const SOUL_WARDEN: CardNumber = CardNumber(41);
pub const VAMPIRE_NIGHTHAWK: CardNumber = CardNumber(42);
pub const GUT_SHOT: CardNumber = CardNumber(43);
pub const DELVER_OF_SECRETS: CardNumber = CardNumber(44);
pub const JACE_MEMORY_ADEPT: CardNumber = CardNumber(45);
pub const RANGER_CLASS: CardNumber = CardNumber(46);
pub const HISTORY_OF_BENALIA: CardNumber = CardNumber(47);
pub const ARASHIN_FOREMOST: CardNumber = CardNumber(48);
pub const GLISSA_THE_TRAITOR: CardNumber = CardNumber(49);
pub const BUSHI_TENDERFOOT: CardNumber = CardNumber(50);

/// Parsed card database shared by tests.
pub static DATABASE: Lazy<JsonCardDatabase> = Lazy::new(|| {
    JsonCardDatabase::from_records(records()).expect("test card database parses")
});

fn records() -> HashMap<CardNumber, DatabaseCard> {
    let mut cards = HashMap::new();

    for (number, name, land_type) in [
        (PLAINS, "Plains", "Plains"),
        (ISLAND, "Island", "Island"),
        (SWAMP, "Swamp", "Swamp"),
        (MOUNTAIN, "Mountain", "Mountain"),
        (FOREST, "Forest", "Forest"),
    ] {
        cards.insert(number, DatabaseCard {
            name: name.to_string(),
            type_line: format!("Basic Land — {land_type}"),
            ..DatabaseCard::default()
        });
    }

    cards.insert(LIGHTNING_BOLT, instant(
        "Lightning Bolt",
        "{R}",
        "Lightning Bolt deals 3 damage to any target.",
    ));
    cards.insert(COUNTERSPELL, instant("Counterspell", "{U}{U}", "Counter target spell."));
    cards.insert(GIANT_GROWTH, instant(
        "Giant Growth",
        "{G}",
        "Target creature gets +3/+3 until end of turn.",
    ));
    cards.insert(GUT_SHOT, instant(
        "Gut Shot",
        "{R/P}",
        "Gut Shot deals 1 damage to any target.",
    ));
    cards.insert(MURDER, instant("Murder", "{1}{B}{B}", "Destroy target creature."));
    cards.insert(UNSUMMON, instant(
        "Unsummon",
        "{U}",
        "Return target creature to its owner's hand.",
    ));
    cards.insert(VOLCANIC_GEYSER, instant(
        "Volcanic Geyser",
        "{X}{R}{R}",
        "Volcanic Geyser deals X damage to any target.",
    ));
    cards.insert(RAISE_THE_ALARM, instant(
        "Raise the Alarm",
        "{1}{W}",
        "Create two 1/1 white Soldier creature tokens.",
    ));

    cards.insert(DIVINATION, sorcery("Divination", "{2}{U}", "Draw two cards."));
    cards.insert(LAVA_AXE, sorcery(
        "Lava Axe",
        "{4}{R}",
        "Lava Axe deals 5 damage to target player or planeswalker.",
    ));

    cards.insert(GRIZZLY_BEARS, creature("Grizzly Bears", "{1}{G}", "Bear", "", 2, 2));
    cards.insert(SERRA_ANGEL, creature(
        "Serra Angel",
        "{3}{W}{W}",
        "Angel",
        "Flying, vigilance",
        4,
        4,
    ));
    cards.insert(CRAW_WURM, creature("Craw Wurm", "{4}{G}{G}", "Wurm", "", 6, 4));
    cards.insert(WIND_DRAKE, creature("Wind Drake", "{2}{U}", "Drake", "Flying", 2, 2));
    cards.insert(GLORY_SEEKER, creature("Glory Seeker", "{1}{W}", "Human Soldier", "", 2, 2));
    cards.insert(HILL_GIANT, creature("Hill Giant", "{3}{R}", "Giant", "", 3, 3));
    cards.insert(COLOSSAL_DREADMAW, creature(
        "Colossal Dreadmaw",
        "{4}{G}{G}",
        "Dinosaur",
        "Trample",
        6,
        6,
    ));
    cards.insert(TYPHOID_RATS, creature("Typhoid Rats", "{B}", "Rat", "Deathtouch", 1, 1));
    cards.insert(FENCING_ACE, creature(
        "Fencing Ace",
        "{1}{W}",
        "Human Soldier",
        "Double strike",
        1,
        1,
    ));
    cards.insert(YOUTHFUL_KNIGHT, creature(
        "Youthful Knight",
        "{1}{W}",
        "Human Knight",
        "First strike",
        2,
        1,
    ));
    cards.insert(DARKSTEEL_MYR, DatabaseCard {
        name: "Darksteel Myr".to_string(),
        mana_cost: Some("{3}".to_string()),
        type_line: "Artifact Creature — Myr".to_string(),
        oracle_text: "Indestructible".to_string(),
        power: Some("0".to_string()),
        toughness: Some("1".to_string()),
        ..DatabaseCard::default()
    });
    cards.insert(ISAMARU, DatabaseCard {
        name: "Isamaru, Hound of Konda".to_string(),
        mana_cost: Some("{W}".to_string()),
        type_line: "Legendary Creature — Dog".to_string(),
        power: Some("2".to_string()),
        toughness: Some("2".to_string()),
        ..DatabaseCard::default()
    });
    cards.insert(RAGING_GOBLIN, creature("Raging Goblin", "{R}", "Goblin Berserker", "Haste", 1, 1));
    cards.insert(DEADLY_RECLUSE, creature(
        "Deadly Recluse",
        "{1}{G}",
        "Spider",
        "Reach\nDeathtouch",
        1,
        2,
    ));
    cards.insert(LONE_MISSIONARY, creature(
        "Lone Missionary",
        "{1}{W}",
        "Kor Cleric",
        "When Lone Missionary enters the battlefield, you gain 4 life.",
        2,
        1,
    ));
    cards.insert(ALLEY_STRANGLER, creature(
        "Alley Strangler",
        "{2}{B}",
        "Aetherborn Rogue",
        "Menace",
        2,
        3,
    ));
    cards.insert(AIR_ELEMENTAL, creature("Air Elemental", "{3}{U}{U}", "Elemental", "Flying", 4, 4));
    cards.insert(PRODIGAL_PYROMANCER, creature(
        "Prodigal Pyromancer",
        "{2}{R}",
        "Human Wizard",
        "{T}: Prodigal Pyromancer deals 1 damage to any target.",
        1,
        1,
    ));
    cards.insert(LLANOWAR_ELVES, creature(
        "Llanowar Elves",
        "{G}",
        "Elf Druid",
        "{T}: Add {G}.",
        1,
        1,
    ));
    cards.insert(WALL_OF_WOOD, creature("Wall of Wood", "{G}", "Wall", "Defender", 0, 3));
    cards.insert(SOUL_WARDEN, creature(
        "Soul Warden",
        "{W}",
        "Human Cleric",
        "Whenever another creature enters the battlefield, you gain 1 life.",
        1,
        1,
    ));
    cards.insert(VAMPIRE_NIGHTHAWK, creature(
        "Vampire Nighthawk",
        "{1}{B}{B}",
        "Vampire Shaman",
        "Flying, deathtouch, lifelink",
        2,
        3,
    ));

    cards.insert(ARASHIN_FOREMOST, creature(
        "Arashin Foremost",
        "{1}{W}{W}",
        "Human Warrior",
        "Double strike",
        2,
        2,
    ));
    cards.insert(GLISSA_THE_TRAITOR, DatabaseCard {
        name: "Glissa, the Traitor".to_string(),
        mana_cost: Some("{B}{G}{G}".to_string()),
        type_line: "Legendary Creature — Zombie Elf".to_string(),
        oracle_text: "First strike, deathtouch".to_string(),
        power: Some("3".to_string()),
        toughness: Some("3".to_string()),
        ..DatabaseCard::default()
    });

    cards.insert(HOLY_STRENGTH, DatabaseCard {
        name: "Holy Strength".to_string(),
        mana_cost: Some("{W}".to_string()),
        type_line: "Enchantment — Aura".to_string(),
        oracle_text: "Enchant creature\nEnchanted creature gets +1/+2.".to_string(),
        ..DatabaseCard::default()
    });
    cards.insert(GLORIOUS_ANTHEM, DatabaseCard {
        name: "Glorious Anthem".to_string(),
        mana_cost: Some("{1}{W}{W}".to_string()),
        type_line: "Enchantment".to_string(),
        oracle_text: "Creatures you control get +1/+1.".to_string(),
        ..DatabaseCard::default()
    });

    cards.insert(DELVER_OF_SECRETS, DatabaseCard {
        name: "Delver of Secrets // Insectile Aberration".to_string(),
        card_faces: Some(vec![
            DatabaseCardFace {
                name: "Delver of Secrets".to_string(),
                mana_cost: Some("{U}".to_string()),
                type_line: "Creature — Human Wizard".to_string(),
                oracle_text: "At the beginning of your upkeep, look at the top card of your \
                              library. You may reveal that card. If an instant or sorcery card \
                              is revealed this way, transform Delver of Secrets."
                    .to_string(),
                power: Some("1".to_string()),
                toughness: Some("1".to_string()),
                ..DatabaseCardFace::default()
            },
            DatabaseCardFace {
                name: "Insectile Aberration".to_string(),
                type_line: "Creature — Human Insect".to_string(),
                oracle_text: "Flying".to_string(),
                power: Some("3".to_string()),
                toughness: Some("2".to_string()),
                ..DatabaseCardFace::default()
            },
        ]),
        ..DatabaseCard::default()
    });

    cards.insert(BUSHI_TENDERFOOT, DatabaseCard {
        name: "Bushi Tenderfoot // Kenzo the Hardhearted".to_string(),
        card_faces: Some(vec![
            DatabaseCardFace {
                name: "Bushi Tenderfoot".to_string(),
                mana_cost: Some("{W}".to_string()),
                type_line: "Creature — Human Soldier".to_string(),
                oracle_text: "When a creature dealt damage by Bushi Tenderfoot this turn dies, \
                              flip Bushi Tenderfoot."
                    .to_string(),
                power: Some("1".to_string()),
                toughness: Some("1".to_string()),
                ..DatabaseCardFace::default()
            },
            DatabaseCardFace {
                name: "Kenzo the Hardhearted".to_string(),
                type_line: "Legendary Creature — Human Samurai".to_string(),
                oracle_text: "Bushido 2".to_string(),
                power: Some("3".to_string()),
                toughness: Some("4".to_string()),
                ..DatabaseCardFace::default()
            },
        ]),
        ..DatabaseCard::default()
    });

    cards.insert(JACE_MEMORY_ADEPT, DatabaseCard {
        name: "Jace, Memory Adept".to_string(),
        mana_cost: Some("{3}{U}{U}".to_string()),
        type_line: "Legendary Planeswalker — Jace".to_string(),
        oracle_text: "+1: Draw a card.\n0: Target player mills 10 cards.\n−7: Target player \
                      mills 20 cards."
            .to_string(),
        loyalty: Some("4".to_string()),
        ..DatabaseCard::default()
    });

    cards.insert(RANGER_CLASS, DatabaseCard {
        name: "Ranger Class".to_string(),
        mana_cost: Some("{1}{G}".to_string()),
        type_line: "Enchantment — Class".to_string(),
        oracle_text: "When Ranger Class enters the battlefield, create a 2/2 green Wolf \
                      creature token.\n{1}{G}: Level 2\nWhenever you attack, put a +1/+1 \
                      counter on target attacking creature.\n{3}{G}: Level 3\nYou may look at \
                      the top card of your library any time."
            .to_string(),
        ..DatabaseCard::default()
    });

    cards.insert(HISTORY_OF_BENALIA, DatabaseCard {
        name: "History of Benalia".to_string(),
        mana_cost: Some("{1}{W}{W}".to_string()),
        type_line: "Enchantment — Saga".to_string(),
        oracle_text: "I, II — Create a 2/2 white Knight creature token with vigilance.\nIII — \
                      Knights you control get +2/+1 until end of turn."
            .to_string(),
        ..DatabaseCard::default()
    });

    cards
}

fn instant(name: &str, cost: &str, text: &str) -> DatabaseCard {
    DatabaseCard {
        name: name.to_string(),
        mana_cost: Some(cost.to_string()),
        type_line: "Instant".to_string(),
        oracle_text: text.to_string(),
        ..DatabaseCard::default()
    }
}

fn sorcery(name: &str, cost: &str, text: &str) -> DatabaseCard {
    DatabaseCard {
        name: name.to_string(),
        mana_cost: Some(cost.to_string()),
        type_line: "Sorcery".to_string(),
        oracle_text: text.to_string(),
        ..DatabaseCard::default()
    }
}

fn creature(
    name: &str,
    cost: &str,
    subtypes: &str,
    text: &str,
    power: i64,
    toughness: i64,
) -> DatabaseCard {
    DatabaseCard {
        name: name.to_string(),
        mana_cost: Some(cost.to_string()),
        type_line: format!("Creature — {subtypes}"),
        oracle_text: text.to_string(),
        power: Some(power.to_string()),
        toughness: Some(toughness.to_string()),
        ..DatabaseCard::default()
    }
}
