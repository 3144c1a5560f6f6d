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

use data::core::keywords::{Keyword, KeywordGrants, ProtectionFrom};
use data::core::primitives::Color;
use data::printed_cards::card_subtypes::LandType;
use enumset::EnumSet;
use once_cell::sync::Lazy;
use regex::Regex;

static REMINDER_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid reminder-text regex"));

static WARD_COST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ward \{(\d+)\}").expect("valid ward regex"));

static PROTECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"protection from ([a-z ]+)").expect("valid protection regex"));

/// Scans oracle text for every keyword ability the engine recognizes.
///
/// Matching is word-boundary based over lowercased text with reminder text
/// stripped, so "flashback" does not match "flash". Landwalk variants,
/// ward costs, and protection choices are additionally captured into the
/// returned [KeywordGrants].
pub fn extract(oracle_text: &str) -> (EnumSet<Keyword>, KeywordGrants) {
    let stripped = REMINDER_TEXT.replace_all(oracle_text, "");
    let text = stripped.to_ascii_lowercase();
    let mut keywords = EnumSet::empty();
    let mut grants = KeywordGrants::default();

    for keyword in enum_iterator::all::<Keyword>() {
        if contains_word(&text, &keyword.to_string()) {
            keywords.insert(keyword);
        }
    }

    for (walk, land) in [
        ("plainswalk", LandType::Plains),
        ("islandwalk", LandType::Island),
        ("swampwalk", LandType::Swamp),
        ("mountainwalk", LandType::Mountain),
        ("forestwalk", LandType::Forest),
    ] {
        if contains_word(&text, walk) {
            keywords.insert(Keyword::Landwalk);
            grants.landwalks.push(land);
        }
    }

    if let Some(captures) = WARD_COST.captures(&text) {
        grants.ward_cost = captures[1].parse().ok();
    }

    for captures in PROTECTION.captures_iter(&text) {
        match parse_protection(captures[1].trim()) {
            Some(protection) if !grants.protections.contains(&protection) => {
                grants.protections.push(protection)
            }
            _ => {}
        }
    }

    (keywords, grants)
}

fn parse_protection(choice: &str) -> Option<ProtectionFrom> {
    let protection = match choice {
        "white" => ProtectionFrom::Color(Color::White),
        "blue" => ProtectionFrom::Color(Color::Blue),
        "black" => ProtectionFrom::Color(Color::Black),
        "red" => ProtectionFrom::Color(Color::Red),
        "green" => ProtectionFrom::Color(Color::Green),
        "all colors" => ProtectionFrom::AllColors,
        "creatures" => ProtectionFrom::Creatures,
        "everything" => ProtectionFrom::Everything,
        _ => return None,
    };
    Some(protection)
}

/// Word-boundary substring test.
fn contains_word(text: &str, word: &str) -> bool {
    let mut start = 0;
    while let Some(found) = text[start..].find(word) {
        let begin = start + found;
        let end = begin + word.len();
        let boundary_before =
            begin == 0 || !text.as_bytes()[begin - 1].is_ascii_alphanumeric();
        let boundary_after =
            end == text.len() || !text.as_bytes()[end].is_ascii_alphanumeric();
        if boundary_before && boundary_after {
            return true;
        }
        start = begin + 1;
    }
    false
}
