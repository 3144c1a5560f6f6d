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

use color_eyre::eyre::eyre;
use data::core::primitives::ManaColor;
use data::printed_cards::mana_cost::{ManaCost, ManaCostItem};
use utils::outcome::{StopCondition, Value};

/// Parses a mana cost string of `{..}` symbols, e.g. `{2}{W}{W/U}{B/P}{X}`.
///
/// Returns an error for any symbol the cost grammar does not recognize.
pub fn parse(cost: &str) -> Value<ManaCost> {
    let mut items = vec![];
    let trimmed = cost.trim();
    if trimmed.is_empty() {
        return Ok(ManaCost::default());
    }

    let mut remaining = trimmed;
    while !remaining.is_empty() {
        let Some(start) = remaining.find('{') else {
            return Err(invalid(cost));
        };
        let Some(end) = remaining.find('}') else {
            return Err(invalid(cost));
        };
        if end < start {
            return Err(invalid(cost));
        }
        parse_symbol(&remaining[start + 1..end], cost, &mut items)?;
        remaining = &remaining[end + 1..];
    }

    // Colored symbols sort after generic so payment handles the most
    // constrained symbols first when iterated in reverse.
    items.sort();
    Ok(ManaCost { items })
}

fn parse_symbol(symbol: &str, full_cost: &str, items: &mut Vec<ManaCostItem>) -> Value<()> {
    if let Ok(generic) = symbol.parse::<u64>() {
        items.extend(std::iter::repeat(ManaCostItem::Generic).take(generic as usize));
        return Ok(());
    }

    match symbol {
        "X" => items.push(ManaCostItem::VariableX),
        "S" => items.push(ManaCostItem::Snow(ManaColor::Colorless)),
        _ => {
            let parts: Vec<&str> = symbol.split('/').collect();
            match parts.as_slice() {
                [single] => items.push(ManaCostItem::Colored(color(single, full_cost)?)),
                ["2", c] => items.push(ManaCostItem::MonoHybrid(color(c, full_cost)?)),
                [c, "P"] => items.push(ManaCostItem::Phyrexian(color(c, full_cost)?)),
                [a, b, "P"] => items.push(ManaCostItem::PhyrexianHybrid(
                    color(a, full_cost)?,
                    color(b, full_cost)?,
                )),
                [a, b] => {
                    items.push(ManaCostItem::Hybrid(color(a, full_cost)?, color(b, full_cost)?))
                }
                _ => return Err(invalid(full_cost)),
            }
        }
    }
    Ok(())
}

fn color(letter: &str, full_cost: &str) -> Value<ManaColor> {
    match letter {
        "W" => Ok(ManaColor::White),
        "U" => Ok(ManaColor::Blue),
        "B" => Ok(ManaColor::Black),
        "R" => Ok(ManaColor::Red),
        "G" => Ok(ManaColor::Green),
        "C" => Ok(ManaColor::Colorless),
        _ => Err(invalid(full_cost)),
    }
}

fn invalid(cost: &str) -> StopCondition {
    StopCondition::Error(eyre!("Invalid mana cost string: {cost:?}"))
}
