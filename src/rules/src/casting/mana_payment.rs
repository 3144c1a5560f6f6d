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

use std::collections::BTreeMap;

use data::card_definitions::ability_definition::{AbilityCost, AbilityDefinition};
use data::card_definitions::effect_definition::Effect;
use data::card_states::card_state::TappedState;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{CardId, HasSource, ManaColor, PlayerName};
use data::game_states::game_state::GameState;
use data::player_states::player_state::PlayerQueries;
use data::printed_cards::card_subtypes::LandType;
use data::printed_cards::mana_cost::{ManaCost, ManaCostItem};
use tracing::instrument;
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::{mana, permanents, players};
use crate::queries::card_queries;

/// A concrete way to pay a mana cost: mana taken from the pool, sources to
/// tap for the remainder, and life paid for phyrexian symbols.
#[derive(Debug, Clone, Default)]
pub struct ManaPaymentPlan {
    /// Mana spent from the floating pool, by color
    pub from_pool: Vec<ManaColor>,

    /// Permanents to tap, with the color each produces for this payment
    pub sources_to_tap: Vec<(CardId, ManaColor)>,

    /// Life paid in place of phyrexian mana symbols
    pub life_for_phyrexian: u64,
}

/// Untapped mana sources a player controls and the colors each can
/// produce. Basic land types grant their intrinsic ability; other
/// permanents contribute their parsed tap-for-mana abilities.
type SourceMap = Vec<(CardId, Vec<ManaColor>)>;

/// Builds a payment plan for a mana cost, or `None` if the player cannot
/// afford it.
///
/// Colored symbols are satisfied first (pool, then the least-flexible
/// source), hybrid symbols resolve toward whichever half is cheapest to
/// satisfy, phyrexian symbols fall back to paying 2 life, and generic
/// costs consume whatever remains, most plentiful colors first.
#[instrument(level = "trace", skip(game, cost))]
pub fn plan(
    game: &GameState,
    player: PlayerName,
    cost: &ManaCost,
    chosen_x: Option<u64>,
) -> Option<ManaPaymentPlan> {
    let mut pool: BTreeMap<ManaColor, u64> =
        game.player(player).mana_pool.iter().filter(|(_, n)| *n > 0).collect();
    let mut sources = available_sources(game, player);
    // Sources producing fewer colors are consumed first, keeping flexible
    // lands available for later symbols.
    sources.sort_by_key(|(id, colors)| (colors.len(), *id));

    let mut result = ManaPaymentPlan::default();
    let life_available = game.player(player).life;

    let mut items = cost.items.clone();
    items.sort();
    for item in &items {
        match item {
            ManaCostItem::Colored(color) | ManaCostItem::Snow(color) => {
                if !pay_colored(&mut pool, &mut sources, &mut result, *color) {
                    return None;
                }
            }
            ManaCostItem::Hybrid(a, b) => {
                if !pay_colored(&mut pool, &mut sources, &mut result, *a)
                    && !pay_colored(&mut pool, &mut sources, &mut result, *b)
                {
                    return None;
                }
            }
            ManaCostItem::MonoHybrid(color) => {
                if !pay_colored(&mut pool, &mut sources, &mut result, *color)
                    && !(pay_generic(&mut pool, &mut sources, &mut result)
                        && pay_generic(&mut pool, &mut sources, &mut result))
                {
                    return None;
                }
            }
            ManaCostItem::Phyrexian(color) => {
                if !pay_colored(&mut pool, &mut sources, &mut result, *color) {
                    result.life_for_phyrexian += 2;
                }
            }
            ManaCostItem::PhyrexianHybrid(a, b) => {
                if !pay_colored(&mut pool, &mut sources, &mut result, *a)
                    && !pay_colored(&mut pool, &mut sources, &mut result, *b)
                {
                    result.life_for_phyrexian += 2;
                }
            }
            ManaCostItem::VariableX => {
                for _ in 0..chosen_x.unwrap_or(0) {
                    if !pay_generic(&mut pool, &mut sources, &mut result) {
                        return None;
                    }
                }
            }
            ManaCostItem::Generic => {
                if !pay_generic(&mut pool, &mut sources, &mut result) {
                    return None;
                }
            }
        }
    }

    // Paying life is not a legal choice if it would bring the player to 0.
    if result.life_for_phyrexian > 0 && life_available <= result.life_for_phyrexian as i64 {
        return None;
    }

    Some(result)
}

/// True if the player can pay this cost at all (with X as zero).
pub fn can_pay(game: &GameState, player: PlayerName, cost: &ManaCost) -> bool {
    plan(game, player, cost, Some(0)).is_some()
}

/// The largest X such that the cost remains payable.
pub fn max_affordable_x(game: &GameState, player: PlayerName, cost: &ManaCost) -> u64 {
    let mut x = 0;
    while x < 32 && plan(game, player, cost, Some(x + 1)).is_some() {
        x += 1;
    }
    x
}

/// Executes a payment plan: taps each planned source for its mana, then
/// deducts everything from the pool and pays phyrexian life.
pub fn execute(
    game: &mut GameState,
    source: impl HasSource,
    player: PlayerName,
    payment: &ManaPaymentPlan,
) -> Outcome {
    let source = source.source();
    for (land, color) in &payment.sources_to_tap {
        permanents::tap(game, source, *land)?;
        mana::add(game, source, player, &[*color])?;
    }

    for color in payment.from_pool.iter().chain(payment.sources_to_tap.iter().map(|(_, c)| c)) {
        if !game.player_mut(player).mana_pool.spend(*color, 1) {
            // Planner and pool disagree; fall back to generic spending so
            // payment never silently under-deducts.
            game.player_mut(player).mana_pool.spend_generic(1);
        }
    }

    if payment.life_for_phyrexian > 0 {
        players::lose_life(game, source, player, payment.life_for_phyrexian as i64)?;
    }
    outcome::OK
}

fn pay_colored(
    pool: &mut BTreeMap<ManaColor, u64>,
    sources: &mut SourceMap,
    result: &mut ManaPaymentPlan,
    color: ManaColor,
) -> bool {
    if let Some(amount) = pool.get_mut(&color) {
        if *amount > 0 {
            *amount -= 1;
            result.from_pool.push(color);
            return true;
        }
    }
    if let Some(position) = sources.iter().position(|(_, colors)| colors.contains(&color)) {
        let (id, _) = sources.remove(position);
        result.sources_to_tap.push((id, color));
        return true;
    }
    false
}

fn pay_generic(
    pool: &mut BTreeMap<ManaColor, u64>,
    sources: &mut SourceMap,
    result: &mut ManaPaymentPlan,
) -> bool {
    if let Some((&color, _)) = pool.iter().filter(|(_, n)| **n > 0).max_by_key(|(_, n)| **n) {
        *pool.get_mut(&color).expect("color present") -= 1;
        result.from_pool.push(color);
        return true;
    }
    if let Some((id, colors)) = sources.pop() {
        let color = colors.first().copied().unwrap_or(ManaColor::Colorless);
        result.sources_to_tap.push((id, color));
        return true;
    }
    false
}

/// Collects the player's untapped permanents which can produce mana and
/// the colors they can produce.
pub fn available_sources(game: &GameState, player: PlayerName) -> SourceMap {
    let mut sources = vec![];
    for &id in game.battlefield(player) {
        let Some(card) = game.card(id) else {
            continue;
        };
        if card.tapped_state == TappedState::Tapped {
            continue;
        }
        // Creatures with summoning sickness cannot use tap abilities.
        if card_queries::is_creature(game, id) && card_queries::has_summoning_sickness(game, id) {
            continue;
        }

        let mut colors = vec![];
        let Some(characteristics) = card_queries::characteristics(game, id) else {
            continue;
        };
        for land in characteristics.subtypes.lands {
            colors.push(intrinsic_mana_color(land));
        }
        for ability in &card.current_face().abilities {
            if let AbilityDefinition::Activated(activated) = ability {
                let only_tap =
                    activated.costs.iter().all(|cost| matches!(cost, AbilityCost::Tap));
                if activated.is_mana_ability && only_tap {
                    for effect in &activated.effects {
                        if let Effect::AddMana { mana } = effect {
                            colors.extend(mana.iter().copied());
                        }
                    }
                }
            }
        }

        colors.sort();
        colors.dedup();
        if !colors.is_empty() {
            sources.push((id, colors));
        }
    }
    sources
}

fn intrinsic_mana_color(land: LandType) -> ManaColor {
    match land {
        LandType::Plains => ManaColor::White,
        LandType::Island => ManaColor::Blue,
        LandType::Swamp => ManaColor::Black,
        LandType::Mountain => ManaColor::Red,
        LandType::Forest => ManaColor::Green,
    }
}
