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

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use data::card_states::card_state::TappedState;
use data::card_states::counters::CounterKind;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{CardId, PlayerName, Zone};
use data::effects::characteristics::CalculatedCharacteristics;
use data::card_definitions::card_filter::{CardFilter, ControllerRestriction};
use data::effects::continuous_effect::{
    ContinuousEffect, ContinuousEffectKind, EffectCondition, EffectDuration, EffectLayer,
    EffectTargets,
};
use data::game_states::game_state::GameState;
use enum_iterator::all;
use tracing::{instrument, warn};

/// Applies the seven-layer continuous-effect pipeline, producing derived
/// characteristics for every battlefield card.
///
/// The computation is non-destructive: base characteristics are snapshotted
/// into a scratch map, each layer's effects are applied in timestamp order,
/// and the final values are written back to the live cards. With an
/// unchanged effect registry and battlefield, reapplication is skipped via
/// a cache key and is in any case idempotent.
///
/// Dependency analysis between effects is limited to timestamp ordering;
/// an effect depending on a later effect's output (e.g. a type change
/// feeding a characteristic-defining ability) is applied in timestamp
/// order, matching rule 613.7's fallback.
#[instrument(name = "layers_recalculate", level = "trace", skip(game))]
pub fn recalculate(game: &mut GameState) {
    let key = cache_key(game);
    if game.effects.last_applied_cache_key == Some(key) {
        return;
    }

    expire_stale_effects(game);

    // 1. Snapshot base characteristics plus instance state.
    let mut calculated: BTreeMap<CardId, CalculatedCharacteristics> = BTreeMap::new();
    for id in game.zones.all_battlefield_cards().collect::<Vec<_>>() {
        let Some(card) = game.card(id) else {
            continue;
        };
        calculated
            .insert(id, CalculatedCharacteristics::base(card.current_face(), card.controller));
    }

    // 2. Layers 1 through 6, then 7a.
    for layer in [
        EffectLayer::Copy,
        EffectLayer::Control,
        EffectLayer::Text,
        EffectLayer::Type,
        EffectLayer::Color,
        EffectLayer::Ability,
        EffectLayer::PowerToughnessSetting,
    ] {
        apply_layer(game, layer, &mut calculated);
    }

    // 3. Layer 7b: counter adjustments, read from live counters.
    for (id, characteristics) in calculated.iter_mut() {
        if let Some(card) = game.card(*id) {
            let plus = card.counters.count(CounterKind::PlusOnePlusOne) as i64;
            let minus = card.counters.count(CounterKind::MinusOneMinusOne) as i64;
            characteristics.power += plus - minus;
            characteristics.toughness += plus - minus;
        }
    }

    // 4. Layers 7c and 7d.
    apply_layer(game, EffectLayer::PowerToughnessModifying, &mut calculated);
    apply_layer(game, EffectLayer::PowerToughnessSwitching, &mut calculated);

    // 5. Write back to live cards, relocating control changes.
    for (id, characteristics) in calculated {
        let new_controller = characteristics.controller;
        let old_controller = game.card(id).map(|card| card.controller);
        if let Some(card) = game.card_mut(id) {
            card.derived = Some(characteristics);
        }
        if old_controller.is_some() && old_controller != Some(new_controller) {
            game.zones.set_battlefield_controller(id, new_controller);
        }
    }

    game.effects.last_applied_cache_key = Some(cache_key(game));
}

/// Cache key over battlefield contents and effect registry size.
fn cache_key(game: &GameState) -> u64 {
    let mut hasher = DefaultHasher::new();
    for player in all::<PlayerName>() {
        for id in game.battlefield(player) {
            id.hash(&mut hasher);
            if let Some(card) = game.card(*id) {
                card.object_id.hash(&mut hasher);
            }
        }
    }
    game.effects.len().hash(&mut hasher);
    hasher.finish()
}

/// Drops effects whose duration has lapsed because their source left the
/// battlefield.
fn expire_stale_effects(game: &mut GameState) {
    let stale: Vec<CardId> = game
        .effects
        .effects()
        .iter()
        .filter(|effect| {
            matches!(effect.duration, EffectDuration::WhileSourceOnBattlefield)
                && game.card(effect.source).map_or(true, |card| card.zone != Zone::Battlefield)
        })
        .map(|effect| effect.source)
        .collect();
    for source in stale {
        game.effects.remove_by_source(source);
    }
}

fn apply_layer(
    game: &GameState,
    layer: EffectLayer,
    calculated: &mut BTreeMap<CardId, CalculatedCharacteristics>,
) {
    let effects: Vec<ContinuousEffect> =
        game.effects.effects_in_layer(layer).into_iter().cloned().collect();
    for effect in effects {
        if !condition_holds(game, &effect) {
            continue;
        }
        let affected = affected_cards(game, &effect, calculated);
        for id in affected {
            if let Some(characteristics) = calculated.get_mut(&id) {
                apply_effect_kind(game, &effect.kind, characteristics);
            }
        }
    }
}

fn condition_holds(game: &GameState, effect: &ContinuousEffect) -> bool {
    match effect.condition {
        None => true,
        Some(EffectCondition::SourceUntapped) => game
            .card(effect.source)
            .is_some_and(|card| card.tapped_state == TappedState::Untapped),
        Some(EffectCondition::DuringTurnOf(player)) => game.turn.active_player == player,
    }
}

fn affected_cards(
    game: &GameState,
    effect: &ContinuousEffect,
    calculated: &BTreeMap<CardId, CalculatedCharacteristics>,
) -> Vec<CardId> {
    match &effect.targets {
        EffectTargets::Single(id) => vec![*id],
        EffectTargets::Cards(ids) => ids.clone(),
        EffectTargets::Filter(filter) => calculated
            .iter()
            .filter(|(id, characteristics)| {
                scratch_filter_matches(
                    filter,
                    **id,
                    characteristics,
                    effect.controller,
                    effect.source,
                )
            })
            .map(|(id, _)| *id)
            .collect(),
    }
}

/// Filter matching against the in-progress scratch characteristics, so
/// type and color changes from earlier layers are visible to later ones.
fn scratch_filter_matches(
    filter: &CardFilter,
    id: CardId,
    characteristics: &CalculatedCharacteristics,
    filter_controller: PlayerName,
    source: CardId,
) -> bool {
    if filter.exclude_source && id == source {
        return false;
    }
    if !filter.card_types.is_empty() && filter.card_types.is_disjoint(characteristics.card_types) {
        return false;
    }
    if let Some(subtype) = &filter.subtype {
        if !characteristics.subtypes.contains(subtype) {
            return false;
        }
    }
    if let Some(restriction) = filter.controller {
        let matches = match restriction {
            ControllerRestriction::You => characteristics.controller == filter_controller,
            ControllerRestriction::Opponent => characteristics.controller != filter_controller,
        };
        if !matches {
            return false;
        }
    }
    if !filter.colors.is_empty() && filter.colors.is_disjoint(characteristics.colors) {
        return false;
    }
    true
}

fn apply_effect_kind(
    game: &GameState,
    kind: &ContinuousEffectKind,
    characteristics: &mut CalculatedCharacteristics,
) {
    match kind {
        ContinuousEffectKind::CopyOf(other) => {
            if let Some(card) = game.card(*other) {
                let controller = characteristics.controller;
                *characteristics =
                    CalculatedCharacteristics::base(card.printed().front(), controller);
            } else {
                warn!(?other, "Copy source card missing, skipping copy effect");
            }
        }
        ContinuousEffectKind::SetController(player) => characteristics.controller = *player,
        ContinuousEffectKind::SetName(name) => characteristics.name = name.clone(),
        ContinuousEffectKind::AddType(card_type) => {
            characteristics.card_types.insert(*card_type);
        }
        ContinuousEffectKind::RemoveType(card_type) => {
            characteristics.card_types.remove(*card_type);
        }
        ContinuousEffectKind::SetTypes(types) => characteristics.card_types = *types,
        ContinuousEffectKind::AddSubtype(subtype) => {
            if !characteristics.subtypes.contains(subtype) {
                characteristics.subtypes.all.push(subtype.clone());
            }
        }
        ContinuousEffectKind::RemoveSubtype(subtype) => {
            characteristics.subtypes.all.retain(|s| !s.eq_ignore_ascii_case(subtype));
        }
        ContinuousEffectKind::AddSupertype(supertype) => {
            characteristics.supertypes.insert(*supertype);
        }
        ContinuousEffectKind::AddColors(colors) => {
            characteristics.colors |= *colors;
        }
        ContinuousEffectKind::SetColors(colors) => characteristics.colors = *colors,
        ContinuousEffectKind::RemoveColors(colors) => {
            characteristics.colors -= *colors;
        }
        ContinuousEffectKind::AddKeyword(keyword) => {
            characteristics.keywords.insert(*keyword);
        }
        ContinuousEffectKind::RemoveKeyword(keyword) => {
            characteristics.keywords.remove(*keyword);
        }
        ContinuousEffectKind::RemoveAllAbilities => {
            characteristics.keywords.clear();
            characteristics.keyword_grants = Default::default();
        }
        ContinuousEffectKind::GrantProtection(protection) => {
            if !characteristics.keyword_grants.protections.contains(protection) {
                characteristics.keyword_grants.protections.push(*protection);
            }
        }
        ContinuousEffectKind::GrantWard(cost) => {
            let current = characteristics.keyword_grants.ward_cost.unwrap_or(0);
            characteristics.keyword_grants.ward_cost = Some(current.max(*cost));
        }
        ContinuousEffectKind::SetPowerToughness { power, toughness } => {
            characteristics.power = *power;
            characteristics.toughness = *toughness;
        }
        ContinuousEffectKind::ModifyPowerToughness { power, toughness } => {
            characteristics.power += *power;
            characteristics.toughness += *toughness;
        }
        ContinuousEffectKind::SwitchPowerToughness => {
            std::mem::swap(&mut characteristics.power, &mut characteristics.toughness);
        }
    }
}
