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
    AbilityDefinition, PlayerScope, StaticAbilityDefinition, TriggerCondition,
    TriggeredAbilityDefinition,
};
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{AbilityNumber, CardId, PlayerName, Timestamp};
use data::effects::continuous_effect::{
    ContinuousEffect, ContinuousEffectKind, EffectDuration, EffectLayer, EffectTargets,
};
use data::effects::replacement::{ReplacementAction, ReplacementEffect, ReplacementScope};
use data::events::game_event::{GameEvent, GameEventKind};
use data::game_states::game_phase_step::GamePhaseStep;
use data::game_states::game_state::{GameState, PendingTrigger};
use oracle::ability_parser::ParsedReplacement;
use oracle::card_parser;
use tracing::debug;

use crate::queries::card_queries;

/// Registers the continuous and replacement effects of a permanent's parsed
/// abilities as it enters the battlefield.
pub fn register_battlefield_abilities(game: &mut GameState, id: CardId) {
    let Some(card) = game.card(id) else {
        return;
    };
    let controller = card.controller;
    let face = card.current_face().clone();

    for ability in &face.abilities {
        if let AbilityDefinition::Static(statik) = ability {
            register_static(game, id, controller, statik);
        }
    }

    for replacement in card_parser::face_replacements(&face) {
        let (event_kind, action) = match replacement {
            ParsedReplacement::EntersTapped => continue,
            ParsedReplacement::EntersWithCounters(_) => continue,
            ParsedReplacement::SkipUntap => (GameEventKind::Untapped, ReplacementAction::SkipUntap),
            ParsedReplacement::DiesToExileInstead => {
                (GameEventKind::Died, ReplacementAction::DiesToExileInstead)
            }
        };
        game.effects.register_replacement(ReplacementEffect {
            id: Default::default(),
            source: id,
            controller,
            event_kind,
            scope: ReplacementScope::Source,
            action,
            timestamp: Timestamp::default(),
        });
    }
}

/// Registers the static abilities granted by a Class card's current level
/// and any unlocked Room doors.
pub fn register_variant_abilities(game: &mut GameState, id: CardId) {
    let Some(card) = game.card(id) else {
        return;
    };
    let controller = card.controller;
    let face = card.current_face().clone();
    let class_level = card.class_level;
    let unlocked = card.unlocked_doors.clone();

    for level in &face.class_levels {
        if u64::from(level.level) <= u64::from(class_level) {
            for ability in &level.abilities {
                if let AbilityDefinition::Static(statik) = ability {
                    register_static(game, id, controller, statik);
                }
            }
        }
    }

    for door in unlocked {
        if let Some(door_data) = face.room_doors.get(door) {
            for statik in &door_data.statics {
                register_static(game, id, controller, statik);
            }
        }
    }
}

fn register_static(
    game: &mut GameState,
    source: CardId,
    controller: PlayerName,
    statik: &StaticAbilityDefinition,
) {
    let effects: Vec<(EffectLayer, EffectTargets, ContinuousEffectKind)> = match statik {
        StaticAbilityDefinition::AnthemPowerToughness { power, toughness, filter } => {
            vec![(
                EffectLayer::PowerToughnessModifying,
                EffectTargets::Filter(filter.clone()),
                ContinuousEffectKind::ModifyPowerToughness {
                    power: *power,
                    toughness: *toughness,
                },
            )]
        }
        StaticAbilityDefinition::GrantKeyword { keyword, filter } => {
            vec![(
                EffectLayer::Ability,
                EffectTargets::Filter(filter.clone()),
                ContinuousEffectKind::AddKeyword(*keyword),
            )]
        }
        StaticAbilityDefinition::GrantKeywordToAttached { keyword } => {
            let Some(host) = game.card(source).and_then(|card| card.attached_to) else {
                return;
            };
            vec![(
                EffectLayer::Ability,
                EffectTargets::Single(host),
                ContinuousEffectKind::AddKeyword(*keyword),
            )]
        }
        StaticAbilityDefinition::ModifyAttachedPowerToughness { power, toughness } => {
            let Some(host) = game.card(source).and_then(|card| card.attached_to) else {
                return;
            };
            vec![(
                EffectLayer::PowerToughnessModifying,
                EffectTargets::Single(host),
                ContinuousEffectKind::ModifyPowerToughness {
                    power: *power,
                    toughness: *toughness,
                },
            )]
        }
        StaticAbilityDefinition::Raw(text) => {
            debug!(?source, "Skipping unparsed static ability: {text}");
            vec![]
        }
    };

    for (layer, targets, kind) in effects {
        game.effects.register(ContinuousEffect {
            id: Default::default(),
            source,
            controller,
            layer,
            targets,
            kind,
            duration: EffectDuration::WhileSourceOnBattlefield,
            timestamp: Timestamp::default(),
            condition: None,
        });
    }
}

/// Removes every registered effect whose source is this card, as it leaves
/// the battlefield.
pub fn unregister(game: &mut GameState, id: CardId) {
    game.effects.remove_by_source(id);
}

/// Re-registers attachment-dependent effects after an aura or equipment
/// moves to a new host.
pub fn refresh_attachment_effects(game: &mut GameState, id: CardId) {
    unregister(game, id);
    register_battlefield_abilities(game, id);
}

/// Matches a game event against every triggered ability on the
/// battlefield, queueing those which fire.
///
/// Dying cards are also consulted for the event that moved them to the
/// graveyard, so "when this creature dies" abilities see their own death.
pub fn fire_event(game: &mut GameState, event: GameEvent) {
    let mut candidates: Vec<CardId> = game.zones.all_battlefield_cards().collect();
    if let GameEvent::Died { card } = event {
        candidates.push(card);
    }

    let mut fired = vec![];

    // Saga chapter abilities live in the face's chapter list rather than
    // its parsed ability list.
    if let GameEvent::SagaChapterBegan { card, chapter } = event {
        if let Some(state) = game.card(card) {
            let controller = state.controller;
            let face = state.current_face();
            for (offset, chapter_def) in face.saga_chapters.iter().enumerate() {
                if chapter_def.chapter == chapter {
                    fired.push(PendingTrigger {
                        source: card,
                        controller,
                        ability_number: AbilityNumber(face.abilities.len() + offset),
                        effects: chapter_def.effects.clone(),
                    });
                }
            }
        }
    }
    for id in candidates {
        let Some(card) = game.card(id) else {
            continue;
        };
        let controller = card.controller;
        let face = card.current_face();

        let mut triggered: Vec<&TriggeredAbilityDefinition> = vec![];
        for ability in &face.abilities {
            if let AbilityDefinition::Triggered(trigger) = ability {
                triggered.push(trigger);
            }
        }
        for level in &face.class_levels {
            if u64::from(level.level) <= u64::from(card.class_level) {
                for ability in &level.abilities {
                    if let AbilityDefinition::Triggered(trigger) = ability {
                        triggered.push(trigger);
                    }
                }
            }
        }
        for door in &card.unlocked_doors {
            if let Some(door_data) = face.room_doors.get(*door) {
                triggered.extend(door_data.triggers.iter());
            }
        }

        for (number, trigger) in triggered.into_iter().enumerate() {
            if condition_matches(game, &trigger.condition, id, controller, &event) {
                fired.push(PendingTrigger {
                    source: id,
                    controller,
                    ability_number: AbilityNumber(number),
                    effects: trigger.effects.clone(),
                });
            }
        }
    }

    for trigger in fired {
        debug!(source = ?trigger.source, "Ability triggered");
        game.pending_triggers.push(trigger);
    }
}

fn condition_matches(
    game: &GameState,
    condition: &TriggerCondition,
    source: CardId,
    controller: PlayerName,
    event: &GameEvent,
) -> bool {
    match (condition, event) {
        (TriggerCondition::SelfEntersBattlefield, GameEvent::EnteredBattlefield { card }) => {
            *card == source
        }
        (
            TriggerCondition::CreatureEntersBattlefield(filter),
            GameEvent::EnteredBattlefield { card },
        ) => {
            (!filter.exclude_source || *card != source)
                && card_queries::matches_filter(game, *card, filter, controller, Some(source))
        }
        (TriggerCondition::SelfDies, GameEvent::Died { card }) => *card == source,
        (TriggerCondition::CreatureDies(filter), GameEvent::Died { card }) => {
            (!filter.exclude_source || *card != source)
                && card_queries::matches_filter(game, *card, filter, controller, Some(source))
        }
        (
            TriggerCondition::BeginningOfUpkeep(scope),
            GameEvent::StepBegan { step: GamePhaseStep::Upkeep, active_player },
        ) => scope_matches(*scope, controller, *active_player),
        (
            TriggerCondition::BeginningOfEndStep(scope),
            GameEvent::StepBegan { step: GamePhaseStep::EndStep, active_player },
        ) => scope_matches(*scope, controller, *active_player),
        (TriggerCondition::SelfAttacks, GameEvent::AttackDeclared { attacker }) => {
            *attacker == source
        }
        (TriggerCondition::SelfBlocks, GameEvent::BlockDeclared { blocker, .. }) => {
            *blocker == source
        }
        (
            TriggerCondition::SelfDealsCombatDamageToPlayer,
            GameEvent::DealtCombatDamageToPlayer { source: dealt_by, .. },
        ) => *dealt_by == source,
        (TriggerCondition::YouGainLife, GameEvent::LifeGained { player, .. }) => {
            *player == controller
        }
        (TriggerCondition::SagaChapter(chapter), GameEvent::SagaChapterBegan { card, chapter: began }) => {
            *card == source && *chapter == *began
        }
        (TriggerCondition::Raw(_), _) => false,
        _ => false,
    }
}

fn scope_matches(scope: PlayerScope, controller: PlayerName, active: PlayerName) -> bool {
    match scope {
        PlayerScope::You => controller == active,
        PlayerScope::Opponent => controller != active,
        PlayerScope::Each => true,
    }
}
