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

use std::sync::Arc;

use data::card_definitions::effect_definition::{
    DynamicValue, Effect, GrantDuration, PlayerSpec, TargetSpec,
};
use data::card_states::card_state::{CardKind, ChosenTarget};
use data::card_states::zones::ZoneQueries;
use data::core::keywords::Keyword;
use data::core::numerics::Damage;
use data::core::primitives::{
    CardId, CardNumber, CardType, Color, PlayerName, Source, StackItemId, Timestamp, Zone,
};
use data::effects::continuous_effect::{
    ContinuousEffect, ContinuousEffectKind, EffectDuration, EffectLayer, EffectTargets,
};
use data::events::game_event::GameEvent;
use data::game_states::game_state::GameState;
use data::printed_cards::card_subtypes::CardSubtypes;
use data::printed_cards::printed_card::{CardLayout, PrintedCard, PrintedCardFace};
use data::printed_cards::printed_primitives::{PrintedPower, PrintedToughness};
use enumset::EnumSet;
use tracing::debug;
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::{abilities, library, mana, move_card, permanents, players};
use crate::queries::card_queries;

/// Resolution context for a list of effects: their source, controller,
/// chosen targets, and X value.
pub struct ExecutionContext {
    pub source: CardId,
    pub controller: PlayerName,
    pub targets: Vec<ChosenTarget>,
    pub chosen_x: Option<u64>,
    next_target: usize,
}

impl ExecutionContext {
    pub fn new(
        source: CardId,
        controller: PlayerName,
        targets: Vec<ChosenTarget>,
        chosen_x: Option<u64>,
    ) -> Self {
        Self { source, controller, targets, chosen_x, next_target: 0 }
    }

    /// The chosen target satisfying the next targeting requirement.
    fn take_target(&mut self) -> Option<ChosenTarget> {
        let target = self.targets.get(self.next_target).copied();
        self.next_target += 1;
        target
    }
}

/// Executes a list of resolved effects in order.
///
/// Effects whose chosen target is no longer legal are skipped
/// individually; whole-object target legality was already checked at
/// resolution time.
pub fn execute(game: &mut GameState, context: &mut ExecutionContext, effects: &[Effect]) -> Outcome {
    for effect in effects {
        execute_one(game, context, effect)?;
    }
    outcome::OK
}

fn execute_one(game: &mut GameState, context: &mut ExecutionContext, effect: &Effect) -> Outcome {
    let source = Source::Card(context.source);
    match effect {
        Effect::DealDamage { amount, target } => {
            let amount = resolve_amount(*amount, context) as Damage;
            match resolve_object(game, context, target) {
                Some(ResolvedObject::Permanent(id)) => {
                    permanents::deal_damage(game, source, id, amount, false)?
                }
                Some(ResolvedObject::Player(player)) => {
                    players::deal_damage(game, source, player, amount, false)?
                }
                _ => {}
            }
        }

        Effect::DrawCards { player, count } => {
            let count = resolve_amount(*count, context).max(0) as usize;
            for player in resolve_players(game, context, *player) {
                library::draw_cards(game, source, player, count)?;
            }
        }

        Effect::GainLife { player, amount } => {
            let amount = resolve_amount(*amount, context);
            for player in resolve_players(game, context, *player) {
                players::gain_life(game, source, player, amount)?;
            }
        }

        Effect::LoseLife { player, amount } => {
            let amount = resolve_amount(*amount, context);
            for player in resolve_players(game, context, *player) {
                players::lose_life(game, source, player, amount)?;
            }
        }

        Effect::Destroy { target } => {
            if let Some(ResolvedObject::Permanent(id)) = resolve_object(game, context, target) {
                if !card_queries::has_keyword(game, id, Keyword::Indestructible) {
                    debug!(?id, "Destroying permanent");
                    move_card::run(game, source, id, Zone::Graveyard)?;
                }
            }
        }

        Effect::Exile { target } => {
            if let Some(ResolvedObject::Permanent(id)) = resolve_object(game, context, target) {
                move_card::run(game, source, id, Zone::Exiled)?;
            }
        }

        Effect::ReturnToHand { target } => {
            if let Some(ResolvedObject::Permanent(id)) = resolve_object(game, context, target) {
                move_card::run(game, source, id, Zone::Hand)?;
            }
        }

        Effect::CounterSpell { target } => {
            if let Some(ResolvedObject::Permanent(id) | ResolvedObject::Spell(id)) =
                resolve_object(game, context, target)
            {
                if game.stack().contains(&StackItemId::Card(id)) {
                    debug!(?id, "Countering spell");
                    move_card::run(game, source, id, Zone::Graveyard)?;
                }
            }
        }

        Effect::ModifyPowerToughness { power, toughness, target, duration } => {
            if let Some(ResolvedObject::Permanent(id)) = resolve_object(game, context, target) {
                register_grant(
                    game,
                    context,
                    id,
                    EffectLayer::PowerToughnessModifying,
                    ContinuousEffectKind::ModifyPowerToughness {
                        power: resolve_amount(*power, context),
                        toughness: resolve_amount(*toughness, context),
                    },
                    *duration,
                );
            }
        }

        Effect::GrantKeyword { keyword, target, duration } => {
            if let Some(ResolvedObject::Permanent(id)) = resolve_object(game, context, target) {
                register_grant(
                    game,
                    context,
                    id,
                    EffectLayer::Ability,
                    ContinuousEffectKind::AddKeyword(*keyword),
                    *duration,
                );
            }
        }

        Effect::AddCounters { kind, count, target } => {
            if let Some(ResolvedObject::Permanent(id)) = resolve_object(game, context, target) {
                let count = resolve_amount(*count, context).max(0) as u64;
                permanents::add_counters(game, source, id, *kind, count)?;
            }
        }

        Effect::CreateTokens { count, power, toughness, name, subtypes, colors, keywords } => {
            let count = resolve_amount(*count, context).max(0) as u64;
            for _ in 0..count {
                create_token(game, context, *power, *toughness, name, subtypes, *colors, *keywords);
            }
        }

        Effect::AddMana { mana: colors } => {
            mana::add(game, source, context.controller, colors)?;
        }

        Effect::Tap { target } => {
            if let Some(ResolvedObject::Permanent(id)) = resolve_object(game, context, target) {
                permanents::tap(game, source, id)?;
            }
        }

        Effect::Untap { target } => {
            if let Some(ResolvedObject::Permanent(id)) = resolve_object(game, context, target) {
                permanents::untap(game, source, id)?;
            }
        }

        Effect::Scry { count } => {
            let count = resolve_amount(*count, context).max(0) as usize;
            library::scry(game, source, context.controller, count)?;
        }

        Effect::Mill { player, count } => {
            let count = resolve_amount(*count, context).max(0) as usize;
            for player in resolve_players(game, context, *player) {
                library::mill(game, source, player, count)?;
            }
        }

        Effect::DiscardCards { player, count } => {
            let count = resolve_amount(*count, context).max(0) as usize;
            for player in resolve_players(game, context, *player) {
                discard(game, player, count)?;
            }
        }

        Effect::AttachTo { target } => {
            if let Some(ResolvedObject::Permanent(id)) = resolve_object(game, context, target) {
                permanents::attach(game, source, context.source, id)?;
            }
        }

        Effect::TransformSource => {
            permanents::transform(game, source, context.source)?;
        }

        Effect::Raw(text) => {
            debug!(source = ?context.source, "Skipping unparsed effect: {text}");
        }
    }
    outcome::OK
}

enum ResolvedObject {
    Permanent(CardId),
    Spell(CardId),
    Player(PlayerName),
}

fn resolve_object(
    game: &GameState,
    context: &mut ExecutionContext,
    spec: &TargetSpec,
) -> Option<ResolvedObject> {
    match spec {
        TargetSpec::None => Some(ResolvedObject::Player(context.controller.opponent())),
        TargetSpec::Source => Some(ResolvedObject::Permanent(context.source)),
        TargetSpec::Attached => {
            let host = game.card(context.source)?.attached_to?;
            Some(ResolvedObject::Permanent(host))
        }
        _ => match context.take_target()? {
            ChosenTarget::Card { id, object_id } => {
                let card = game.card(id)?;
                if card.object_id != object_id {
                    return None;
                }
                if card.zone == Zone::Stack {
                    Some(ResolvedObject::Spell(id))
                } else {
                    Some(ResolvedObject::Permanent(id))
                }
            }
            ChosenTarget::Player(player) => Some(ResolvedObject::Player(player)),
            ChosenTarget::StackAbility(_) => None,
        },
    }
}

fn resolve_amount(value: DynamicValue, context: &ExecutionContext) -> i64 {
    value.resolve(context.chosen_x)
}

fn resolve_players(
    game: &GameState,
    context: &mut ExecutionContext,
    spec: PlayerSpec,
) -> Vec<PlayerName> {
    match spec {
        PlayerSpec::Controller => vec![context.controller],
        PlayerSpec::Opponent => vec![context.controller.opponent()],
        PlayerSpec::EachPlayer => vec![PlayerName::One, PlayerName::Two],
        PlayerSpec::Target => match resolve_object(game, context, &TargetSpec::Player) {
            Some(ResolvedObject::Player(player)) => vec![player],
            _ => vec![],
        },
    }
}

fn register_grant(
    game: &mut GameState,
    context: &ExecutionContext,
    target: CardId,
    layer: EffectLayer,
    kind: ContinuousEffectKind,
    duration: GrantDuration,
) {
    let duration = match duration {
        GrantDuration::EndOfTurn => EffectDuration::EndOfTurn,
        GrantDuration::EndOfCombat => EffectDuration::EndOfCombat,
        GrantDuration::Permanently => EffectDuration::Permanent,
    };
    game.effects.register(ContinuousEffect {
        id: Default::default(),
        source: context.source,
        controller: context.controller,
        layer,
        targets: EffectTargets::Single(target),
        kind,
        duration,
        timestamp: Timestamp::default(),
        condition: None,
    });
}

/// Discards from the front of the hand's deterministic ordering.
fn discard(game: &mut GameState, player: PlayerName, count: usize) -> Outcome {
    for _ in 0..count {
        let Some(&id) = game.hand(player).iter().next() else {
            return outcome::OK;
        };
        move_card::run(game, Source::Game, id, Zone::Graveyard)?;
    }
    outcome::OK
}

#[allow(clippy::too_many_arguments)]
fn create_token(
    game: &mut GameState,
    context: &ExecutionContext,
    power: i64,
    toughness: i64,
    name: &str,
    subtypes: &[String],
    colors: EnumSet<Color>,
    keywords: EnumSet<Keyword>,
) {
    let face = PrintedCardFace {
        name: name.to_string(),
        supertypes: EnumSet::empty(),
        card_types: EnumSet::only(CardType::Creature),
        subtypes: CardSubtypes { lands: EnumSet::empty(), all: subtypes.to_vec() },
        oracle_text: String::new(),
        colors,
        mana_cost: Default::default(),
        mana_value: 0,
        power: Some(PrintedPower::Fixed(power)),
        toughness: Some(PrintedToughness::Fixed(toughness)),
        loyalty: None,
        keywords,
        keyword_grants: Default::default(),
        abilities: vec![],
        planeswalker_abilities: vec![],
        spree_modes: vec![],
        class_levels: vec![],
        room_doors: vec![],
        saga_chapters: vec![],
        adventure: None,
    };
    let printed = Arc::new(PrintedCard {
        number: CardNumber(0),
        faces: vec![face],
        layout: CardLayout::Normal,
        transform_trigger: None,
    });
    let turn = game.turn;
    let id = game.zones.create_card(
        CardNumber(0),
        printed,
        CardKind::Token,
        context.controller,
        Zone::Battlefield,
        turn,
    );
    debug!(?id, "Created token");
    abilities::register_battlefield_abilities(game, id);
    game.effects.invalidate_cache();
    abilities::fire_event(game, GameEvent::EnteredBattlefield { card: id });
}
