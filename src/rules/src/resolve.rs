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
use data::card_definitions::effect_definition::{EffectList, TargetSpec};
use data::card_states::card_state::ChosenTarget;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{CardId, PlayerName, Source, StackItemId, Zone};
use data::game_states::game_state::GameState;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::{Outcome, Value};

use crate::effect_execution::{self, ExecutionContext};
use crate::mutations::{move_card, permanents};
use crate::queries::targets;

/// How a stack object left the stack.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ResolutionOutcome {
    Resolved,

    /// Every target was illegal on resolution; the object was removed from
    /// the stack with no effect.
    ///
    /// See <https://yawgatog.com/resources/magic-rules/#R6081b>
    CounteredByRules,
}

/// Resolves the top item of the stack.
#[instrument(name = "resolve_top_of_stack", level = "debug", skip(game))]
pub fn resolve_top_of_stack(game: &mut GameState) -> Outcome {
    let Some(&item) = game.stack().last() else {
        return outcome::OK;
    };
    match item {
        StackItemId::Card(id) => resolve_spell(game, id).map(|_| ()),
        StackItemId::Ability(id) => {
            let Some(ability) = game.stack_ability(id) else {
                return outcome::OK;
            };
            let source = ability.source;
            let controller = ability.controller;
            let chosen_targets = ability.targets.clone();
            let effects = ability.effects.clone();
            let chosen_x = ability.chosen_x;
            game.zones.remove_stack_ability(id);

            let outcome = resolve_effects(
                game,
                source,
                controller,
                chosen_targets,
                effects,
                chosen_x,
            )?;
            if outcome == ResolutionOutcome::CounteredByRules {
                debug!(?source, "Ability countered by game rules");
            }
            outcome::OK
        }
    }
}

fn resolve_spell(game: &mut GameState, id: CardId) -> Value<ResolutionOutcome> {
    let Some(card) = game.card(id) else {
        return Ok(ResolutionOutcome::Resolved);
    };
    let controller = card.controller;
    let chosen_targets = card.targets.clone();
    let chosen_x = card.chosen_x;
    let chosen_modes = card.chosen_modes.clone();
    let face = card.current_face().clone();

    let mut effects: EffectList = vec![];
    for ability in &face.abilities {
        if let AbilityDefinition::Spell(spell) = ability {
            effects.extend(spell.effects.iter().cloned());
        }
    }
    for mode in &chosen_modes {
        if let Some(spree_mode) = face.spree_modes.get(*mode) {
            effects.extend(spree_mode.effects.iter().cloned());
        }
    }

    // An aura spell resolves by entering attached to its target.
    let enchant_spec = oracle::ability_parser::enchant_target(&face.oracle_text);

    let specs = required_specs(&effects, enchant_spec.as_ref());
    if !specs.is_empty() {
        let all_illegal = chosen_targets.iter().zip(specs.iter()).all(|(target, spec)| {
            !targets::still_legal(game, target, spec, controller, id)
        });
        if all_illegal {
            debug!(?id, "All targets illegal, spell countered by game rules");
            move_card::run(game, Source::Game, id, Zone::Graveyard)?;
            return Ok(ResolutionOutcome::CounteredByRules);
        }
    }

    if face.is_permanent_type() {
        // Permanent spells carry no one-shot effects of their own; ETB
        // triggers fire from the zone change itself.
        debug!(?id, "Spell resolving to battlefield");
        move_card::run(game, Source::Game, id, Zone::Battlefield)?;
        if enchant_spec.is_some() {
            if let Some(ChosenTarget::Card { id: host, .. }) = chosen_targets.first() {
                permanents::attach(game, Source::Card(id), id, *host)?;
            }
        }
    } else {
        debug!(?id, "Spell resolving");
        let mut context = ExecutionContext::new(id, controller, chosen_targets, chosen_x);
        effect_execution::execute(game, &mut context, &effects)?;
        if game.card(id).is_some_and(|card| card.zone == Zone::Stack) {
            move_card::run(game, Source::Game, id, Zone::Graveyard)?;
        }
    }

    Ok(ResolutionOutcome::Resolved)
}

/// Resolves a list of ability effects with a target-legality recheck.
fn resolve_effects(
    game: &mut GameState,
    source: CardId,
    controller: PlayerName,
    chosen_targets: Vec<ChosenTarget>,
    effects: EffectList,
    chosen_x: Option<u64>,
) -> Value<ResolutionOutcome> {
    let specs = required_specs(&effects, None);
    if !specs.is_empty() {
        let all_illegal = chosen_targets.iter().zip(specs.iter()).all(|(target, spec)| {
            !targets::still_legal(game, target, spec, controller, source)
        });
        if all_illegal {
            return Ok(ResolutionOutcome::CounteredByRules);
        }
    }

    let mut context = ExecutionContext::new(source, controller, chosen_targets, chosen_x);
    effect_execution::execute(game, &mut context, &effects)?;
    Ok(ResolutionOutcome::Resolved)
}

/// The target requirements of an effect list, in the order targets were
/// chosen.
pub fn required_specs(effects: &EffectList, enchant: Option<&TargetSpec>) -> Vec<TargetSpec> {
    let mut specs: Vec<TargetSpec> = vec![];
    if let Some(enchant) = enchant {
        specs.push(enchant.clone());
    }
    for effect in effects {
        if let Some(spec) = effect.target_spec() {
            specs.push(spec.clone());
        }
    }
    specs
}
