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

use data::card_states::counters::CounterKind;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{CardId, PlayerName, Source};
use data::effects::continuous_effect::EffectDuration;
use data::events::game_event::GameEvent;
use data::game_states::combat_state::{AttackerMap, BlockerMap, CombatState, ProposedBlockers};
use data::game_states::game_phase_step::GamePhaseStep;
use data::game_states::game_state::{GameState, TurnData};
use data::game_states::pending_decision::PendingDecision;
use data::player_states::player_state::PlayerQueries;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::Outcome;

use crate::combat::{combat_damage, combat_queries};
use crate::mutations::{abilities, library, mana, permanents, state_based_actions};
use crate::queries::player_queries;
use crate::triggers;

/// Advances the game state to the next step.
///
/// Primary entry point for the game state machine. Empties mana pools for
/// the ending step, performs the turn-based actions of the new step, and
/// hands the turn to the next player when moving past cleanup.
#[instrument(name = "step_advance", level = "debug", skip(game))]
pub fn advance(game: &mut GameState) -> Outcome {
    mana::empty_pools_at_step_end(game);
    let step = enum_iterator::next(&game.step).unwrap_or(GamePhaseStep::Untap);
    debug!(?step, "Advancing to step");
    match step {
        GamePhaseStep::Untap => untap(game),
        GamePhaseStep::Upkeep => upkeep(game),
        GamePhaseStep::Draw => draw(game),
        GamePhaseStep::PreCombatMain => pre_combat_main(game),
        GamePhaseStep::BeginCombat => begin_combat(game),
        GamePhaseStep::DeclareAttackers => declare_attackers(game),
        GamePhaseStep::DeclareBlockers => declare_blockers(game),
        GamePhaseStep::FirstStrikeDamage => first_strike_damage(game),
        GamePhaseStep::CombatDamage => combat_damage_step(game),
        GamePhaseStep::EndCombat => end_combat(game),
        GamePhaseStep::PostCombatMain => post_combat_main(game),
        GamePhaseStep::EndStep => end_step(game),
        GamePhaseStep::Cleanup => cleanup(game),
    }
}

fn begin_step(game: &mut GameState, step: GamePhaseStep) {
    game.step = step;
    game.priority = game.turn.active_player;
    game.clear_passed();
    let active_player = game.turn.active_player;
    abilities::fire_event(game, GameEvent::StepBegan { step, active_player });
}

/// Begins the first turn of the game after mulligans resolve.
pub fn begin_first_turn(game: &mut GameState) -> Outcome {
    game.turn = TurnData { active_player: PlayerName::One, turn_number: 1 };
    start_of_turn(game)
}

fn untap(game: &mut GameState) -> Outcome {
    let next = player_queries::next_player(game);
    if next == PlayerName::One {
        game.turn.turn_number += 1;
    }
    game.turn = TurnData { active_player: next, ..game.turn };
    start_of_turn(game)
}

fn start_of_turn(game: &mut GameState) -> Outcome {
    game.step = GamePhaseStep::Untap;
    game.priority = game.turn.active_player;
    game.clear_passed();
    let active = game.turn.active_player;
    debug!(?active, turn = game.turn.turn_number, "Starting turn");

    // Per-turn tracking resets.
    game.this_turn.reset();
    for player in [PlayerName::One, PlayerName::Two] {
        game.player_mut(player).lands_played_this_turn = 0;
    }
    for card in game.zones.all_cards_mut() {
        card.loyalty_activated_this_turn = false;
    }

    // "Until your next turn" effects end as that player's turn begins.
    game.effects.remove_matching(
        |duration| matches!(duration, EffectDuration::UntilYourNextTurn(player, _) if *player == active),
    );

    // > 502.3. Third, the active player determines which permanents they
    // > control will untap. Then they untap them all simultaneously.
    // <https://yawgatog.com/resources/magic-rules/#R5023>
    let to_untap: Vec<CardId> = game.battlefield(active).iter().copied().collect();
    for card_id in to_untap {
        permanents::untap(game, Source::Game, card_id)?;
    }

    // > 502.4. No player receives priority during the untap step.
    // <https://yawgatog.com/resources/magic-rules/#R5024>
    advance(game)
}

fn upkeep(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::Upkeep);
    outcome::OK
}

fn draw(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::Draw);

    // > 103.8a. In a two-player game, the player who plays first skips the
    // > draw step of their first turn.
    // <https://yawgatog.com/resources/magic-rules/#R1038a>
    let skip_first_draw =
        game.turn.turn_number == 1 && game.turn.active_player == PlayerName::One;
    if !skip_first_draw {
        library::draw(game, Source::Game, game.turn.active_player)?;
    }
    outcome::OK
}

fn pre_combat_main(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::PreCombatMain);
    advance_sagas(game)
}

/// Adds a lore counter to each Saga the active player controls and fires
/// its chapter trigger.
///
/// A saga past its final chapter is not sacrificed here: that is a
/// state-based action which waits for the chapter ability to leave the
/// stack.
///
/// See <https://yawgatog.com/resources/magic-rules/#R7152>
fn advance_sagas(game: &mut GameState) -> Outcome {
    let active = game.turn.active_player;
    let sagas: Vec<CardId> = game
        .battlefield(active)
        .iter()
        .copied()
        .filter(|&id| {
            game.card(id).is_some_and(|card| {
                card.current_face().subtypes.is_saga()
                    && !card.current_face().saga_chapters.is_empty()
            })
        })
        .collect();

    for saga in sagas {
        let chapter = {
            let Some(card) = game.card_mut(saga) else {
                continue;
            };
            card.counters.add(CounterKind::Lore, 1);
            card.counters.count(CounterKind::Lore) as u8
        };
        debug!(?saga, chapter, "Saga chapter began");
        abilities::fire_event(game, GameEvent::SagaChapterBegan { card: saga, chapter });
    }
    outcome::OK
}

fn begin_combat(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::BeginCombat);
    outcome::OK
}

fn declare_attackers(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::DeclareAttackers);

    // > 508.1. First, the active player declares attackers. This turn-based
    // > action doesn't use the stack.
    // <https://yawgatog.com/resources/magic-rules/#R5081>
    let active = game.turn.active_player;
    let has_attackers = game
        .battlefield(active)
        .iter()
        .any(|&id| combat_queries::is_valid_attacker(game, active, id));
    if has_attackers {
        game.combat = Some(CombatState::ProposingAttackers(AttackerMap::default()));
    } else {
        // With nothing able to attack, the declaration is trivially empty
        // and priority proceeds normally.
        game.combat = Some(CombatState::ConfirmedAttackers(AttackerMap::default()));
    }
    outcome::OK
}

fn declare_blockers(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::DeclareBlockers);

    let next = player_queries::next_player(game);
    let Some(CombatState::ConfirmedAttackers(attackers)) = game.combat.take() else {
        game.combat = None;
        return outcome::OK;
    };
    if attackers.is_empty() {
        game.combat = Some(CombatState::ConfirmedBlockers(BlockerMap {
            attackers,
            blocked_attackers: Default::default(),
            reverse_lookup: Default::default(),
        }));
        return outcome::OK;
    }

    // > 509.1. First, the defending player declares blockers.
    // <https://yawgatog.com/resources/magic-rules/#R5091>
    game.combat = Some(CombatState::ProposingBlockers(ProposedBlockers {
        defender: next,
        attackers,
        proposed_blocks: vec![],
    }));
    outcome::OK
}

fn first_strike_damage(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::FirstStrikeDamage);

    // The first-strike combat damage step only exists when a participating
    // creature has first or double strike.
    if !combat_queries::combat_requires_first_strike_step(game) {
        return advance(game);
    }
    combat_damage::deal(game, true)
}

fn combat_damage_step(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::CombatDamage);
    combat_damage::deal(game, false)
}

fn end_combat(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::EndCombat);
    game.effects.remove_matching(|duration| matches!(duration, EffectDuration::EndOfCombat));
    outcome::OK
}

fn post_combat_main(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::PostCombatMain);
    game.combat = None;
    outcome::OK
}

fn end_step(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::EndStep);
    outcome::OK
}

fn cleanup(game: &mut GameState) -> Outcome {
    begin_step(game, GamePhaseStep::Cleanup);

    // > 514.1. First, if the active player's hand contains more cards than
    // > their maximum hand size (normally seven), they discard enough cards
    // > to reduce their hand size to that number.
    // <https://yawgatog.com/resources/magic-rules/#R5141>
    let active = game.turn.active_player;
    if game.hand(active).len() > game.player(active).maximum_hand_size {
        game.pending_decision = Some(PendingDecision::DiscardToHandSize { player: active });
        return outcome::CHOICE;
    }

    finish_cleanup(game)
}

/// The damage-wiping and effect-expiry portion of cleanup, run after any
/// required discards.
pub fn finish_cleanup(game: &mut GameState) -> Outcome {
    // > 514.2. Second, the following actions happen simultaneously: all
    // > damage marked on permanents is removed and all "until end of turn"
    // > and "this turn" effects end.
    // <https://yawgatog.com/resources/magic-rules/#R5142>
    for card in game.zones.all_cards_mut() {
        card.damage = 0;
        card.damaged_by_deathtouch = false;
    }
    game.effects.remove_matching(|duration| matches!(duration, EffectDuration::EndOfTurn));
    game.effects.invalidate_cache();

    // > 514.3a. At this point, the game checks to see if any state-based
    // > action would be performed and/or any triggered abilities are
    // > waiting to be put onto the stack. If so ... the active player gets
    // > priority.
    // <https://yawgatog.com/resources/magic-rules/#R5143a>
    state_based_actions::run(game)?;
    if game.pending_triggers.is_empty() {
        advance(game)
    } else {
        triggers::place_pending_on_stack(game)
    }
}
