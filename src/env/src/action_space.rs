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

use data::actions::game_action::{CombatAction, GameAction, PromptAction};
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{AbilityNumber, CardId, PlayerName};
use data::game_states::combat_state::CombatState;
use data::game_states::game_state::GameState;
use data::game_states::pending_decision::PendingDecision;
use serde::{Deserialize, Serialize};

/// Size of the fixed integer action space.
///
/// The space is stable across games so that a learned policy's action
/// indices always mean the same thing.
pub const ACTION_SPACE_SIZE: usize = 480;

/// Index of the always-legal pass-priority action.
pub const PASS_PRIORITY_INDEX: usize = 11;

/// Index of the always-legal concede action.
pub const CONCEDE_INDEX: usize = 12;

const MAX_HAND_SLOTS: usize = 7;
const MAX_BATTLEFIELD_SLOTS: usize = 20;
const MAX_ATTACKER_SLOTS: usize = 5;
const MAX_ABILITY_SLOTS: usize = 3;
const MAX_TARGET_SLOTS: usize = 20;
const MAX_X: u64 = 10;
const MAX_MODE_SLOTS: usize = 6;
const MAX_TRIGGER_SLOTS: usize = 6;
const MAX_LEGEND_SLOTS: usize = 5;
const MAX_DOOR_SLOTS: usize = 2;

const BOTTOM_CARD_BASE: usize = 0; // 0..=6
const KEEP_HAND_INDEX: usize = 7;
const MULLIGAN_INDEX: usize = 8;
const CONFIRM_MODES_INDEX: usize = 9;
const PLAY_LAND_BASE: usize = 13; // 13..=19
const CAST_SPELL_BASE: usize = 20; // 20..=26
const CAST_ADVENTURE_BASE: usize = 27; // 27..=33
const DECLARE_ATTACKER_BASE: usize = 34; // 34..=53
const DECLARE_BLOCKER_BASE: usize = 54; // 54..=153
const CONFIRM_ATTACKERS_INDEX: usize = 154;
const CONFIRM_BLOCKERS_INDEX: usize = 155;
const ACTIVATE_ABILITY_BASE: usize = 156; // 156..=215
const CHOOSE_TARGET_BASE: usize = 216; // 216..=235
const CHOOSE_X_BASE: usize = 236; // 236..=246
const CHOOSE_MODE_BASE: usize = 247; // 247..=252
const ORDER_TRIGGER_BASE: usize = 253; // 253..=258
const CHOOSE_LEGEND_BASE: usize = 259; // 259..=263
const DISCARD_BASE: usize = 264; // 264..=270
const TRANSFORM_BASE: usize = 271; // 271..=290
const LEVEL_UP_BASE: usize = 291; // 291..=310
const UNLOCK_DOOR_BASE: usize = 311; // 311..=350
const LOYALTY_ABILITY_BASE: usize = 351; // 351..=410

/// The kind of action an index encodes, independent of game state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    BottomCard,
    KeepHand,
    Mulligan,
    ConfirmModes,
    PassPriority,
    Concede,
    PlayLand,
    CastSpell,
    CastAdventure,
    DeclareAttacker,
    DeclareBlocker,
    ConfirmAttackers,
    ConfirmBlockers,
    ActivateAbility,
    ChooseTarget,
    ChooseX,
    ChooseMode,
    OrderTrigger,
    ChooseLegend,
    Discard,
    TransformCard,
    LevelUp,
    UnlockDoor,
    ActivateLoyaltyAbility,
    Unused,
}

/// Static description of an action index: its kind and slot parameter.
pub fn get_action_info(index: usize) -> (ActionKind, usize) {
    match index {
        BOTTOM_CARD_BASE..=6 => (ActionKind::BottomCard, index - BOTTOM_CARD_BASE),
        KEEP_HAND_INDEX => (ActionKind::KeepHand, 0),
        MULLIGAN_INDEX => (ActionKind::Mulligan, 0),
        CONFIRM_MODES_INDEX => (ActionKind::ConfirmModes, 0),
        PASS_PRIORITY_INDEX => (ActionKind::PassPriority, 0),
        CONCEDE_INDEX => (ActionKind::Concede, 0),
        PLAY_LAND_BASE..=19 => (ActionKind::PlayLand, index - PLAY_LAND_BASE),
        CAST_SPELL_BASE..=26 => (ActionKind::CastSpell, index - CAST_SPELL_BASE),
        CAST_ADVENTURE_BASE..=33 => (ActionKind::CastAdventure, index - CAST_ADVENTURE_BASE),
        DECLARE_ATTACKER_BASE..=53 => {
            (ActionKind::DeclareAttacker, index - DECLARE_ATTACKER_BASE)
        }
        DECLARE_BLOCKER_BASE..=153 => (ActionKind::DeclareBlocker, index - DECLARE_BLOCKER_BASE),
        CONFIRM_ATTACKERS_INDEX => (ActionKind::ConfirmAttackers, 0),
        CONFIRM_BLOCKERS_INDEX => (ActionKind::ConfirmBlockers, 0),
        ACTIVATE_ABILITY_BASE..=215 => {
            (ActionKind::ActivateAbility, index - ACTIVATE_ABILITY_BASE)
        }
        CHOOSE_TARGET_BASE..=235 => (ActionKind::ChooseTarget, index - CHOOSE_TARGET_BASE),
        CHOOSE_X_BASE..=246 => (ActionKind::ChooseX, index - CHOOSE_X_BASE),
        CHOOSE_MODE_BASE..=252 => (ActionKind::ChooseMode, index - CHOOSE_MODE_BASE),
        ORDER_TRIGGER_BASE..=258 => (ActionKind::OrderTrigger, index - ORDER_TRIGGER_BASE),
        CHOOSE_LEGEND_BASE..=263 => (ActionKind::ChooseLegend, index - CHOOSE_LEGEND_BASE),
        DISCARD_BASE..=270 => (ActionKind::Discard, index - DISCARD_BASE),
        TRANSFORM_BASE..=290 => (ActionKind::TransformCard, index - TRANSFORM_BASE),
        LEVEL_UP_BASE..=310 => (ActionKind::LevelUp, index - LEVEL_UP_BASE),
        UNLOCK_DOOR_BASE..=350 => (ActionKind::UnlockDoor, index - UNLOCK_DOOR_BASE),
        LOYALTY_ABILITY_BASE..=410 => {
            (ActionKind::ActivateLoyaltyAbility, index - LOYALTY_ABILITY_BASE)
        }
        _ => (ActionKind::Unused, 0),
    }
}

/// Cards in a player's hand in their stable slot order.
fn hand_slots(game: &GameState, player: PlayerName) -> Vec<CardId> {
    game.hand(player).iter().copied().collect()
}

/// Permanents a player controls in their stable slot order.
fn battlefield_slots(game: &GameState, player: PlayerName) -> Vec<CardId> {
    game.battlefield(player).iter().copied().collect()
}

/// Declared attackers in their stable slot order.
fn attacker_slots(game: &GameState) -> Vec<CardId> {
    game.combat
        .as_ref()
        .and_then(|combat| match combat {
            CombatState::ProposingBlockers(blockers) => {
                Some(blockers.attackers.all_attackers().collect())
            }
            state => state.confirmed_attackers().map(|map| map.all_attackers().collect()),
        })
        .unwrap_or_default()
}

/// Decodes an action index into the engine action it refers to in the
/// current state.
///
/// Returns `None` for indices whose slot parameter does not currently
/// refer to anything (e.g. a hand slot past the end of the hand).
pub fn decode(game: &GameState, player: PlayerName, index: usize) -> Option<GameAction> {
    let (kind, param) = get_action_info(index);
    let action = match kind {
        ActionKind::BottomCard => {
            PromptAction::BottomCard(*hand_slots(game, player).get(param)?).into()
        }
        ActionKind::KeepHand => PromptAction::KeepHand.into(),
        ActionKind::Mulligan => PromptAction::Mulligan.into(),
        ActionKind::ConfirmModes => PromptAction::ConfirmModes.into(),
        ActionKind::PassPriority => GameAction::PassPriority,
        ActionKind::Concede => GameAction::Concede,
        ActionKind::PlayLand => GameAction::PlayLand(*hand_slots(game, player).get(param)?),
        ActionKind::CastSpell => GameAction::CastSpell(*hand_slots(game, player).get(param)?),
        ActionKind::CastAdventure => {
            GameAction::CastAdventure(*hand_slots(game, player).get(param)?)
        }
        ActionKind::DeclareAttacker => {
            CombatAction::DeclareAttacker(*battlefield_slots(game, player).get(param)?).into()
        }
        ActionKind::DeclareBlocker => {
            let blocker_slot = param / MAX_ATTACKER_SLOTS;
            let attacker_slot = param % MAX_ATTACKER_SLOTS;
            CombatAction::DeclareBlocker {
                blocker: *battlefield_slots(game, player).get(blocker_slot)?,
                attacker: *attacker_slots(game).get(attacker_slot)?,
            }
            .into()
        }
        ActionKind::ConfirmAttackers => CombatAction::ConfirmAttackers.into(),
        ActionKind::ConfirmBlockers => CombatAction::ConfirmBlockers.into(),
        ActionKind::ActivateAbility => {
            let card_slot = param / MAX_ABILITY_SLOTS;
            let ability = param % MAX_ABILITY_SLOTS;
            GameAction::ActivateAbility {
                card: *battlefield_slots(game, player).get(card_slot)?,
                number: AbilityNumber(ability),
            }
        }
        ActionKind::ChooseTarget => PromptAction::ChooseTarget(param).into(),
        ActionKind::ChooseX => PromptAction::ChooseX(param as u64).into(),
        ActionKind::ChooseMode => PromptAction::ChooseMode(param).into(),
        ActionKind::OrderTrigger => PromptAction::OrderTrigger(param).into(),
        ActionKind::ChooseLegend => {
            let candidates = legend_candidates(game);
            PromptAction::ChooseLegend(*candidates.get(param)?).into()
        }
        ActionKind::Discard => PromptAction::Discard(*hand_slots(game, player).get(param)?).into(),
        ActionKind::TransformCard => {
            GameAction::TransformCard(*battlefield_slots(game, player).get(param)?)
        }
        ActionKind::LevelUp => GameAction::LevelUp(*battlefield_slots(game, player).get(param)?),
        ActionKind::UnlockDoor => {
            let card_slot = param / MAX_DOOR_SLOTS;
            let door = param % MAX_DOOR_SLOTS;
            GameAction::UnlockDoor {
                card: *battlefield_slots(game, player).get(card_slot)?,
                door,
            }
        }
        ActionKind::ActivateLoyaltyAbility => {
            let card_slot = param / MAX_ABILITY_SLOTS;
            let ability = param % MAX_ABILITY_SLOTS;
            GameAction::ActivateLoyaltyAbility {
                card: *battlefield_slots(game, player).get(card_slot)?,
                index: ability,
            }
        }
        ActionKind::Unused => return None,
    };
    Some(action)
}

fn legend_candidates(game: &GameState) -> Vec<CardId> {
    match &game.pending_decision {
        Some(PendingDecision::ChooseLegendToKeep { candidates, .. }) => candidates.clone(),
        _ => vec![],
    }
}

/// Encodes an engine action as its action-space index, if it is
/// representable.
pub fn encode(game: &GameState, player: PlayerName, action: &GameAction) -> Option<usize> {
    let hand = hand_slots(game, player);
    let battlefield = battlefield_slots(game, player);
    let index = match action {
        GameAction::PassPriority => PASS_PRIORITY_INDEX,
        GameAction::Concede => CONCEDE_INDEX,
        GameAction::PlayLand(card) => PLAY_LAND_BASE + slot_of(&hand, *card, MAX_HAND_SLOTS)?,
        GameAction::CastSpell(card) => CAST_SPELL_BASE + slot_of(&hand, *card, MAX_HAND_SLOTS)?,
        GameAction::CastAdventure(card) => {
            CAST_ADVENTURE_BASE + slot_of(&hand, *card, MAX_HAND_SLOTS)?
        }
        GameAction::ActivateAbility { card, number } => {
            if number.0 >= MAX_ABILITY_SLOTS {
                return None;
            }
            ACTIVATE_ABILITY_BASE
                + slot_of(&battlefield, *card, MAX_BATTLEFIELD_SLOTS)? * MAX_ABILITY_SLOTS
                + number.0
        }
        GameAction::ActivateLoyaltyAbility { card, index } => {
            if *index >= MAX_ABILITY_SLOTS {
                return None;
            }
            LOYALTY_ABILITY_BASE
                + slot_of(&battlefield, *card, MAX_BATTLEFIELD_SLOTS)? * MAX_ABILITY_SLOTS
                + index
        }
        GameAction::LevelUp(card) => {
            LEVEL_UP_BASE + slot_of(&battlefield, *card, MAX_BATTLEFIELD_SLOTS)?
        }
        GameAction::UnlockDoor { card, door } => {
            if *door >= MAX_DOOR_SLOTS {
                return None;
            }
            UNLOCK_DOOR_BASE
                + slot_of(&battlefield, *card, MAX_BATTLEFIELD_SLOTS)? * MAX_DOOR_SLOTS
                + door
        }
        GameAction::TransformCard(card) => {
            TRANSFORM_BASE + slot_of(&battlefield, *card, MAX_BATTLEFIELD_SLOTS)?
        }
        GameAction::CombatAction(combat) => match combat {
            CombatAction::DeclareAttacker(attacker) => {
                DECLARE_ATTACKER_BASE + slot_of(&battlefield, *attacker, MAX_BATTLEFIELD_SLOTS)?
            }
            CombatAction::ConfirmAttackers => CONFIRM_ATTACKERS_INDEX,
            CombatAction::DeclareBlocker { blocker, attacker } => {
                let attackers = attacker_slots(game);
                DECLARE_BLOCKER_BASE
                    + slot_of(&battlefield, *blocker, MAX_BATTLEFIELD_SLOTS)?
                        * MAX_ATTACKER_SLOTS
                    + slot_of(&attackers, *attacker, MAX_ATTACKER_SLOTS)?
            }
            CombatAction::ConfirmBlockers => CONFIRM_BLOCKERS_INDEX,
        },
        GameAction::PromptAction(prompt) => match prompt {
            PromptAction::Mulligan => MULLIGAN_INDEX,
            PromptAction::KeepHand => KEEP_HAND_INDEX,
            PromptAction::BottomCard(card) => {
                BOTTOM_CARD_BASE + slot_of(&hand, *card, MAX_HAND_SLOTS)?
            }
            PromptAction::ChooseMode(mode) => {
                if *mode >= MAX_MODE_SLOTS {
                    return None;
                }
                CHOOSE_MODE_BASE + mode
            }
            PromptAction::ConfirmModes => CONFIRM_MODES_INDEX,
            PromptAction::ChooseX(x) => {
                if *x > MAX_X {
                    return None;
                }
                CHOOSE_X_BASE + *x as usize
            }
            PromptAction::ChooseTarget(target) => {
                if *target >= MAX_TARGET_SLOTS {
                    return None;
                }
                CHOOSE_TARGET_BASE + target
            }
            PromptAction::OrderTrigger(trigger) => {
                if *trigger >= MAX_TRIGGER_SLOTS {
                    return None;
                }
                ORDER_TRIGGER_BASE + trigger
            }
            PromptAction::ChooseLegend(card) => {
                let candidates = legend_candidates(game);
                CHOOSE_LEGEND_BASE + slot_of(&candidates, *card, MAX_LEGEND_SLOTS)?
            }
            PromptAction::Discard(card) => DISCARD_BASE + slot_of(&hand, *card, MAX_HAND_SLOTS)?,
        },
    };
    Some(index)
}

fn slot_of(slots: &[CardId], card: CardId, limit: usize) -> Option<usize> {
    slots.iter().position(|&c| c == card).filter(|slot| *slot < limit)
}

/// The boolean legality mask over the whole action space for the player
/// whose turn it is to act.
pub fn action_mask(game: &GameState, player: PlayerName) -> Vec<bool> {
    let legal = rules::legality::legal_actions::compute(game, player);
    let mut mask = vec![false; ACTION_SPACE_SIZE];
    for action in &legal {
        if let Some(index) = encode(game, player, action) {
            mask[index] = true;
        }
    }
    mask
}
