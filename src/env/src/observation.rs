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
use data::core::numerics::{LifeValue, Power, Toughness, TurnNumber};
use data::core::primitives::{CardId, CardNumber, ManaColor, PlayerName, StackItemId};
use data::game_states::combat_state::CombatState;
use data::game_states::game_phase_step::GamePhaseStep;
use data::game_states::game_state::GameState;
use data::player_states::player_state::PlayerQueries;
use serde::{Deserialize, Serialize};

use crate::action_space;
use rules::queries::card_queries;

/// Public summary of one permanent for the observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermanentView {
    pub card_number: CardNumber,
    pub name: String,
    pub power: Power,
    pub toughness: Toughness,
    pub tapped: bool,
    pub summoning_sick: bool,
    pub counters: Vec<(CounterKind, u64)>,
    pub attached_to: Option<CardNumber>,
}

/// Summary of the top item of the stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackTopView {
    pub card_number: Option<CardNumber>,
    pub name: String,
    pub controller_is_me: bool,
    pub is_ability: bool,
}

/// Combat state summary: attackers and the blocks declared against them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatView {
    pub attackers: Vec<CardNumber>,
    pub blocks: Vec<(CardNumber, CardNumber)>,
}

/// Structured view of the public game state from one player's
/// perspective.
///
/// The opponent's hand contents are never included, only the count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub phase: GamePhaseStep,
    pub turn: TurnNumber,
    pub is_my_turn: bool,
    pub i_have_priority: bool,

    pub my_life: LifeValue,
    pub opp_life: LifeValue,

    pub my_hand: Vec<CardNumber>,
    pub my_hand_count: usize,
    pub opp_hand_count: usize,

    pub my_library_count: usize,
    pub opp_library_count: usize,
    pub my_graveyard_count: usize,
    pub opp_graveyard_count: usize,
    pub my_exile_count: usize,
    pub opp_exile_count: usize,

    pub my_battlefield: Vec<PermanentView>,
    pub opp_battlefield: Vec<PermanentView>,

    pub my_mana_pool: Vec<(ManaColor, u64)>,

    pub stack_size: usize,
    pub stack_top: Option<StackTopView>,

    pub combat: CombatView,

    pub action_mask: Vec<bool>,
}

/// Builds the observation for the given player.
pub fn build(game: &GameState, player: PlayerName) -> Observation {
    let opponent = player.opponent();
    Observation {
        phase: game.step,
        turn: game.turn.turn_number,
        is_my_turn: game.turn.active_player == player,
        i_have_priority: game.priority == player,
        my_life: game.player(player).life,
        opp_life: game.player(opponent).life,
        my_hand: game
            .hand(player)
            .iter()
            .filter_map(|&id| game.card(id).map(|card| card.card_number))
            .collect(),
        my_hand_count: game.hand(player).len(),
        opp_hand_count: game.hand(opponent).len(),
        my_library_count: game.library(player).len(),
        opp_library_count: game.library(opponent).len(),
        my_graveyard_count: game.graveyard(player).len(),
        opp_graveyard_count: game.graveyard(opponent).len(),
        my_exile_count: game.exile(player).len(),
        opp_exile_count: game.exile(opponent).len(),
        my_battlefield: battlefield_views(game, player),
        opp_battlefield: battlefield_views(game, opponent),
        my_mana_pool: game.player(player).mana_pool.iter().filter(|(_, n)| *n > 0).collect(),
        stack_size: game.stack().len(),
        stack_top: stack_top_view(game, player),
        combat: combat_view(game),
        action_mask: action_space::action_mask(game, player),
    }
}

fn battlefield_views(game: &GameState, player: PlayerName) -> Vec<PermanentView> {
    game.battlefield(player)
        .iter()
        .filter_map(|&id| {
            let card = game.card(id)?;
            Some(PermanentView {
                card_number: card.card_number,
                name: card.displayed_name().to_string(),
                power: card_queries::power(game, id),
                toughness: card_queries::toughness(game, id),
                tapped: card.tapped_state.is_tapped(),
                summoning_sick: card_queries::has_summoning_sickness(game, id),
                counters: card.counters.iter().collect(),
                attached_to: card
                    .attached_to
                    .and_then(|host| game.card(host))
                    .map(|host| host.card_number),
            })
        })
        .collect()
}

fn stack_top_view(game: &GameState, player: PlayerName) -> Option<StackTopView> {
    let top = game.stack().last()?;
    Some(match top {
        StackItemId::Card(id) => {
            let card = game.card(*id)?;
            StackTopView {
                card_number: Some(card.card_number),
                name: card.displayed_name().to_string(),
                controller_is_me: card.controller == player,
                is_ability: false,
            }
        }
        StackItemId::Ability(id) => {
            let ability = game.stack_ability(*id)?;
            let name = game
                .card(ability.source)
                .map(|card| card.displayed_name().to_string())
                .unwrap_or_default();
            StackTopView {
                card_number: None,
                name,
                controller_is_me: ability.controller == player,
                is_ability: true,
            }
        }
    })
}

fn combat_view(game: &GameState) -> CombatView {
    let mut view = CombatView::default();
    let Some(combat) = &game.combat else {
        return view;
    };
    let number_of = |id: CardId| game.card(id).map(|card| card.card_number);
    if let Some(attackers) = combat.confirmed_attackers() {
        view.attackers = attackers.all_attackers().filter_map(number_of).collect();
    }
    if let CombatState::ConfirmedBlockers(blockers) = combat {
        for (blocker, attacker) in &blockers.reverse_lookup {
            if let (Some(b), Some(a)) = (number_of(*blocker), number_of(*attacker)) {
                view.blocks.push((b, a));
            }
        }
    }
    view
}
