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

use data::actions::game_action::{GameAction, PromptAction};
use data::card_states::card_state::CardKind;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{CardId, CardNumber, ManaColor, PlayerName, Source, Zone};
use data::decks::deck::Deck;
use data::game_states::game_phase_step::GamePhaseStep;
use data::game_states::game_state::{GameConfiguration, GameState};
use data::player_states::player_map::PlayerMap;
use data::player_states::player_state::PlayerQueries;
use oracle::card_database::CardSource;
use rules::action_handlers::actions::{self, ExecuteAction};
use rules::game_creation::new_game;
use rules::legality::legal_actions;
use rules::mutations::move_card;

use crate::test_cards::{self, DATABASE};

/// A deck of sixty forests, the minimal legal deck.
pub fn forest_deck() -> Deck {
    Deck::new("Forests", vec![test_cards::FOREST; 60])
}

/// A green creature deck: forests plus bears and wurms.
pub fn bear_deck() -> Deck {
    let mut cards = vec![test_cards::FOREST; 24];
    cards.extend(vec![test_cards::GRIZZLY_BEARS; 4]);
    cards.extend(vec![test_cards::LLANOWAR_ELVES; 4]);
    cards.extend(vec![test_cards::CRAW_WURM; 4]);
    cards.extend(vec![test_cards::COLOSSAL_DREADMAW; 4]);
    cards.extend(vec![test_cards::GIANT_GROWTH; 4]);
    cards.extend(vec![test_cards::DEADLY_RECLUSE; 4]);
    cards.extend(vec![test_cards::WALL_OF_WOOD; 4]);
    cards.extend(vec![test_cards::FOREST; 60 - cards.len().min(60)]);
    Deck::new("Bears", cards)
}

/// Creates a game with both players keeping their opening hands, stopped
/// at the first priority window of turn one.
pub fn vanilla_game(seed: u64) -> GameState {
    let decks = PlayerMap { one: forest_deck(), two: forest_deck() };
    let mut game = new_game::create(decks, &*DATABASE, GameConfiguration::default(), seed)
        .expect("test game creation succeeds");
    execute(&mut game, PlayerName::One, PromptAction::KeepHand.into());
    execute(&mut game, PlayerName::Two, PromptAction::KeepHand.into());
    game
}

/// Executes one action for a player without legality validation.
pub fn execute(game: &mut GameState, player: PlayerName, action: GameAction) {
    actions::execute(game, player, action, ExecuteAction { validate: false });
}

/// Executes one validated action for whichever player is next to act.
pub fn act(game: &mut GameState, action: GameAction) {
    let player = legal_actions::next_to_act(game).expect("game is not over");
    actions::execute(game, player, action, ExecuteAction { validate: true });
}

/// Passes priority for whichever player is next to act.
pub fn pass(game: &mut GameState) {
    act(game, GameAction::PassPriority);
}

/// Passes priority until the game reaches the given step of the current or
/// a following turn.
pub fn pass_until(game: &mut GameState, step: GamePhaseStep) {
    for _ in 0..200 {
        if game.step == step && !game.status.is_over() {
            return;
        }
        pass(game);
    }
    panic!("Game never reached step {step:?}");
}

/// A vanilla game advanced to the first main phase with player One
/// holding priority.
pub fn game_at_first_main(seed: u64) -> GameState {
    let mut game = vanilla_game(seed);
    pass_until(&mut game, GamePhaseStep::PreCombatMain);
    game
}

/// Creates a card in a player's hand directly.
pub fn add_to_hand(game: &mut GameState, player: PlayerName, number: CardNumber) -> CardId {
    let printed = DATABASE.printed(number).expect("card exists in test database");
    let turn = game.turn;
    game.zones.create_card(number, printed, CardKind::Normal, player, Zone::Hand, turn)
}

/// Creates a card and puts it onto the battlefield through the normal
/// zone-change path, so its abilities register and its enter-the-
/// battlefield triggers fire.
pub fn put_on_battlefield(
    game: &mut GameState,
    player: PlayerName,
    number: CardNumber,
) -> CardId {
    let id = add_to_hand(game, player, number);
    let _ = move_card::run(game, Source::Game, id, Zone::Battlefield);
    actions::run_state_checks(game);
    id
}

/// Adds floating mana to a player's pool.
pub fn add_mana(game: &mut GameState, player: PlayerName, color: ManaColor, amount: u64) {
    game.player_mut(player).mana_pool.add(color, amount);
}

/// Forces the game to a specific step with the active player holding
/// priority, clearing combat state.
///
/// This bypasses the step machine's turn-based actions and is intended
/// for constructing scenario states.
pub fn jump_to_step(game: &mut GameState, step: GamePhaseStep) {
    game.step = step;
    game.priority = game.turn.active_player;
    game.clear_passed();
    game.combat = None;
}
