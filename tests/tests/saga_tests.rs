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

use data::card_states::card_state::CardKind;
use data::card_states::counters::CounterKind;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{PlayerName, Zone};
use data::game_states::game_phase_step::GamePhaseStep;
use data::game_states::game_state::GameState;
use testing::test_cards;
use testing::test_games::{self, pass, put_on_battlefield};

/// Passes priority until player One's precombat main phase of the given
/// turn number.
fn pass_until_main_of_turn(game: &mut GameState, turn_number: u64) {
    for _ in 0..400 {
        if game.turn.turn_number == turn_number
            && game.turn.active_player == PlayerName::One
            && game.step == GamePhaseStep::PreCombatMain
        {
            return;
        }
        pass(game);
    }
    panic!("Never reached the main phase of turn {turn_number}");
}

fn knight_tokens(game: &GameState) -> usize {
    game.zones
        .all_battlefield_cards()
        .filter(|&id| game.card(id).is_some_and(|card| card.kind == CardKind::Token))
        .count()
}

#[test]
fn saga_chapters_fire_each_main_phase() {
    let mut game = test_games::game_at_first_main(31);
    let saga = put_on_battlefield(&mut game, PlayerName::One, test_cards::HISTORY_OF_BENALIA);
    assert_eq!(game.card(saga).unwrap().counters.count(CounterKind::Lore), 0);

    // Chapter I: the lore counter is added at the next main phase and the
    // chapter ability goes on the stack.
    pass_until_main_of_turn(&mut game, 2);
    assert_eq!(game.card(saga).unwrap().counters.count(CounterKind::Lore), 1);
    assert_eq!(game.stack().len(), 1);
    pass(&mut game);
    pass(&mut game);
    assert!(game.stack().is_empty());
    assert_eq!(knight_tokens(&game), 1);

    // Chapter II creates a second token.
    pass_until_main_of_turn(&mut game, 3);
    pass(&mut game);
    pass(&mut game);
    assert_eq!(knight_tokens(&game), 2);
    assert_eq!(game.card(saga).unwrap().zone, Zone::Battlefield);
}

#[test]
fn saga_is_sacrificed_only_after_its_final_chapter_resolves() {
    let mut game = test_games::game_at_first_main(32);
    let saga = put_on_battlefield(&mut game, PlayerName::One, test_cards::HISTORY_OF_BENALIA);

    pass_until_main_of_turn(&mut game, 2);
    pass(&mut game);
    pass(&mut game);
    pass_until_main_of_turn(&mut game, 3);
    pass(&mut game);
    pass(&mut game);

    // The final chapter has triggered: its ability is on the stack with a
    // response window, and the saga must still be on the battlefield.
    pass_until_main_of_turn(&mut game, 4);
    assert_eq!(game.card(saga).unwrap().counters.count(CounterKind::Lore), 3);
    assert_eq!(game.card(saga).unwrap().zone, Zone::Battlefield);
    assert_eq!(game.stack().len(), 1);

    // Once the chapter ability resolves, state-based actions sacrifice the
    // completed saga.
    pass(&mut game);
    pass(&mut game);
    assert!(game.stack().is_empty());
    assert_eq!(game.card(saga).unwrap().zone, Zone::Graveyard);
    assert_eq!(knight_tokens(&game), 2);
}
