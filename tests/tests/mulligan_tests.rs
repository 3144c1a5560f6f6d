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
use data::card_states::zones::ZoneQueries;
use data::core::primitives::PlayerName;
use data::decks::deck::Deck;
use data::game_states::game_state::{GameConfiguration, GameStatus};
use data::player_states::player_map::PlayerMap;
use data::player_states::player_state::PlayerQueries;
use oracle::card_database::CardSource;
use rules::game_creation::new_game;
use rules::legality::legal_actions;
use testing::test_cards::DATABASE;
use testing::test_games::{self, act};

#[test]
fn opening_hands_are_seven_cards() {
    let game = test_games::vanilla_game(42);
    assert_eq!(game.status, GameStatus::Playing);
    assert_eq!(game.hand(PlayerName::One).len(), 7);
    assert_eq!(game.hand(PlayerName::Two).len(), 7);
    assert_eq!(game.library(PlayerName::One).len(), 53);
}

#[test]
fn mulligan_redraws_and_bottoms_a_card() {
    let decks = PlayerMap { one: test_games::forest_deck(), two: test_games::forest_deck() };
    let mut game =
        new_game::create(decks, &*DATABASE, GameConfiguration::default(), 42).unwrap();

    assert_eq!(legal_actions::next_to_act(&game), Some(PlayerName::One));
    act(&mut game, PromptAction::Mulligan.into());
    assert_eq!(game.hand(PlayerName::One).len(), 7);

    act(&mut game, PromptAction::KeepHand.into());
    // One card must go to the bottom for the single mulligan taken.
    let bottomed = *game.hand(PlayerName::One).iter().next().unwrap();
    act(&mut game, PromptAction::BottomCard(bottomed).into());
    assert_eq!(game.hand(PlayerName::One).len(), 6);

    act(&mut game, PromptAction::KeepHand.into());
    assert_eq!(game.status, GameStatus::Playing);
    assert_eq!(game.hand(PlayerName::Two).len(), 7);
    // The bottomed card sits on the bottom of its owner's library.
    assert_eq!(game.library(PlayerName::One).front(), Some(&bottomed));
}

#[test]
fn passing_during_mulligans_keeps_the_hand() {
    let decks = PlayerMap { one: test_games::forest_deck(), two: test_games::forest_deck() };
    let mut game =
        new_game::create(decks, &*DATABASE, GameConfiguration::default(), 42).unwrap();

    act(&mut game, GameAction::PassPriority);
    act(&mut game, GameAction::PassPriority);

    assert_eq!(game.status, GameStatus::Playing);
    assert!(game.player(PlayerName::One).mulligan.kept);
}

#[test]
fn deck_validation_rejects_small_decks() {
    let deck = Deck::new("Tiny", vec![testing::test_cards::FOREST; 10]);
    assert!(deck.validate(|_| true).is_err());
}

#[test]
fn deck_validation_enforces_copy_limit_except_basics() {
    let mut cards = vec![testing::test_cards::FOREST; 55];
    cards.extend(vec![testing::test_cards::GRIZZLY_BEARS; 5]);
    let deck = Deck::new("Five Bears", cards);
    assert!(deck
        .validate(|number| DATABASE.is_basic_land(number))
        .is_err());

    let mut cards = vec![testing::test_cards::FOREST; 56];
    cards.extend(vec![testing::test_cards::GRIZZLY_BEARS; 4]);
    let deck = Deck::new("Four Bears", cards);
    assert!(deck.validate(|number| DATABASE.is_basic_land(number)).is_ok());
}
