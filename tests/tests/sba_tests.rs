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
use data::core::primitives::{PlayerName, Source, Zone};
use data::game_states::game_state::GameStatus;
use data::player_states::player_state::PlayerQueries;
use rules::action_handlers::actions;
use rules::mutations::{library, move_card, permanents, players, state_based_actions};
use utils::outcome;
use testing::test_cards;
use testing::test_games::{self, put_on_battlefield};

#[test]
fn zero_toughness_dies_despite_indestructible() {
    let mut game = test_games::game_at_first_main(6);
    let myr = put_on_battlefield(&mut game, PlayerName::One, test_cards::DARKSTEEL_MYR);

    let _ = permanents::add_counters(
        &mut game,
        Source::Game,
        myr,
        CounterKind::MinusOneMinusOne,
        1,
    );
    actions::run_state_checks(&mut game);

    assert_eq!(game.card(myr).unwrap().zone, Zone::Graveyard);
}

#[test]
fn indestructible_survives_lethal_damage() {
    let mut game = test_games::game_at_first_main(6);
    let myr = put_on_battlefield(&mut game, PlayerName::One, test_cards::DARKSTEEL_MYR);
    let bolt_source = put_on_battlefield(&mut game, PlayerName::Two, test_cards::GRIZZLY_BEARS);

    let _ = permanents::deal_damage(&mut game, Source::Card(bolt_source), myr, 5, false);
    actions::run_state_checks(&mut game);

    assert_eq!(game.card(myr).unwrap().zone, Zone::Battlefield);
}

#[test]
fn opposing_counters_annihilate_in_pairs() {
    let mut game = test_games::game_at_first_main(6);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);

    let _ =
        permanents::add_counters(&mut game, Source::Game, bears, CounterKind::PlusOnePlusOne, 3);
    let _ = permanents::add_counters(
        &mut game,
        Source::Game,
        bears,
        CounterKind::MinusOneMinusOne,
        2,
    );
    actions::run_state_checks(&mut game);

    let counters = &game.card(bears).unwrap().counters;
    assert_eq!(counters.count(CounterKind::PlusOnePlusOne), 1);
    assert_eq!(counters.count(CounterKind::MinusOneMinusOne), 0);
}

#[test]
fn drawing_from_an_empty_library_loses_the_game() {
    let mut game = test_games::game_at_first_main(6);
    let _ = library::mill(&mut game, Source::Game, PlayerName::One, 100);
    assert!(game.library(PlayerName::One).is_empty());

    let _ = library::draw(&mut game, Source::Game, PlayerName::One);
    assert!(game.player(PlayerName::One).attempted_draw_from_empty);
    actions::run_state_checks(&mut game);

    assert_eq!(
        game.status,
        GameStatus::GameOver { winners: enumset::enum_set!(PlayerName::Two) }
    );
}

#[test]
fn ten_poison_counters_lose_the_game() {
    let mut game = test_games::game_at_first_main(6);
    players::add_poison_counters(&mut game, PlayerName::Two, 10);
    actions::run_state_checks(&mut game);

    assert_eq!(
        game.status,
        GameStatus::GameOver { winners: enumset::enum_set!(PlayerName::One) }
    );
}

#[test]
fn unattached_aura_goes_to_graveyard() {
    let mut game = test_games::game_at_first_main(6);
    let aura = put_on_battlefield(&mut game, PlayerName::One, test_cards::HOLY_STRENGTH);
    // `put_on_battlefield` runs state-based actions, which sweep the
    // never-attached aura immediately.
    assert_eq!(game.card(aura).unwrap().zone, Zone::Graveyard);
}

#[test]
fn aura_dies_when_its_host_leaves() {
    let mut game = test_games::game_at_first_main(6);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    let aura = test_games::add_to_hand(&mut game, PlayerName::One, test_cards::HOLY_STRENGTH);
    let _ = move_card::run(&mut game, Source::Game, aura, Zone::Battlefield);
    let _ = permanents::attach(&mut game, Source::Game, aura, bears);
    actions::run_state_checks(&mut game);
    assert_eq!(game.card(aura).unwrap().zone, Zone::Battlefield);

    let _ = move_card::run(&mut game, Source::Game, bears, Zone::Graveyard);
    actions::run_state_checks(&mut game);
    assert_eq!(game.card(aura).unwrap().zone, Zone::Graveyard);
}

#[test]
fn state_based_actions_reach_a_fixpoint() {
    let mut game = test_games::game_at_first_main(6);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    let _ = permanents::add_counters(
        &mut game,
        Source::Game,
        bears,
        CounterKind::MinusOneMinusOne,
        2,
    );
    actions::run_state_checks(&mut game);

    // Re-running the check must produce no further change.
    let life_before =
        (game.player(PlayerName::One).life, game.player(PlayerName::Two).life);
    let battlefield_before: Vec<_> = game.zones.all_battlefield_cards().collect();
    let graveyard_before = game.graveyard(PlayerName::One).len();

    outcome::execute(|| state_based_actions::run(&mut game));

    assert_eq!(
        life_before,
        (game.player(PlayerName::One).life, game.player(PlayerName::Two).life)
    );
    assert_eq!(battlefield_before, game.zones.all_battlefield_cards().collect::<Vec<_>>());
    assert_eq!(graveyard_before, game.graveyard(PlayerName::One).len());
}
