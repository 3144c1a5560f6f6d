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

use data::card_states::card_state::TappedState;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{PlayerName, Source, StackItemId, Zone};
use data::game_states::game_state::GameState;
use enum_iterator::all;
use rand::prelude::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::SplitMix64;
use rules::action_handlers::actions::{self, ExecuteAction};
use rules::legality::legal_actions;
use rules::mutations::permanents;
use testing::test_cards;
use testing::test_games::{self, pass, put_on_battlefield};

/// Every card must be indexed by exactly the one zone its state claims.
fn assert_zone_exclusivity(game: &GameState) {
    let cards: Vec<_> = game.zones.all_cards().map(|card| (card.id, card.owner)).collect();
    for (id, owner) in cards {
        let card = game.card(id).unwrap();
        let mut memberships = 0;
        for player in all::<PlayerName>() {
            memberships += usize::from(game.library(player).contains(&id));
            memberships += usize::from(game.hand(player).contains(&id));
            memberships += usize::from(game.graveyard(player).contains(&id));
            memberships += usize::from(game.battlefield(player).contains(&id));
            memberships += usize::from(game.exile(player).contains(&id));
        }
        memberships += usize::from(game.stack().contains(&StackItemId::Card(id)));
        assert_eq!(
            memberships, 1,
            "Card {id:?} owned by {owner:?} in zone {:?} has {memberships} zone index entries",
            card.zone
        );
    }
}

#[test]
fn zone_exclusivity_holds_throughout_a_random_playout() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let mut game = test_games::vanilla_game(21);
    let mut rng = SplitMix64::seed_from_u64(321);

    for _ in 0..300 {
        if game.status.is_over() {
            break;
        }
        let Some(player) = legal_actions::next_to_act(&game) else {
            break;
        };
        let legal = legal_actions::compute(&game, player);
        let action = *legal.choose(&mut rng).unwrap();
        if action == data::actions::game_action::GameAction::Concede {
            continue;
        }
        actions::execute(&mut game, player, action, ExecuteAction { validate: true });
        assert_zone_exclusivity(&game);
    }
}

#[test]
fn passing_on_an_empty_stack_strictly_advances() {
    let mut game = test_games::game_at_first_main(22);
    for _ in 0..50 {
        if game.status.is_over() {
            break;
        }
        let before = (game.turn.turn_number, game.turn.active_player, game.step);
        pass(&mut game);
        pass(&mut game);
        let after = (game.turn.turn_number, game.turn.active_player, game.step);
        assert_ne!(before, after, "Two successive passes must advance the game");
    }
}

#[test]
fn tap_then_untap_round_trips() {
    let mut game = test_games::game_at_first_main(23);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    assert_eq!(game.card(bears).unwrap().tapped_state, TappedState::Untapped);

    let _ = permanents::tap(&mut game, Source::Game, bears);
    assert_eq!(game.card(bears).unwrap().tapped_state, TappedState::Tapped);

    let _ = permanents::untap(&mut game, Source::Game, bears);
    assert_eq!(game.card(bears).unwrap().tapped_state, TappedState::Untapped);
}

#[test]
fn transforming_twice_restores_the_front_face() {
    let mut game = test_games::game_at_first_main(24);
    let delver = put_on_battlefield(&mut game, PlayerName::One, test_cards::DELVER_OF_SECRETS);
    assert_eq!(game.card(delver).unwrap().displayed_name(), "Delver of Secrets");

    let _ = permanents::transform(&mut game, Source::Game, delver);
    actions::run_state_checks(&mut game);
    assert_eq!(game.card(delver).unwrap().displayed_name(), "Insectile Aberration");
    assert_eq!(rules::queries::card_queries::power(&game, delver), 3);
    assert!(rules::queries::card_queries::has_keyword(
        &game,
        delver,
        data::core::keywords::Keyword::Flying
    ));

    let _ = permanents::transform(&mut game, Source::Game, delver);
    actions::run_state_checks(&mut game);
    assert_eq!(game.card(delver).unwrap().displayed_name(), "Delver of Secrets");
    assert_eq!(rules::queries::card_queries::power(&game, delver), 1);
}

#[test]
fn moving_off_the_battlefield_resets_temporary_state() {
    let mut game = test_games::game_at_first_main(25);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    let _ = permanents::tap(&mut game, Source::Game, bears);
    let _ = permanents::add_counters(
        &mut game,
        Source::Game,
        bears,
        data::card_states::counters::CounterKind::PlusOnePlusOne,
        2,
    );

    let _ = rules::mutations::move_card::run(&mut game, Source::Game, bears, Zone::Hand);
    let card = game.card(bears).unwrap();
    assert_eq!(card.tapped_state, TappedState::Untapped);
    assert!(card.counters.is_empty());
    assert_eq!(card.damage, 0);
    assert!(card.attachments.is_empty());
}

#[test]
fn object_ids_change_on_zone_moves() {
    let mut game = test_games::game_at_first_main(26);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    let before = game.card(bears).unwrap().object_id;
    let _ = rules::mutations::move_card::run(&mut game, Source::Game, bears, Zone::Graveyard);
    let after = game.card(bears).unwrap().object_id;
    assert_ne!(before, after);
}
