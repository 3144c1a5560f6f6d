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
use data::core::primitives::{ManaColor, PlayerName};
use data::game_states::game_phase_step::GamePhaseStep;
use data::player_states::player_state::PlayerQueries;
use oracle::cost_parser;
use rules::casting::mana_payment;
use testing::test_cards;
use testing::test_games::{self, act, add_mana, add_to_hand, pass, put_on_battlefield};

#[test]
fn payment_planner_uses_basic_land_types() {
    let mut game = test_games::game_at_first_main(8);
    put_on_battlefield(&mut game, PlayerName::One, test_cards::FOREST);
    put_on_battlefield(&mut game, PlayerName::One, test_cards::FOREST);
    put_on_battlefield(&mut game, PlayerName::One, test_cards::MOUNTAIN);

    let one_green = cost_parser::parse("{G}").unwrap();
    let double_green = cost_parser::parse("{G}{G}").unwrap();
    let generic_green = cost_parser::parse("{2}{G}").unwrap();
    let double_red = cost_parser::parse("{R}{R}").unwrap();

    assert!(mana_payment::can_pay(&game, PlayerName::One, &one_green));
    assert!(mana_payment::can_pay(&game, PlayerName::One, &double_green));
    assert!(mana_payment::can_pay(&game, PlayerName::One, &generic_green));
    assert!(!mana_payment::can_pay(&game, PlayerName::One, &double_red));
}

#[test]
fn casting_taps_lands_for_mana() {
    let mut game = test_games::game_at_first_main(8);
    let mountain = put_on_battlefield(&mut game, PlayerName::One, test_cards::MOUNTAIN);
    let bolt = add_to_hand(&mut game, PlayerName::One, test_cards::LIGHTNING_BOLT);

    act(&mut game, GameAction::CastSpell(bolt));
    act(&mut game, PromptAction::ChooseTarget(1).into());

    assert!(game.card(mountain).unwrap().tapped_state.is_tapped());
    assert!(game.player(PlayerName::One).mana_pool.is_empty());
}

#[test]
fn hybrid_costs_resolve_to_either_half() {
    let mut game = test_games::game_at_first_main(8);
    put_on_battlefield(&mut game, PlayerName::One, test_cards::FOREST);
    let hybrid = cost_parser::parse("{G/W}").unwrap();
    let reverse_hybrid = cost_parser::parse("{W/G}").unwrap();
    assert!(mana_payment::can_pay(&game, PlayerName::One, &hybrid));
    assert!(mana_payment::can_pay(&game, PlayerName::One, &reverse_hybrid));
}

#[test]
fn phyrexian_mana_falls_back_to_life() {
    let game = test_games::game_at_first_main(8);
    let cost = cost_parser::parse("{R/P}").unwrap();
    // No red sources at all: the symbol is payable with two life.
    let plan = mana_payment::plan(&game, PlayerName::One, &cost, None).unwrap();
    assert_eq!(plan.life_for_phyrexian, 2);
}

#[test]
fn variable_x_is_bounded_by_available_mana() {
    let mut game = test_games::game_at_first_main(8);
    put_on_battlefield(&mut game, PlayerName::One, test_cards::MOUNTAIN);
    put_on_battlefield(&mut game, PlayerName::One, test_cards::MOUNTAIN);
    put_on_battlefield(&mut game, PlayerName::One, test_cards::MOUNTAIN);

    let cost = cost_parser::parse("{X}{R}{R}").unwrap();
    assert_eq!(mana_payment::max_affordable_x(&game, PlayerName::One, &cost), 1);
}

#[test]
fn mana_pools_empty_between_steps() {
    let mut game = test_games::game_at_first_main(8);
    add_mana(&mut game, PlayerName::One, ManaColor::Green, 3);
    assert_eq!(game.player(PlayerName::One).mana_pool.total(), 3);

    pass(&mut game);
    pass(&mut game);

    assert_eq!(game.step, GamePhaseStep::BeginCombat);
    assert!(game.player(PlayerName::One).mana_pool.is_empty());
    assert!(game.player(PlayerName::Two).mana_pool.is_empty());
}

#[test]
fn activating_a_mana_ability_adds_to_the_pool() {
    let mut game = test_games::game_at_first_main(8);
    let elves = put_on_battlefield(&mut game, PlayerName::One, test_cards::LLANOWAR_ELVES);
    // Mana abilities are tap abilities; the elf must shake off summoning
    // sickness first.
    test_games::pass_until(&mut game, GamePhaseStep::EndStep);
    assert!(
        !rules::legality::legal_actions::compute(&game, PlayerName::One)
            .contains(&GameAction::ActivateAbility {
                card: elves,
                number: data::core::primitives::AbilityNumber(0)
            })
    );
}
