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

use data::actions::game_action::CombatAction;
use data::card_states::zones::ZoneQueries;
use data::core::primitives::{PlayerName, Zone};
use data::game_states::combat_state::CombatState;
use data::game_states::game_phase_step::GamePhaseStep;
use data::game_states::game_state::GameState;
use data::player_states::player_state::PlayerQueries;
use rules::combat::combat_queries;
use testing::test_cards;
use testing::test_games::{self, act, pass, put_on_battlefield};

fn pass_until_attack_proposal(game: &mut GameState, attacker: PlayerName) {
    for _ in 0..500 {
        if game.turn.active_player == attacker
            && matches!(game.combat, Some(CombatState::ProposingAttackers(_)))
        {
            return;
        }
        pass(game);
    }
    panic!("Never reached an attack proposal for {attacker:?}");
}

#[test]
fn summoning_sick_creatures_cannot_attack() {
    let mut game = test_games::game_at_first_main(4);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    assert!(!combat_queries::is_valid_attacker(&game, PlayerName::One, bears));
}

#[test]
fn haste_allows_attacking_immediately() {
    let mut game = test_games::game_at_first_main(4);
    let goblin = put_on_battlefield(&mut game, PlayerName::One, test_cards::RAGING_GOBLIN);
    assert!(combat_queries::is_valid_attacker(&game, PlayerName::One, goblin));
}

#[test]
fn defenders_cannot_attack() {
    let mut game = test_games::game_at_first_main(4);
    let wall = put_on_battlefield(&mut game, PlayerName::One, test_cards::WALL_OF_WOOD);
    pass_until_attack_proposal(&mut game, PlayerName::One);
    assert!(!combat_queries::is_valid_attacker(&game, PlayerName::One, wall));
}

#[test]
fn flying_is_blocked_only_by_flying_or_reach() {
    let mut game = test_games::game_at_first_main(4);
    let drake = put_on_battlefield(&mut game, PlayerName::One, test_cards::WIND_DRAKE);
    let bears = put_on_battlefield(&mut game, PlayerName::Two, test_cards::GRIZZLY_BEARS);
    let spider = put_on_battlefield(&mut game, PlayerName::Two, test_cards::DEADLY_RECLUSE);

    pass_until_attack_proposal(&mut game, PlayerName::One);
    assert!(!combat_queries::can_block(&game, PlayerName::Two, bears, drake));
    assert!(combat_queries::can_block(&game, PlayerName::Two, spider, drake));
}

#[test]
fn menace_requires_two_blockers() {
    let mut game = test_games::game_at_first_main(4);
    let strangler = put_on_battlefield(&mut game, PlayerName::One, test_cards::ALLEY_STRANGLER);
    let first = put_on_battlefield(&mut game, PlayerName::Two, test_cards::GRIZZLY_BEARS);
    let second = put_on_battlefield(&mut game, PlayerName::Two, test_cards::GLORY_SEEKER);

    pass_until_attack_proposal(&mut game, PlayerName::One);
    act(&mut game, CombatAction::DeclareAttacker(strangler).into());
    act(&mut game, CombatAction::ConfirmAttackers.into());
    pass(&mut game);
    pass(&mut game);

    act(&mut game, CombatAction::DeclareBlocker { blocker: first, attacker: strangler }.into());
    assert!(!combat_queries::blocks_satisfy_menace(
        &game,
        &[(first, strangler)]
    ));

    act(&mut game, CombatAction::DeclareBlocker { blocker: second, attacker: strangler }.into());
    act(&mut game, CombatAction::ConfirmBlockers.into());
    assert!(matches!(game.combat, Some(CombatState::ConfirmedBlockers(_))));
}

#[test]
fn vigilance_attackers_stay_untapped() {
    let mut game = test_games::game_at_first_main(4);
    let angel = put_on_battlefield(&mut game, PlayerName::One, test_cards::SERRA_ANGEL);
    let giant = put_on_battlefield(&mut game, PlayerName::One, test_cards::HILL_GIANT);

    pass_until_attack_proposal(&mut game, PlayerName::One);
    act(&mut game, CombatAction::DeclareAttacker(angel).into());
    act(&mut game, CombatAction::DeclareAttacker(giant).into());
    act(&mut game, CombatAction::ConfirmAttackers.into());

    assert!(!game.card(angel).unwrap().tapped_state.is_tapped());
    assert!(game.card(giant).unwrap().tapped_state.is_tapped());
}

#[test]
fn deathtouch_with_first_strike_kills_before_regular_damage() {
    let mut game = test_games::game_at_first_main(4);
    let glissa = put_on_battlefield(&mut game, PlayerName::One, test_cards::GLISSA_THE_TRAITOR);
    let wurm = put_on_battlefield(&mut game, PlayerName::Two, test_cards::CRAW_WURM);

    pass_until_attack_proposal(&mut game, PlayerName::One);
    act(&mut game, CombatAction::DeclareAttacker(glissa).into());
    act(&mut game, CombatAction::ConfirmAttackers.into());
    pass(&mut game);
    pass(&mut game);

    act(&mut game, CombatAction::DeclareBlocker { blocker: wurm, attacker: glissa }.into());
    act(&mut game, CombatAction::ConfirmBlockers.into());
    pass(&mut game);
    pass(&mut game);

    // Any nonzero deathtouch damage in the first-strike step is lethal;
    // the blocker never deals its regular damage.
    assert_eq!(game.step, GamePhaseStep::FirstStrikeDamage);
    assert_eq!(game.card(wurm).unwrap().zone, Zone::Graveyard);

    pass(&mut game);
    pass(&mut game);
    assert_eq!(game.step, GamePhaseStep::CombatDamage);
    assert_eq!(game.card(glissa).unwrap().zone, Zone::Battlefield);
    assert_eq!(game.card(glissa).unwrap().damage, 0);
}

#[test]
fn lifelink_gains_life_on_combat_damage() {
    let mut game = test_games::game_at_first_main(4);
    let nighthawk = put_on_battlefield(&mut game, PlayerName::One, test_cards::VAMPIRE_NIGHTHAWK);

    pass_until_attack_proposal(&mut game, PlayerName::One);
    act(&mut game, CombatAction::DeclareAttacker(nighthawk).into());
    act(&mut game, CombatAction::ConfirmAttackers.into());
    pass(&mut game);
    pass(&mut game);
    // The defender declines to block; passing confirms the empty block
    // and passes through the declare blockers priority window.
    pass(&mut game);
    pass(&mut game);
    pass(&mut game);

    assert_eq!(game.step, GamePhaseStep::CombatDamage);
    assert_eq!(game.player(PlayerName::Two).life, 18);
    assert_eq!(game.player(PlayerName::One).life, 22);
}
