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
use data::core::primitives::{ManaColor, PlayerName, Zone};
use data::game_states::combat_state::CombatState;
use data::game_states::game_phase_step::GamePhaseStep;
use data::game_states::game_state::GameState;
use data::game_states::pending_decision::PendingDecision;
use data::player_states::player_state::PlayerQueries;
use testing::test_cards;
use testing::test_games::{self, act, add_mana, add_to_hand, pass, put_on_battlefield};

/// Passes priority until the active player is proposing attackers.
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
fn lightning_bolt_to_face() {
    let mut game = test_games::game_at_first_main(17);
    let bolt = add_to_hand(&mut game, PlayerName::One, test_cards::LIGHTNING_BOLT);
    add_mana(&mut game, PlayerName::One, ManaColor::Red, 1);

    act(&mut game, GameAction::CastSpell(bolt));
    // Candidates for "any target" list battlefield objects first, then
    // players in turn order.
    act(&mut game, PromptAction::ChooseTarget(1).into());
    assert!(!game.stack().is_empty());

    pass(&mut game);
    pass(&mut game);

    assert_eq!(game.player(PlayerName::Two).life, 17);
    assert!(game.stack().is_empty());
    assert!(game.graveyard(PlayerName::One).contains(&bolt));
    assert_eq!(game.card(bolt).unwrap().zone, Zone::Graveyard);
}

#[test]
fn passing_with_empty_stack_advances_phase() {
    let mut game = test_games::game_at_first_main(3);
    assert_eq!(game.step, GamePhaseStep::PreCombatMain);

    pass(&mut game);
    pass(&mut game);

    assert_eq!(game.step, GamePhaseStep::BeginCombat);
}

#[test]
fn trample_damage_overflows_to_defender() {
    let mut game = test_games::game_at_first_main(5);
    let dreadmaw = put_on_battlefield(&mut game, PlayerName::One, test_cards::COLOSSAL_DREADMAW);
    let bears = put_on_battlefield(&mut game, PlayerName::Two, test_cards::GRIZZLY_BEARS);

    pass_until_attack_proposal(&mut game, PlayerName::One);
    act(&mut game, CombatAction::DeclareAttacker(dreadmaw).into());
    act(&mut game, CombatAction::ConfirmAttackers.into());
    pass(&mut game);
    pass(&mut game);

    act(&mut game, CombatAction::DeclareBlocker { blocker: bears, attacker: dreadmaw }.into());
    act(&mut game, CombatAction::ConfirmBlockers.into());
    pass(&mut game);
    pass(&mut game);

    assert_eq!(game.step, GamePhaseStep::CombatDamage);
    // The 2/2 blocker absorbs lethal damage; the remaining four tramples
    // over to the defending player.
    assert_eq!(game.card(bears).unwrap().zone, Zone::Graveyard);
    assert_eq!(game.player(PlayerName::Two).life, 16);
    assert_eq!(game.card(dreadmaw).unwrap().zone, Zone::Battlefield);
    assert_eq!(game.card(dreadmaw).unwrap().damage, 2);
}

#[test]
fn counterspell_counters_a_creature_spell() {
    let mut game = test_games::game_at_first_main(7);
    let bears = add_to_hand(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    let counterspell = add_to_hand(&mut game, PlayerName::Two, test_cards::COUNTERSPELL);
    add_mana(&mut game, PlayerName::One, ManaColor::Green, 2);
    add_mana(&mut game, PlayerName::Two, ManaColor::Blue, 2);

    act(&mut game, GameAction::CastSpell(bears));
    pass(&mut game);

    act(&mut game, GameAction::CastSpell(counterspell));
    act(&mut game, PromptAction::ChooseTarget(0).into());
    pass(&mut game);
    pass(&mut game);

    // Counterspell resolves first from the top of the stack; the creature
    // spell never resolves.
    assert!(game.battlefield(PlayerName::One).is_empty());
    assert!(game.graveyard(PlayerName::One).contains(&bears));
    assert!(game.graveyard(PlayerName::Two).contains(&counterspell));
    assert!(game.stack().is_empty());
}

#[test]
fn double_strike_against_two_blockers() {
    let mut game = test_games::game_at_first_main(11);
    let foremost = put_on_battlefield(&mut game, PlayerName::One, test_cards::ARASHIN_FOREMOST);
    let first_bears = put_on_battlefield(&mut game, PlayerName::Two, test_cards::GRIZZLY_BEARS);
    let second_bears = put_on_battlefield(&mut game, PlayerName::Two, test_cards::GRIZZLY_BEARS);
    // Declaration order is the damage assignment order.
    let (first_blocker, second_blocker) =
        if first_bears < second_bears { (first_bears, second_bears) } else { (second_bears, first_bears) };

    pass_until_attack_proposal(&mut game, PlayerName::One);
    act(&mut game, CombatAction::DeclareAttacker(foremost).into());
    act(&mut game, CombatAction::ConfirmAttackers.into());
    pass(&mut game);
    pass(&mut game);

    act(&mut game, CombatAction::DeclareBlocker { blocker: first_blocker, attacker: foremost }.into());
    act(&mut game, CombatAction::DeclareBlocker { blocker: second_blocker, attacker: foremost }.into());
    act(&mut game, CombatAction::ConfirmBlockers.into());
    pass(&mut game);
    pass(&mut game);

    // First-strike step: the attacker assigns lethal damage to the first
    // blocker, which dies before regular damage.
    assert_eq!(game.step, GamePhaseStep::FirstStrikeDamage);
    assert_eq!(game.card(first_blocker).unwrap().zone, Zone::Graveyard);
    assert_eq!(game.card(second_blocker).unwrap().zone, Zone::Battlefield);

    pass(&mut game);
    pass(&mut game);

    // Regular step: the dead blocker still used up the attacker's
    // assignment, so the second blocker takes nothing; it deals two back
    // and kills the attacker.
    assert_eq!(game.step, GamePhaseStep::CombatDamage);
    assert_eq!(game.card(foremost).unwrap().zone, Zone::Graveyard);
    assert_eq!(game.card(second_blocker).unwrap().zone, Zone::Battlefield);
    assert_eq!(game.card(second_blocker).unwrap().damage, 0);
}

#[test]
fn legend_rule_keeps_chosen_copy() {
    let mut game = test_games::game_at_first_main(13);
    let first = put_on_battlefield(&mut game, PlayerName::One, test_cards::ISAMARU);
    let second = put_on_battlefield(&mut game, PlayerName::One, test_cards::ISAMARU);

    assert!(matches!(
        game.pending_decision,
        Some(PendingDecision::ChooseLegendToKeep { .. })
    ));

    act(&mut game, PromptAction::ChooseLegend(first).into());

    assert_eq!(game.card(first).unwrap().zone, Zone::Battlefield);
    assert_eq!(game.card(second).unwrap().zone, Zone::Graveyard);
    assert!(game.pending_decision.is_none());
}
