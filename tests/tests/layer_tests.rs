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
use data::core::keywords::Keyword;
use data::core::primitives::{PlayerName, Source, Timestamp, Zone};
use data::effects::continuous_effect::{
    ContinuousEffect, ContinuousEffectKind, EffectDuration, EffectLayer, EffectTargets,
};
use rules::layers;
use rules::mutations::{move_card, permanents};
use rules::queries::card_queries;
use testing::test_cards;
use testing::test_games::{self, put_on_battlefield};

#[test]
fn anthem_modifies_power_and_toughness() {
    let mut game = test_games::game_at_first_main(2);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    assert_eq!(card_queries::power(&game, bears), 2);

    put_on_battlefield(&mut game, PlayerName::One, test_cards::GLORIOUS_ANTHEM);
    assert_eq!(card_queries::power(&game, bears), 3);
    assert_eq!(card_queries::toughness(&game, bears), 3);
}

#[test]
fn anthem_does_not_affect_opponent_creatures() {
    let mut game = test_games::game_at_first_main(2);
    let theirs = put_on_battlefield(&mut game, PlayerName::Two, test_cards::GRIZZLY_BEARS);
    put_on_battlefield(&mut game, PlayerName::One, test_cards::GLORIOUS_ANTHEM);
    assert_eq!(card_queries::power(&game, theirs), 2);
}

#[test]
fn removing_the_source_restores_characteristics() {
    let mut game = test_games::game_at_first_main(2);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    let anthem = put_on_battlefield(&mut game, PlayerName::One, test_cards::GLORIOUS_ANTHEM);
    assert_eq!(card_queries::power(&game, bears), 3);

    let _ = move_card::run(&mut game, Source::Game, anthem, Zone::Graveyard);
    layers::recalculate(&mut game);
    assert_eq!(card_queries::power(&game, bears), 2);
}

#[test]
fn counters_apply_in_layer_7b_before_anthems() {
    let mut game = test_games::game_at_first_main(2);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    let _ = permanents::add_counters(
        &mut game,
        Source::Game,
        bears,
        CounterKind::PlusOnePlusOne,
        1,
    );
    layers::recalculate(&mut game);
    assert_eq!(card_queries::power(&game, bears), 3);

    put_on_battlefield(&mut game, PlayerName::One, test_cards::GLORIOUS_ANTHEM);
    assert_eq!(card_queries::power(&game, bears), 4);
    assert_eq!(card_queries::toughness(&game, bears), 4);
}

#[test]
fn layer_application_is_idempotent() {
    let mut game = test_games::game_at_first_main(2);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    put_on_battlefield(&mut game, PlayerName::One, test_cards::GLORIOUS_ANTHEM);

    layers::recalculate(&mut game);
    let first = game.card(bears).unwrap().derived.clone();
    game.effects.invalidate_cache();
    layers::recalculate(&mut game);
    let second = game.card(bears).unwrap().derived.clone();
    assert_eq!(first, second);
}

#[test]
fn keyword_grants_and_switch_effects_apply() {
    let mut game = test_games::game_at_first_main(2);
    let wall = put_on_battlefield(&mut game, PlayerName::One, test_cards::WALL_OF_WOOD);
    assert_eq!(card_queries::power(&game, wall), 0);
    assert_eq!(card_queries::toughness(&game, wall), 3);

    game.effects.register(ContinuousEffect {
        id: Default::default(),
        source: wall,
        controller: PlayerName::One,
        layer: EffectLayer::Ability,
        targets: EffectTargets::Single(wall),
        kind: ContinuousEffectKind::AddKeyword(Keyword::Flying),
        duration: EffectDuration::EndOfTurn,
        timestamp: Timestamp::default(),
        condition: None,
    });
    game.effects.register(ContinuousEffect {
        id: Default::default(),
        source: wall,
        controller: PlayerName::One,
        layer: EffectLayer::PowerToughnessSwitching,
        targets: EffectTargets::Single(wall),
        kind: ContinuousEffectKind::SwitchPowerToughness,
        duration: EffectDuration::EndOfTurn,
        timestamp: Timestamp::default(),
        condition: None,
    });
    layers::recalculate(&mut game);

    assert!(card_queries::has_keyword(&game, wall, Keyword::Flying));
    assert_eq!(card_queries::power(&game, wall), 3);
    assert_eq!(card_queries::toughness(&game, wall), 0);
}

#[test]
fn control_change_moves_permanent_between_battlefields() {
    let mut game = test_games::game_at_first_main(2);
    let bears = put_on_battlefield(&mut game, PlayerName::Two, test_cards::GRIZZLY_BEARS);

    game.effects.register(ContinuousEffect {
        id: Default::default(),
        source: bears,
        controller: PlayerName::One,
        layer: EffectLayer::Control,
        targets: EffectTargets::Single(bears),
        kind: ContinuousEffectKind::SetController(PlayerName::One),
        duration: EffectDuration::EndOfTurn,
        timestamp: Timestamp::default(),
        condition: None,
    });
    layers::recalculate(&mut game);

    assert!(game.battlefield(PlayerName::One).contains(&bears));
    assert!(!game.battlefield(PlayerName::Two).contains(&bears));
    assert_eq!(game.card(bears).unwrap().controller, PlayerName::One);
}

#[test]
fn attached_aura_grants_its_bonus() {
    let mut game = test_games::game_at_first_main(2);
    let bears = put_on_battlefield(&mut game, PlayerName::One, test_cards::GRIZZLY_BEARS);
    // Attach before state-based actions run, or the unattached aura is
    // swept to the graveyard.
    let aura = test_games::add_to_hand(&mut game, PlayerName::One, test_cards::HOLY_STRENGTH);
    let _ = move_card::run(&mut game, Source::Game, aura, Zone::Battlefield);
    let _ = permanents::attach(&mut game, Source::Game, aura, bears);
    layers::recalculate(&mut game);

    assert_eq!(card_queries::power(&game, bears), 3);
    assert_eq!(card_queries::toughness(&game, bears), 4);
}
