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

use data::game_states::game_state::GameConfiguration;
use env::action_space::{self, ACTION_SPACE_SIZE, CONCEDE_INDEX, PASS_PRIORITY_INDEX};
use env::agent::RandomAgent;
use env::environment::{GameEnv, TerminationReason};
use rules::legality::legal_actions;
use testing::test_cards::DATABASE;
use testing::test_games;

fn install_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn reset_env(env: &mut GameEnv, seed: u64) {
    env.reset(test_games::forest_deck(), test_games::forest_deck(), &*DATABASE, seed)
        .expect("environment resets");
}

#[test]
fn pass_and_concede_are_always_available() {
    let mut env = GameEnv::new(GameConfiguration::default());
    reset_env(&mut env, 1);

    let mask = env.action_mask();
    assert_eq!(mask.len(), ACTION_SPACE_SIZE);
    assert!(mask[PASS_PRIORITY_INDEX]);
    assert!(mask[CONCEDE_INDEX]);
}

#[test]
fn mask_is_sound_for_every_set_index() {
    let mut env = GameEnv::new(GameConfiguration::default());
    reset_env(&mut env, 2);

    for _ in 0..20 {
        let mask = env.action_mask();
        for (index, legal) in mask.iter().enumerate() {
            if !*legal {
                continue;
            }
            let action = action_space::decode(env.game(), env.controlled, index)
                .expect("legal mask indices decode");
            assert!(
                legal_actions::can_take_action(env.game(), env.controlled, &action),
                "Masked-legal action {action:?} at index {index} is not legal"
            );
        }
        let step = env.apply(PASS_PRIORITY_INDEX);
        if step.terminal {
            break;
        }
    }
}

#[test]
fn encoding_round_trips_legal_actions() {
    let mut env = GameEnv::new(GameConfiguration::default());
    reset_env(&mut env, 3);

    for action in legal_actions::compute(env.game(), env.controlled) {
        let Some(index) = action_space::encode(env.game(), env.controlled, &action) else {
            continue;
        };
        let decoded = action_space::decode(env.game(), env.controlled, index)
            .expect("encoded action decodes");
        assert_eq!(action, decoded);
    }
}

#[test]
fn invalid_action_is_penalized_without_state_change() {
    let mut env = GameEnv::new(GameConfiguration::default());
    reset_env(&mut env, 4);

    let life_before = env.observation().my_life;
    let turn_before = env.observation().turn;
    let step = env.apply(ACTION_SPACE_SIZE - 1);

    assert!(step.info.invalid_action);
    assert!(step.reward < 0.0);
    assert!(!step.terminal);
    assert_eq!(env.observation().my_life, life_before);
    assert_eq!(env.observation().turn, turn_before);
}

#[test]
fn persistent_invalid_actions_truncate_the_episode() {
    let configuration = GameConfiguration { invalid_action_limit: 3, ..Default::default() };
    let mut env = GameEnv::new(configuration);
    reset_env(&mut env, 5);

    let mut last = None;
    for _ in 0..3 {
        last = Some(env.apply(ACTION_SPACE_SIZE - 1));
    }
    let last = last.unwrap();
    assert!(last.terminal);
    assert_eq!(last.info.termination, Some(TerminationReason::TruncatedInvalidActions));
}

#[test]
fn passing_forever_hits_the_turn_limit() {
    let configuration = GameConfiguration { max_turns: 4, ..Default::default() };
    let mut env = GameEnv::new(configuration);
    reset_env(&mut env, 6);

    let mut terminal = None;
    for _ in 0..2000 {
        let step = env.apply(PASS_PRIORITY_INDEX);
        if step.terminal {
            terminal = Some(step);
            break;
        }
    }
    let step = terminal.expect("episode terminates");
    assert_eq!(step.info.termination, Some(TerminationReason::TruncatedTurnLimit));
    // Equal life totals truncate to a draw.
    assert_eq!(step.info.winner, None);
}

#[test]
fn concede_ends_the_episode_as_a_loss() {
    let mut env = GameEnv::new(GameConfiguration::default());
    reset_env(&mut env, 7);

    let step = env.apply(CONCEDE_INDEX);
    assert!(step.terminal);
    assert_eq!(step.info.termination, Some(TerminationReason::Loss));
    assert_eq!(step.reward, -1.0);
}

#[test]
fn observation_hides_opponent_hand_contents() {
    let mut env = GameEnv::new(GameConfiguration::default());
    reset_env(&mut env, 8);

    let observation = env.observation();
    assert_eq!(observation.my_hand.len(), observation.my_hand_count);
    assert_eq!(observation.opp_hand_count, 7);
}

#[test]
fn playouts_with_the_same_seed_are_deterministic() {
    install_tracing();
    let run = |seed: u64| {
        let mut env = GameEnv::new(GameConfiguration::default())
            .with_opponent(Box::new(RandomAgent::new(99)));
        reset_env(&mut env, seed);
        let mut trace = vec![];
        for _ in 0..500 {
            let observation = env.observation();
            trace.push((observation.turn, observation.my_life, observation.opp_life));
            let step = env.apply(PASS_PRIORITY_INDEX);
            if step.terminal {
                trace.push((step.info.turn, 0, 0));
                break;
            }
        }
        trace
    };

    assert_eq!(run(11), run(11));
}
