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

use data::actions::game_action::GameAction;
use data::core::numerics::{LifeValue, TurnNumber};
use data::core::primitives::PlayerName;
use data::decks::deck::Deck;
use data::game_states::game_state::{GameConfiguration, GameState, GameStatus};
use data::player_states::player_map::PlayerMap;
use data::player_states::player_state::PlayerQueries;
use oracle::card_database::CardSource;
use rules::action_handlers::actions::{self, ExecuteAction};
use rules::game_creation::new_game;
use rules::legality::legal_actions;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utils::outcome::Value;

use crate::action_space;
use crate::agent::{Agent, PassingAgent};
use crate::observation::{self, Observation};

/// Why an episode ended, from the controlled player's perspective.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TerminationReason {
    Win,
    Loss,
    Draw,
    TruncatedTurnLimit,
    TruncatedStepLimit,
    TruncatedInvalidActions,
}

/// Terminal summary reported alongside the final observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepInfo {
    pub termination: Option<TerminationReason>,

    /// Winning player, if the game did not end in a draw
    pub winner: Option<PlayerName>,

    pub final_life: Option<(LifeValue, LifeValue)>,

    pub turn: TurnNumber,

    /// True if the submitted action index was illegal and ignored
    pub invalid_action: bool,
}

/// The result of one environment step.
#[derive(Debug, Clone)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub terminal: bool,
    pub info: StepInfo,
}

/// Negative shaping signal for selecting a masked-out action.
const INVALID_ACTION_REWARD: f64 = -0.1;

/// Bound on internal engine iterations within a single `apply` call; when
/// exceeded with no agent decision reached, the episode is truncated.
const APPLY_LOOP_BOUND: u64 = 10_000;

/// A single game of the self-play environment.
///
/// The environment advances the game whenever control does not rest with
/// the controlled player: the opponent acts through its [Agent], and
/// forced passes (no non-pass action available) happen automatically.
/// Control returns to the caller exactly when the controlled player has a
/// real choice to make or the episode has ended.
pub struct GameEnv {
    game: Option<GameState>,

    /// The player driven by the external caller
    pub controlled: PlayerName,

    /// Decision-maker for the other player
    pub opponent: Box<dyn Agent>,

    pub configuration: GameConfiguration,

    steps_taken: u64,

    invalid_actions: u64,

    termination: Option<TerminationReason>,
}

impl GameEnv {
    pub fn new(configuration: GameConfiguration) -> Self {
        Self {
            game: None,
            controlled: PlayerName::One,
            opponent: Box::new(PassingAgent),
            configuration,
            steps_taken: 0,
            invalid_actions: 0,
            termination: None,
        }
    }

    pub fn with_opponent(mut self, opponent: Box<dyn Agent>) -> Self {
        self.opponent = opponent;
        self
    }

    /// The current game state. Panics before the first `reset`.
    pub fn game(&self) -> &GameState {
        self.game.as_ref().expect("Environment has not been reset")
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        self.game.as_mut().expect("Environment has not been reset")
    }

    /// Starts a new episode: builds the decks, shuffles with `seed`, deals
    /// opening hands, and advances to the controlled player's first
    /// decision (normally their mulligan choice).
    pub fn reset(
        &mut self,
        deck_one: Deck,
        deck_two: Deck,
        cards: &dyn CardSource,
        seed: u64,
    ) -> Value<Observation> {
        let decks = PlayerMap { one: deck_one, two: deck_two };
        let game = new_game::create(decks, cards, self.configuration, seed)?;
        self.game = Some(game);
        self.steps_taken = 0;
        self.invalid_actions = 0;
        self.termination = None;
        self.run_until_decision();
        Ok(self.observation())
    }

    /// The legality mask for the controlled player.
    pub fn action_mask(&self) -> Vec<bool> {
        action_space::action_mask(self.game(), self.controlled)
    }

    /// The controlled player's current view of the game.
    pub fn observation(&self) -> Observation {
        observation::build(self.game(), self.controlled)
    }

    /// Applies one action for the controlled player and advances the game
    /// until their next decision point or the end of the episode.
    ///
    /// Selecting a masked-out index leaves the game unchanged and returns
    /// a negative shaping reward; repeated violations truncate the
    /// episode.
    pub fn apply(&mut self, action_index: usize) -> Step {
        if self.termination.is_some() {
            return self.finish_step(false);
        }

        let controlled = self.controlled;
        let decoded = action_space::decode(self.game(), controlled, action_index);
        let legal = match &decoded {
            Some(action) => legal_actions::can_take_action(self.game(), controlled, action),
            None => false,
        };
        if !legal {
            self.invalid_actions += 1;
            debug!(action_index, "Ignoring illegal action selection");
            if self.invalid_actions >= self.configuration.invalid_action_limit {
                warn!("Invalid action limit reached, truncating episode");
                self.termination = Some(TerminationReason::TruncatedInvalidActions);
            }
            return self.finish_step(true);
        }
        self.invalid_actions = 0;

        let action = decoded.expect("legal action decodes");
        actions::execute(
            self.game_mut(),
            controlled,
            action,
            ExecuteAction { validate: false },
        );
        self.steps_taken += 1;
        if self.steps_taken >= self.configuration.max_steps {
            self.termination = Some(TerminationReason::TruncatedStepLimit);
            return self.finish_step(false);
        }

        self.run_until_decision();
        self.finish_step(false)
    }

    /// Advances the game until the controlled player has a real decision,
    /// the game ends, or a budget is exhausted.
    fn run_until_decision(&mut self) {
        let mut iterations: u64 = 0;
        loop {
            if self.termination.is_some() {
                return;
            }
            iterations += 1;
            if iterations > APPLY_LOOP_BOUND {
                warn!("Internal loop bound exceeded, truncating episode");
                self.termination = Some(TerminationReason::TruncatedStepLimit);
                return;
            }

            if self.game().status.is_over() {
                self.resolve_game_over();
                return;
            }
            if self.game().turn.turn_number > self.configuration.max_turns {
                debug!("Turn limit reached, truncating episode");
                self.termination = Some(TerminationReason::TruncatedTurnLimit);
                return;
            }

            let Some(actor) = legal_actions::next_to_act(self.game()) else {
                self.resolve_game_over();
                return;
            };
            let legal = legal_actions::compute(self.game(), actor);

            if actor == self.controlled {
                let has_real_choice = legal
                    .iter()
                    .any(|action| !matches!(action, GameAction::PassPriority | GameAction::Concede));
                if has_real_choice {
                    return;
                }
                // Only pass available: act automatically rather than
                // returning a degenerate decision.
                actions::execute(
                    self.game_mut(),
                    actor,
                    GameAction::PassPriority,
                    ExecuteAction { validate: false },
                );
                continue;
            }

            let choice = {
                let game = self.game.as_ref().expect("Environment has not been reset");
                self.opponent.select(game, actor, &legal)
            };
            let choice = if legal.contains(&choice) { choice } else { GameAction::PassPriority };
            actions::execute(self.game_mut(), actor, choice, ExecuteAction { validate: false });
        }
    }

    fn resolve_game_over(&mut self) {
        let winners = match &self.game().status {
            GameStatus::GameOver { winners } => *winners,
            _ => return,
        };
        self.termination = Some(if winners.is_empty() {
            TerminationReason::Draw
        } else if winners.contains(self.controlled) {
            TerminationReason::Win
        } else {
            TerminationReason::Loss
        });
    }

    /// Winner under budget truncation: life-total comparison, draw on a
    /// tie.
    fn truncation_winner(&self) -> Option<PlayerName> {
        let my_life = self.game().player(self.controlled).life;
        let opp_life = self.game().player(self.controlled.opponent()).life;
        if my_life > opp_life {
            Some(self.controlled)
        } else if opp_life > my_life {
            Some(self.controlled.opponent())
        } else {
            None
        }
    }

    fn finish_step(&mut self, invalid_action: bool) -> Step {
        let terminal = self.termination.is_some();
        let winner = match self.termination {
            Some(TerminationReason::Win) => Some(self.controlled),
            Some(TerminationReason::Loss) => Some(self.controlled.opponent()),
            Some(TerminationReason::Draw) => None,
            Some(_) => self.truncation_winner(),
            None => None,
        };
        let reward = if invalid_action {
            INVALID_ACTION_REWARD
        } else {
            match self.termination {
                Some(TerminationReason::Win) => 1.0,
                Some(TerminationReason::Loss) => -1.0,
                Some(_) if winner == Some(self.controlled) => 1.0,
                Some(_) if winner == Some(self.controlled.opponent()) => -1.0,
                _ => 0.0,
            }
        };

        let game = self.game();
        let info = StepInfo {
            termination: self.termination,
            winner,
            final_life: terminal.then(|| {
                (
                    game.player(self.controlled).life,
                    game.player(self.controlled.opponent()).life,
                )
            }),
            turn: game.turn.turn_number,
            invalid_action,
        };
        Step { observation: self.observation(), reward, terminal, info }
    }
}
