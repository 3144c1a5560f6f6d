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

use std::collections::{BTreeSet, VecDeque};

use enumset::EnumSet;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};

use crate::card_definitions::effect_definition::EffectList;
use crate::card_states::card_state::{CardState, ChosenTarget};
use crate::card_states::stack_ability_state::StackAbilityState;
use crate::card_states::zones::{ZoneQueries, Zones};
use crate::core::numerics::{LifeValue, TurnNumber};
use crate::core::primitives::{
    AbilityNumber, CardId, GameId, HasCardId, HasPlayerName, PlayerName, StackAbilityId,
    StackItemId, ALL_POSSIBLE_PLAYERS,
};
use crate::effects::effect_registry::EffectRegistry;
use crate::game_states::combat_state::CombatState;
use crate::game_states::game_phase_step::GamePhaseStep;
use crate::game_states::history_data::TurnHistory;
use crate::game_states::pending_decision::{PendingCast, PendingDecision};
use crate::game_states::state_based_event::StateBasedEvent;
use crate::player_states::player_state::{PlayerQueries, PlayerState, Players};

/// Identifies a turn within the game.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TurnData {
    /// Player whose turn it is or was.
    pub active_player: PlayerName,

    /// Turn number for that player.
    ///
    /// The first turn of the game is turn 1; turn 0 is game setup.
    pub turn_number: TurnNumber,
}

/// Status of the game: whether it is starting, is ongoing, or has ended.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Initial step of game setup: decks are shuffled and opening hands
    /// drawn.
    Setup,

    /// Players resolve mulligans in sequence.
    ///
    /// See <https://yawgatog.com/resources/magic-rules/#R1035>
    ResolveMulligans,

    /// Game is currently ongoing
    Playing,

    /// Game has ended and the [PlayerName] players have won.
    ///
    /// If the winner set is empty, the game has ended in a draw.
    GameOver { winners: EnumSet<PlayerName> },
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::GameOver { .. })
    }
}

/// Options controlling overall gameplay
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameConfiguration {
    /// Set of players currently in this game, i.e. who have not yet lost
    pub all_players: EnumSet<PlayerName>,

    /// Life total each player starts with
    pub starting_life: LifeValue,

    /// Turn count after which the episode is truncated
    pub max_turns: TurnNumber,

    /// Maximum number of agent steps per episode before truncation
    pub max_steps: u64,

    /// Consecutive illegal action selections tolerated before the episode
    /// is truncated
    pub invalid_action_limit: u64,
}

impl Default for GameConfiguration {
    fn default() -> Self {
        Self {
            all_players: ALL_POSSIBLE_PLAYERS,
            starting_life: 20,
            max_turns: 20,
            max_steps: 2000,
            invalid_action_limit: 25,
        }
    }
}

/// A triggered ability which has triggered but has not yet been put on the
/// stack.
///
/// Collected while effects resolve; moved onto the stack in APNAP order the
/// next time a player would receive priority.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PendingTrigger {
    pub source: CardId,

    pub controller: PlayerName,

    pub ability_number: AbilityNumber,

    pub effects: EffectList,
}

/// This is the state of a single ongoing game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Unique ID for this game
    pub id: GameId,

    /// Status of the game: whether it is starting, is ongoing, or has ended.
    pub status: GameStatus,

    /// Current game phase step.
    ///
    /// If the game has not yet started, this will be "Untap". If the game
    /// has ended, this will be the step in which the game ended.
    pub step: GamePhaseStep,

    /// Identifies the player whose turn it currently is and the current
    /// turn number.
    pub turn: TurnData,

    /// Player who can currently take a game action.
    ///
    /// Actions are always handled sequentially, there is no such thing as a
    /// 'simultaneous' action, hence there is always exactly one player who
    /// can currently act.
    pub priority: PlayerName,

    /// Players whose last game action was to pass priority. When all
    /// players pass priority, the current item on the stack resolves or the
    /// current game step ends.
    pub passed: EnumSet<PlayerName>,

    /// Options controlling overall gameplay
    pub configuration: GameConfiguration,

    /// State for the players within this game
    pub players: Players,

    /// Stores state for all cards and abilities in this game and tracks
    /// which game zone they are in.
    pub zones: Zones,

    /// Registered continuous and replacement effects
    pub effects: EffectRegistry,

    /// State of creatures participating in the currently active combat
    /// phase, if any.
    pub combat: Option<CombatState>,

    /// Triggered abilities waiting to be put on the stack
    pub pending_triggers: Vec<PendingTrigger>,

    /// A spell or ability whose choices are still being specified
    pub pending_cast: Option<PendingCast>,

    /// A choice a player must make before the game can continue
    pub pending_decision: Option<PendingDecision>,

    /// Tracks events which have occurred since the last time state-based
    /// actions were checked which may trigger game mutations during the
    /// next state-based action check.
    pub state_based_events: Option<Vec<StateBasedEvent>>,

    /// Events tracked for the current turn
    pub this_turn: TurnHistory,

    /// Seed used to initialize the random number generator for this game
    pub rng_seed: u64,

    /// Random number generator to use for this game
    pub rng: Xoshiro256StarStar,
}

impl GameState {
    pub fn new(id: GameId, configuration: GameConfiguration, seed: u64) -> Self {
        Self {
            id,
            status: GameStatus::Setup,
            step: GamePhaseStep::Untap,
            turn: TurnData { active_player: PlayerName::One, turn_number: 0 },
            priority: PlayerName::One,
            passed: EnumSet::empty(),
            configuration,
            players: Players {
                one: PlayerState::new(PlayerName::One, configuration.starting_life),
                two: PlayerState::new(PlayerName::Two, configuration.starting_life),
            },
            zones: Zones::default(),
            effects: EffectRegistry::default(),
            combat: None,
            pending_triggers: vec![],
            pending_cast: None,
            pending_decision: None,
            state_based_events: None,
            this_turn: TurnHistory::default(),
            rng_seed: seed,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Returns the player whose turn it is
    pub fn active_player(&self) -> PlayerName {
        self.turn.active_player
    }

    /// Shuffles the order of cards in a player's library
    pub fn shuffle_library(&mut self, player: PlayerName) {
        self.zones.shuffle_library(player, &mut self.rng);
    }

    /// Adds a new tracked [StateBasedEvent].
    pub fn add_state_based_event(&mut self, event: StateBasedEvent) {
        if let Some(events) = &mut self.state_based_events {
            events.push(event);
        } else {
            self.state_based_events = Some(vec![event]);
        }
    }

    pub fn clear_passed(&mut self) {
        self.passed = EnumSet::empty();
    }

    /// True if the given chosen target still refers to the object it was
    /// chosen for.
    ///
    /// A card target becomes stale when the card changes zones, because the
    /// move assigns a new object ID.
    pub fn target_still_exists(&self, target: &ChosenTarget) -> bool {
        match target {
            ChosenTarget::Card { id, object_id } => {
                self.card(*id).is_some_and(|card| card.object_id == *object_id)
            }
            ChosenTarget::Player(_) => true,
            ChosenTarget::StackAbility(id) => self.stack_ability(*id).is_some(),
        }
    }
}

impl ZoneQueries for GameState {
    fn card(&self, id: impl HasCardId) -> Option<&CardState> {
        self.zones.card(id)
    }

    fn card_mut(&mut self, id: impl HasCardId) -> Option<&mut CardState> {
        self.zones.card_mut(id)
    }

    fn stack_ability(&self, id: StackAbilityId) -> Option<&StackAbilityState> {
        self.zones.stack_ability(id)
    }

    fn stack_ability_mut(&mut self, id: StackAbilityId) -> Option<&mut StackAbilityState> {
        self.zones.stack_ability_mut(id)
    }

    fn library(&self, player: impl HasPlayerName) -> &VecDeque<CardId> {
        self.zones.library(player)
    }

    fn hand(&self, player: impl HasPlayerName) -> &BTreeSet<CardId> {
        self.zones.hand(player)
    }

    fn graveyard(&self, player: impl HasPlayerName) -> &VecDeque<CardId> {
        self.zones.graveyard(player)
    }

    fn battlefield(&self, player: impl HasPlayerName) -> &BTreeSet<CardId> {
        self.zones.battlefield(player)
    }

    fn exile(&self, player: impl HasPlayerName) -> &BTreeSet<CardId> {
        self.zones.exile(player)
    }

    fn stack(&self) -> &[StackItemId] {
        self.zones.stack()
    }
}

impl PlayerQueries for GameState {
    fn player(&self, name: PlayerName) -> &PlayerState {
        self.players.player(name)
    }

    fn player_mut(&mut self, name: PlayerName) -> &mut PlayerState {
        self.players.player_mut(name)
    }
}
