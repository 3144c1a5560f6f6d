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

use data::card_states::card_state::CardKind;
use data::core::primitives::{GameId, PlayerName, Source, Zone};
use data::decks::deck::Deck;
use data::game_states::game_state::{GameConfiguration, GameState, GameStatus};
use data::player_states::player_map::PlayerMap;
use oracle::card_database::CardSource;
use tracing::{debug, instrument};
use utils::outcome::{StopCondition, Value};
use utils::with_error::WithError;
use uuid::Uuid;

use crate::mulligan;
use crate::mutations::library;

/// Creates a new game: instantiates both decks from the card database,
/// shuffles with the seeded generator, draws opening hands, and enters the
/// mulligan phase.
#[instrument(level = "debug", skip(game_decks, cards))]
pub fn create(
    game_decks: PlayerMap<Deck>,
    cards: &dyn CardSource,
    configuration: GameConfiguration,
    seed: u64,
) -> Value<GameState> {
    let id = GameId(Uuid::from_u64_pair(seed, game_decks.one.cards.len() as u64));
    let mut game = GameState::new(id, configuration, seed);

    for player in [PlayerName::One, PlayerName::Two] {
        let deck = game_decks.get(player);
        deck.validate(|number| cards.is_basic_land(number)).map_err(|error| {
            StopCondition::Error(color_eyre::eyre::eyre!(
                "Deck {:?} is not legal: {error:?}",
                deck.name
            ))
        })?;

        for &number in &deck.cards {
            let printed = cards
                .printed(number)
                .with_error(|| format!("Card number {number:?} not found in database"))?;
            let turn = game.turn;
            game.zones.create_card(number, printed, CardKind::Normal, player, Zone::Library, turn);
        }
        game.shuffle_library(player);
    }

    game.status = GameStatus::ResolveMulligans;
    for player in [PlayerName::One, PlayerName::Two] {
        library::draw_cards(&mut game, Source::Game, player, mulligan::OPENING_HAND_SIZE)?;
    }
    debug!(?id, seed, "Created new game");
    Ok(game)
}
