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

use std::collections::HashMap;
use std::sync::Arc;

use data::core::primitives::CardNumber;
use data::printed_cards::database_card::DatabaseCard;
use data::printed_cards::printed_card::PrintedCard;
use utils::outcome::Value;
use utils::with_error::WithError;

use crate::card_parser;

/// Source of printed card definitions.
///
/// The engine consumes cards exclusively through this trait, so the
/// heuristic text parser behind [JsonCardDatabase] can later be replaced by
/// a structured card-data format without touching the rules code.
pub trait CardSource {
    /// Looks up the parsed card for a card number.
    fn printed(&self, number: CardNumber) -> Option<Arc<PrintedCard>>;

    /// True if the number refers to a basic land, which is exempt from the
    /// deck-building copy limit.
    fn is_basic_land(&self, number: CardNumber) -> bool {
        self.printed(number).is_some_and(|card| card.front().is_basic() && card.front().is_land())
    }

    /// All card numbers this source can provide.
    fn all_numbers(&self) -> Vec<CardNumber>;
}

/// Card database backed by a JSON mapping from integer card number to a raw
/// card record.
///
/// All records are parsed once at load time; lookups hand out shared
/// references to the parsed cards.
#[derive(Debug, Clone, Default)]
pub struct JsonCardDatabase {
    cards: HashMap<CardNumber, Arc<PrintedCard>>,
}

impl JsonCardDatabase {
    /// Builds a database from a JSON object `{ "17": { "name": ... }, ... }`.
    pub fn from_json_str(json: &str) -> Value<Self> {
        let records: HashMap<String, DatabaseCard> =
            serde_json::from_str(json).with_error(|| "Error deserializing card database".into())?;
        let mut by_number = HashMap::new();
        for (key, record) in records {
            let number = CardNumber(
                key.parse().with_error(|| format!("Non-integer card number {key:?}"))?,
            );
            by_number.insert(number, record);
        }
        Self::from_records(by_number)
    }

    /// Builds a database from already-deserialized records.
    pub fn from_records(records: HashMap<CardNumber, DatabaseCard>) -> Value<Self> {
        let mut cards = HashMap::new();
        for (number, record) in records {
            let printed = card_parser::parse(number, &record)?;
            cards.insert(number, Arc::new(printed));
        }
        Ok(Self { cards })
    }
}

impl CardSource for JsonCardDatabase {
    fn printed(&self, number: CardNumber) -> Option<Arc<PrintedCard>> {
        self.cards.get(&number).cloned()
    }

    fn all_numbers(&self) -> Vec<CardNumber> {
        let mut numbers: Vec<CardNumber> = self.cards.keys().copied().collect();
        numbers.sort();
        numbers
    }
}
