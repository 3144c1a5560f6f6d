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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::primitives::CardNumber;

/// Minimum number of cards in a legal deck.
pub const MINIMUM_DECK_SIZE: usize = 60;

/// Maximum number of copies of a non-basic card.
pub const MAXIMUM_COPIES: usize = 4;

/// A deck list: card numbers with multiplicity, in no particular order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,

    /// Card numbers making up the deck; a card appearing N times is played
    /// with N copies.
    pub cards: Vec<CardNumber>,
}

/// Ways in which a deck can fail validation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DeckError {
    /// The deck contains fewer than [MINIMUM_DECK_SIZE] cards.
    TooFewCards { count: usize },

    /// A non-basic card appears more than [MAXIMUM_COPIES] times.
    TooManyCopies { number: CardNumber, count: usize },
}

impl Deck {
    pub fn new(name: impl Into<String>, cards: Vec<CardNumber>) -> Self {
        Self { name: name.into(), cards }
    }

    /// Validates deck construction rules.
    ///
    /// `is_basic` reports whether a card number is a basic land, which is
    /// exempt from the copy limit.
    pub fn validate(&self, is_basic: impl Fn(CardNumber) -> bool) -> Result<(), DeckError> {
        if self.cards.len() < MINIMUM_DECK_SIZE {
            return Err(DeckError::TooFewCards { count: self.cards.len() });
        }

        let mut counts: BTreeMap<CardNumber, usize> = BTreeMap::new();
        for number in &self.cards {
            *counts.entry(*number).or_default() += 1;
        }
        for (number, count) in counts {
            if count > MAXIMUM_COPIES && !is_basic(number) {
                return Err(DeckError::TooManyCopies { number, count });
            }
        }
        Ok(())
    }
}
