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

/// Kinds of counters that can be placed on a permanent.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum CounterKind {
    PlusOnePlusOne,
    MinusOneMinusOne,
    Loyalty,
    /// Saga chapter progress
    Lore,
    Charge,
    /// Class level progress
    Level,
    Stun,
}

/// Counters currently on a card.
///
/// A card that is not on the battlefield typically has no counters; moving a
/// card off the battlefield clears them.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    counts: BTreeMap<CounterKind, u64>,
}

impl Counters {
    pub fn count(&self, kind: CounterKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    pub fn add(&mut self, kind: CounterKind, count: u64) {
        if count > 0 {
            *self.counts.entry(kind).or_default() += count;
        }
    }

    /// Removes up to `count` counters, returning the number actually removed.
    pub fn remove(&mut self, kind: CounterKind, count: u64) -> u64 {
        let current = self.count(kind);
        let removed = current.min(count);
        if current == removed {
            self.counts.remove(&kind);
        } else {
            self.counts.insert(kind, current - removed);
        }
        removed
    }

    pub fn set(&mut self, kind: CounterKind, count: u64) {
        if count == 0 {
            self.counts.remove(&kind);
        } else {
            self.counts.insert(kind, count);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (CounterKind, u64)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Removes +1/+1 and -1/-1 counters in pairs, returning true if any were
    /// removed.
    ///
    /// See <https://yawgatog.com/resources/magic-rules/#R7045q>
    pub fn annihilate_pt_pairs(&mut self) -> bool {
        let plus = self.count(CounterKind::PlusOnePlusOne);
        let minus = self.count(CounterKind::MinusOneMinusOne);
        let pairs = plus.min(minus);
        if pairs == 0 {
            return false;
        }
        self.set(CounterKind::PlusOnePlusOne, plus - pairs);
        self.set(CounterKind::MinusOneMinusOne, minus - pairs);
        true
    }
}
