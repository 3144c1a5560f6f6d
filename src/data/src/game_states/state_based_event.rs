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

use serde::{Deserialize, Serialize};

use crate::core::primitives::{CardId, PlayerName};

/// Events which have occurred since the last state-based action check and
/// which may require game mutations during the next check.
///
/// Tracking events rather than rescanning the whole battlefield keeps the
/// fixpoint loop cheap in the common case; a full sweep still runs whenever
/// any event is present.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum StateBasedEvent {
    LifeTotalDecrease(PlayerName),
    DrawFromEmptyLibrary(PlayerName),
    GainedPoisonCounters(PlayerName),
    CreatureToughnessChanged(CardId),
    CreatureDamaged(CardId),
    CreatureDamagedByDeathtouch(CardId),
    PlaneswalkerLostLoyalty(CardId),
    LegendaryPermanentEntered(CardId),
    TokenLeftBattlefield(CardId),
    AttachmentChanged(CardId),
    CountersAdded(CardId),
}
