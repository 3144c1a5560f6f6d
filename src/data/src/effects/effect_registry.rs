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

use crate::core::primitives::{CardId, Timestamp};
use crate::effects::continuous_effect::{ContinuousEffect, EffectDuration, EffectId, EffectLayer};
use crate::effects::replacement::ReplacementEffect;
use crate::events::game_event::GameEventKind;

/// Owns all registered continuous and replacement effects for a game.
///
/// Registration assigns each effect a unique [EffectId] and a monotonically
/// increasing [Timestamp] used for intra-layer ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectRegistry {
    effects: Vec<ContinuousEffect>,

    replacements: Vec<ReplacementEffect>,

    next_effect_id: u64,

    next_timestamp: u64,

    /// Cache key of the most recent layer application; `None` forces a
    /// recalculation.
    pub last_applied_cache_key: Option<u64>,
}

impl EffectRegistry {
    /// Registers a continuous effect, assigning its id and timestamp.
    pub fn register(&mut self, mut effect: ContinuousEffect) -> EffectId {
        let id = self.allocate_id();
        effect.id = id;
        effect.timestamp = Timestamp(self.next_timestamp);
        self.next_timestamp += 1;
        self.effects.push(effect);
        self.invalidate_cache();
        id
    }

    /// Registers a replacement effect, assigning its id and timestamp.
    pub fn register_replacement(&mut self, mut effect: ReplacementEffect) -> EffectId {
        let id = self.allocate_id();
        effect.id = id;
        effect.timestamp = Timestamp(self.next_timestamp);
        self.next_timestamp += 1;
        self.replacements.push(effect);
        id
    }

    pub fn remove(&mut self, id: EffectId) {
        self.effects.retain(|effect| effect.id != id);
        self.replacements.retain(|effect| effect.id != id);
        self.invalidate_cache();
    }

    /// Removes every continuous and replacement effect generated by the
    /// given source card.
    pub fn remove_by_source(&mut self, source: CardId) {
        self.effects.retain(|effect| effect.source != source);
        self.replacements.retain(|effect| effect.source != source);
        self.invalidate_cache();
    }

    /// Removes effects matching a duration predicate, e.g. all end-of-turn
    /// effects during cleanup.
    pub fn remove_matching(&mut self, predicate: impl Fn(&EffectDuration) -> bool) {
        self.effects.retain(|effect| !predicate(&effect.duration));
        self.invalidate_cache();
    }

    /// All continuous effects in the given layer, in timestamp order.
    pub fn effects_in_layer(&self, layer: EffectLayer) -> Vec<&ContinuousEffect> {
        let mut result: Vec<&ContinuousEffect> =
            self.effects.iter().filter(|effect| effect.layer == layer).collect();
        result.sort_by_key(|effect| effect.timestamp);
        result
    }

    pub fn effects(&self) -> &[ContinuousEffect] {
        &self.effects
    }

    /// Replacement effects intercepting the given event kind, in timestamp
    /// order.
    pub fn replacements_for(&self, kind: GameEventKind) -> Vec<&ReplacementEffect> {
        let mut result: Vec<&ReplacementEffect> =
            self.replacements.iter().filter(|effect| effect.event_kind == kind).collect();
        result.sort_by_key(|effect| effect.timestamp);
        result
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Forces the next layer application to recalculate from scratch.
    pub fn invalidate_cache(&mut self) {
        self.last_applied_cache_key = None;
    }

    fn allocate_id(&mut self) -> EffectId {
        let id = EffectId(self.next_effect_id);
        self.next_effect_id += 1;
        id
    }
}
