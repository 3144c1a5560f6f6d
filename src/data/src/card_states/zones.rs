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
use std::sync::Arc;

use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::card_states::card_state::{CardFacing, CardKind, CardState, TappedState};
use crate::card_states::counters::Counters;
use crate::card_states::stack_ability_state::StackAbilityState;
use crate::core::primitives::{
    CardId, CardNumber, HasCardId, HasPlayerName, ObjectId, PlayerName, StackAbilityId,
    StackItemId, Zone,
};
use crate::game_states::game_state::TurnData;
use crate::player_states::player_map::PlayerMap;
use crate::printed_cards::printed_card::PrintedCard;

/// Lookup operations over the card arena, implemented by [Zones] and
/// forwarded by the game state.
pub trait ZoneQueries {
    /// Looks up the state for a card. Returns `None` if the ID is no longer
    /// valid, e.g. for a token which has ceased to exist.
    fn card(&self, id: impl HasCardId) -> Option<&CardState>;

    /// Mutable equivalent of [Self::card]
    fn card_mut(&mut self, id: impl HasCardId) -> Option<&mut CardState>;

    fn stack_ability(&self, id: StackAbilityId) -> Option<&StackAbilityState>;

    fn stack_ability_mut(&mut self, id: StackAbilityId) -> Option<&mut StackAbilityState>;

    /// A player's library. The back of the deque is the top of the library.
    fn library(&self, player: impl HasPlayerName) -> &VecDeque<CardId>;

    fn hand(&self, player: impl HasPlayerName) -> &BTreeSet<CardId>;

    /// A player's graveyard. The back of the deque is the top (most recently
    /// placed) card.
    fn graveyard(&self, player: impl HasPlayerName) -> &VecDeque<CardId>;

    /// Cards on the battlefield controlled by this player
    fn battlefield(&self, player: impl HasPlayerName) -> &BTreeSet<CardId>;

    fn exile(&self, player: impl HasPlayerName) -> &BTreeSet<CardId>;

    /// The shared stack. The last element is the top of the stack.
    fn stack(&self) -> &[StackItemId];
}

/// Stores the state & position of all cards and card-like objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Zones {
    all_cards: SlotMap<CardId, CardState>,

    stack_abilities: SlotMap<StackAbilityId, StackAbilityState>,

    libraries: PlayerMap<VecDeque<CardId>>,
    hands: PlayerMap<BTreeSet<CardId>>,
    graveyards: PlayerMap<VecDeque<CardId>>,
    battlefields: PlayerMap<BTreeSet<CardId>>,
    exiles: PlayerMap<BTreeSet<CardId>>,

    stack: Vec<StackItemId>,

    /// Next object id to use for zone moves.
    next_object_id: ObjectId,
}

impl ZoneQueries for Zones {
    fn card(&self, id: impl HasCardId) -> Option<&CardState> {
        self.all_cards.get(id.card_id())
    }

    fn card_mut(&mut self, id: impl HasCardId) -> Option<&mut CardState> {
        self.all_cards.get_mut(id.card_id())
    }

    fn stack_ability(&self, id: StackAbilityId) -> Option<&StackAbilityState> {
        self.stack_abilities.get(id)
    }

    fn stack_ability_mut(&mut self, id: StackAbilityId) -> Option<&mut StackAbilityState> {
        self.stack_abilities.get_mut(id)
    }

    fn library(&self, player: impl HasPlayerName) -> &VecDeque<CardId> {
        self.libraries.get(player.player_name())
    }

    fn hand(&self, player: impl HasPlayerName) -> &BTreeSet<CardId> {
        self.hands.get(player.player_name())
    }

    fn graveyard(&self, player: impl HasPlayerName) -> &VecDeque<CardId> {
        self.graveyards.get(player.player_name())
    }

    fn battlefield(&self, player: impl HasPlayerName) -> &BTreeSet<CardId> {
        self.battlefields.get(player.player_name())
    }

    fn exile(&self, player: impl HasPlayerName) -> &BTreeSet<CardId> {
        self.exiles.get(player.player_name())
    }

    fn stack(&self) -> &[StackItemId] {
        &self.stack
    }
}

impl Zones {
    /// Creates a new card owned by the `owner` player in the given `zone`.
    ///
    /// The card is assigned a [CardId] and [ObjectId] on creation.
    pub fn create_card(
        &mut self,
        number: CardNumber,
        printed: Arc<PrintedCard>,
        kind: CardKind,
        owner: PlayerName,
        zone: Zone,
        turn: TurnData,
    ) -> CardId {
        let object_id = self.new_object_id();
        let facing = if zone.is_public() { CardFacing::FaceUp(0) } else { CardFacing::FaceDown };
        let id = self.all_cards.insert(CardState {
            id: CardId::default(),
            object_id,
            card_number: number,
            kind,
            owner,
            controller: owner,
            zone,
            facing,
            tapped_state: TappedState::Untapped,
            damage: 0,
            damaged_by_deathtouch: false,
            counters: Counters::default(),
            attached_to: None,
            attachments: vec![],
            targets: vec![],
            chosen_modes: vec![],
            chosen_x: None,
            entered_current_zone: turn,
            class_level: 1,
            unlocked_doors: vec![],
            loyalty_activated_this_turn: false,
            derived: None,
            printed_card_reference: Some(printed),
        });
        self.all_cards[id].id = id;
        self.add_to_zone_index(id, owner, zone);
        id
    }

    /// Moves a card to a new zone, updating indices and assigning a new
    /// [ObjectId].
    ///
    /// The card is added as the top card of the target zone if it is
    /// ordered. Zone-change state resets are the caller's responsibility.
    pub fn move_card(&mut self, id: CardId, zone: Zone, turn: TurnData) {
        let object_id = self.new_object_id();
        let Some(card) = self.all_cards.get(id) else {
            return;
        };
        let old_zone = card.zone;
        let owner = card.owner;
        self.remove_from_zone_index(id, owner, old_zone);
        let card = &mut self.all_cards[id];
        card.zone = zone;
        card.object_id = object_id;
        card.entered_current_zone = turn;
        if zone != Zone::Battlefield && zone != Zone::Stack {
            card.controller = owner;
        }
        self.add_to_zone_index(id, owner, zone);
    }

    /// Permanently removes a card from the game, e.g. a token which has
    /// ceased to exist.
    pub fn destroy_card(&mut self, id: CardId) {
        if let Some(card) = self.all_cards.get(id) {
            let owner = card.owner;
            let zone = card.zone;
            self.remove_from_zone_index(id, owner, zone);
            self.all_cards.remove(id);
        }
    }

    /// Records a change of controller for a battlefield card, moving it
    /// between battlefield indices.
    pub fn set_battlefield_controller(&mut self, id: CardId, controller: PlayerName) {
        if let Some(card) = self.all_cards.get_mut(id) {
            card.controller = controller;
            for battlefield in self.battlefields.values_mut() {
                battlefield.remove(&id);
            }
            self.battlefields.get_mut(controller).insert(id);
        }
    }

    /// Iterator over all cards in the arena.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardState> {
        self.all_cards.values()
    }

    pub fn all_cards_mut(&mut self) -> impl Iterator<Item = &mut CardState> {
        self.all_cards.values_mut()
    }

    /// Iterator over all cards on either battlefield.
    pub fn all_battlefield_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.battlefields.values().flat_map(|battlefield| battlefield.iter().copied())
    }

    /// Finds the card currently holding the given object id, if it still
    /// exists.
    pub fn find_object(&self, object_id: ObjectId) -> Option<&CardState> {
        self.all_cards.values().find(|card| card.object_id == object_id)
    }

    pub fn shuffle_library(&mut self, player: PlayerName, rng: &mut impl Rng) {
        let library = self.libraries.get_mut(player);
        let mut cards: Vec<CardId> = library.iter().copied().collect();
        cards.shuffle(rng);
        *library = cards.into();
    }

    /// Registers a new ability on the stack.
    pub fn push_stack_ability(&mut self, mut ability: StackAbilityState) -> StackAbilityId {
        let id = self.stack_abilities.insert_with_key(|key| {
            ability.id = key;
            ability
        });
        self.stack.push(StackItemId::Ability(id));
        id
    }

    /// Removes a resolved or countered ability from the stack.
    pub fn remove_stack_ability(&mut self, id: StackAbilityId) {
        self.stack.retain(|item| *item != StackItemId::Ability(id));
        self.stack_abilities.remove(id);
    }

    /// Removes an arbitrary item from the stack without resolving it.
    pub fn remove_stack_item(&mut self, item: StackItemId) {
        self.stack.retain(|existing| *existing != item);
        if let StackItemId::Ability(id) = item {
            self.stack_abilities.remove(id);
        }
    }

    fn add_to_zone_index(&mut self, id: CardId, owner: PlayerName, zone: Zone) {
        match zone {
            Zone::Library => self.libraries.get_mut(owner).push_back(id),
            Zone::Hand => {
                self.hands.get_mut(owner).insert(id);
            }
            Zone::Graveyard => self.graveyards.get_mut(owner).push_back(id),
            Zone::Battlefield => {
                let controller = self.all_cards[id].controller;
                self.battlefields.get_mut(controller).insert(id);
            }
            Zone::Exiled => {
                self.exiles.get_mut(owner).insert(id);
            }
            Zone::Stack => self.stack.push(StackItemId::Card(id)),
        }
    }

    fn remove_from_zone_index(&mut self, id: CardId, owner: PlayerName, zone: Zone) {
        match zone {
            Zone::Library => self.libraries.get_mut(owner).retain(|card| *card != id),
            Zone::Hand => {
                self.hands.get_mut(owner).remove(&id);
            }
            Zone::Graveyard => self.graveyards.get_mut(owner).retain(|card| *card != id),
            Zone::Battlefield => {
                for battlefield in self.battlefields.values_mut() {
                    battlefield.remove(&id);
                }
            }
            Zone::Exiled => {
                self.exiles.get_mut(owner).remove(&id);
            }
            Zone::Stack => self.stack.retain(|item| *item != StackItemId::Card(id)),
        }
    }

    /// Places a card in a specific position within its owner's library.
    ///
    /// Position 0 is the bottom of the library.
    pub fn move_card_to_library_position(
        &mut self,
        id: CardId,
        position: usize,
        turn: TurnData,
    ) {
        self.move_card(id, Zone::Library, turn);
        let Some(card) = self.all_cards.get(id) else {
            return;
        };
        let owner = card.owner;
        let library = self.libraries.get_mut(owner);
        library.pop_back();
        let position = position.min(library.len());
        library.insert(position, id);
    }

    fn new_object_id(&mut self) -> ObjectId {
        let result = self.next_object_id;
        self.next_object_id = ObjectId(result.0 + 1);
        result
    }
}
