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

use enum_iterator::Sequence;
use enumset::EnumSetType;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::primitives::Color;
use crate::printed_cards::card_subtypes::LandType;

/// Keyword abilities a card can carry, either printed or granted by a
/// continuous effect.
///
/// Covers the evergreen keywords plus the named mechanics the oracle-text
/// scanner recognizes. Parameterized keywords (ward costs, protection
/// choices, landwalk land types) additionally record their parameters in
/// side structures on the printed face.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Sequence, Display)]
#[enumset(repr = "array")]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Flying,
    Trample,
    Hexproof,
    Lifelink,
    Deathtouch,
    #[strum(serialize = "first strike")]
    FirstStrike,
    #[strum(serialize = "double strike")]
    DoubleStrike,
    Vigilance,
    Flash,
    Haste,
    Menace,
    Reach,
    Defender,
    Indestructible,
    Protection,
    Ward,
    Prowess,
    Scry,
    Cascade,
    Unblockable,
    Shroud,
    Regenerate,
    Persist,
    Undying,
    Riot,
    Enrage,
    Afflict,
    Exalted,
    Mentor,
    Convoke,
    Absorb,
    Affinity,
    Afterlife,
    Amplify,
    Annihilator,
    Ascend,
    Assist,
    #[strum(serialize = "aura swap")]
    AuraSwap,
    Awaken,
    #[strum(serialize = "battle cry")]
    BattleCry,
    Bestow,
    Blitz,
    Bloodthirst,
    Boast,
    Bushido,
    Buyback,
    Casualty,
    Champion,
    Changeling,
    Cipher,
    Cleave,
    Companion,
    Compleated,
    Conspire,
    Crew,
    Cycling,
    Dash,
    Daybound,
    Nightbound,
    Decayed,
    Delve,
    Demonstrate,
    Devoid,
    Devour,
    Disturb,
    Dredge,
    Echo,
    Embalm,
    Emerge,
    Enchant,
    Encore,
    Entwine,
    Epic,
    Equip,
    Escape,
    Eternalize,
    Evoke,
    Evolve,
    Exploit,
    Extort,
    Fabricate,
    Fading,
    Fear,
    Flanking,
    Flashback,
    Forecast,
    Foretell,
    Fortify,
    Frenzy,
    #[strum(serialize = "friends forever")]
    FriendsForever,
    Fuse,
    Graft,
    Gravestorm,
    Haunt,
    #[strum(serialize = "hidden agenda")]
    HiddenAgenda,
    Hideaway,
    Horsemanship,
    Improvise,
    Infect,
    Ingest,
    Intimidate,
    #[strum(serialize = "jump-start")]
    JumpStart,
    Kicker,
    Landwalk,
    #[strum(serialize = "level up")]
    LevelUp,
    #[strum(serialize = "living weapon")]
    LivingWeapon,
    Madness,
    Melee,
    Miracle,
    Modular,
    Morph,
    Mutate,
    Myriad,
    Ninjutsu,
    Offering,
    Outlast,
    Overload,
    Partner,
    Phasing,
    Poisonous,
    Provoke,
    Prowl,
    Rampage,
    Rebound,
    Reconfigure,
    Recover,
    Reinforce,
    Renown,
    Replicate,
    Retrace,
    Ripple,
    Scavenge,
    Shadow,
    Skulk,
    Soulbond,
    Soulshift,
    Spectacle,
    Splice,
    #[strum(serialize = "split second")]
    SplitSecond,
    Storm,
    Sunburst,
    Surge,
    Suspend,
    #[strum(serialize = "totem armor")]
    TotemArmor,
    Training,
    Transfigure,
    Transmute,
    Tribute,
    Undaunted,
    Unearth,
    Unleash,
    Vanishing,
    Wither,
    #[strum(serialize = "cumulative upkeep")]
    CumulativeUpkeep,
    Banding,
    Aftermath,
    Spree,
}

/// What a 'protection from ...' grant protects against.
///
/// See <https://yawgatog.com/resources/magic-rules/#R7022>
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ProtectionFrom {
    Color(Color),
    AllColors,
    Creatures,
    Everything,
}

/// Parameterized grants attached to keywords on a printed face or derived
/// characteristics.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeywordGrants {
    /// Choices for 'protection from ...'
    pub protections: Vec<ProtectionFrom>,

    /// Generic mana cost for 'ward {n}'
    pub ward_cost: Option<u64>,

    /// Land types for landwalk variants ('islandwalk', 'swampwalk', ...)
    pub landwalks: Vec<LandType>,
}

impl KeywordGrants {
    pub fn is_empty(&self) -> bool {
        self.protections.is_empty() && self.ward_cost.is_none() && self.landwalks.is_empty()
    }

    /// Merges another grant set into this one, taking the larger ward cost.
    pub fn merge(&mut self, other: &KeywordGrants) {
        for protection in &other.protections {
            if !self.protections.contains(protection) {
                self.protections.push(*protection);
            }
        }
        if let Some(ward) = other.ward_cost {
            self.ward_cost = Some(self.ward_cost.map_or(ward, |w| w.max(ward)));
        }
        for walk in &other.landwalks {
            if !self.landwalks.contains(walk) {
                self.landwalks.push(*walk);
            }
        }
    }
}
