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

use crate::core::numerics::{Loyalty, Power, Toughness};

/// A printed power value, which may be numeric or `*`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PrintedPower {
    Fixed(Power),
    /// `*` or `*+1` style power, defined by a characteristic-defining ability
    Variable,
}

impl PrintedPower {
    pub fn base_value(&self) -> Power {
        match self {
            PrintedPower::Fixed(power) => *power,
            PrintedPower::Variable => 0,
        }
    }
}

/// A printed toughness value, which may be numeric or `*`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PrintedToughness {
    Fixed(Toughness),
    Variable,
}

impl PrintedToughness {
    pub fn base_value(&self) -> Toughness {
        match self {
            PrintedToughness::Fixed(toughness) => *toughness,
            PrintedToughness::Variable => 0,
        }
    }
}

/// A printed starting loyalty, which may be numeric or `X`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PrintedLoyalty {
    Fixed(Loyalty),
    Variable,
}

impl PrintedLoyalty {
    pub fn base_value(&self) -> Loyalty {
        match self {
            PrintedLoyalty::Fixed(loyalty) => *loyalty,
            PrintedLoyalty::Variable => 0,
        }
    }
}
