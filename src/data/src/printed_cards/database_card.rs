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

/// Raw card record as it appears in the card database.
///
/// The database is a JSON mapping from integer card number to one of these
/// records. Field names follow the common oracle-data conventions; `faces`
/// and `card_faces` are accepted interchangeably for double-faced cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseCard {
    pub name: String,

    #[serde(default)]
    pub mana_cost: Option<String>,

    #[serde(default)]
    pub type_line: String,

    #[serde(default)]
    pub oracle_text: String,

    #[serde(default)]
    pub cmc: Option<f64>,

    /// Printed power, numeric or `*`
    #[serde(default)]
    pub power: Option<String>,

    /// Printed toughness, numeric or `*`
    #[serde(default)]
    pub toughness: Option<String>,

    /// Printed starting loyalty, numeric or `X`
    #[serde(default)]
    pub loyalty: Option<String>,

    /// Color letters, e.g. `["W", "U"]`
    #[serde(default)]
    pub colors: Option<Vec<String>>,

    #[serde(default)]
    pub color_identity: Option<Vec<String>>,

    /// Faces of a double-faced or adventure card, front face first
    #[serde(default, alias = "faces")]
    pub card_faces: Option<Vec<DatabaseCardFace>>,

    /// Optional pre-split subtype list; parsed from `type_line` when absent
    #[serde(default)]
    pub subtypes: Option<Vec<String>>,

    #[serde(default)]
    pub supertypes: Option<Vec<String>>,
}

/// One face of a double-faced, adventure, or split card in the database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseCardFace {
    pub name: String,

    #[serde(default)]
    pub mana_cost: Option<String>,

    #[serde(default)]
    pub type_line: String,

    #[serde(default)]
    pub oracle_text: String,

    #[serde(default)]
    pub power: Option<String>,

    #[serde(default)]
    pub toughness: Option<String>,

    #[serde(default)]
    pub loyalty: Option<String>,

    #[serde(default)]
    pub colors: Option<Vec<String>>,
}
