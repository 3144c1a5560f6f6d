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

pub mod action_handlers;
pub mod casting;
pub mod combat;
pub mod effect_execution;
pub mod game_creation;
pub mod layers;
pub mod legality;
pub mod mulligan;
pub mod mutations;
pub mod queries;
pub mod replacement;
pub mod resolve;
pub mod steps;
pub mod triggers;
