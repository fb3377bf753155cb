// Copyright 2026 the recall authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// The scheduling record for a card that has been rated at least once.
///
/// A record exists for a card key if and only if the card has been rated;
/// a new card is represented by the absence of a record, never by a
/// zero-valued one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// When the card next comes up for review.
    pub due: Timestamp,
    /// The current review interval in days.
    pub interval_days: f64,
    /// The SM-2 ease factor. Starts at the baseline and never drops below
    /// the configured minimum.
    pub ease_factor: f64,
    /// The number of successful reviews in a row.
    pub repetitions: u32,
}
