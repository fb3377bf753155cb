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

use chrono::Local;
use chrono::LocalResult;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A unix timestamp in whole seconds. The scheduling core never reads the
/// clock itself; `now` is always supplied by the caller.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[cfg(test)]
    pub fn new(secs: i64) -> Self {
        Self(secs)
    }

    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn as_secs(self) -> i64 {
        self.0
    }

    pub fn plus_seconds(self, secs: i64) -> Self {
        Self(self.0 + secs)
    }

    pub fn seconds_since(self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }

    /// Render in the local timezone, e.g. `2026-08-28 03:15 PM`.
    pub fn local_string(self) -> String {
        match Local.timestamp_opt(self.0, 0) {
            LocalResult::Single(ts) => ts.format("%Y-%m-%d %I:%M %p").to_string(),
            _ => format!("t+{}s", self.as_secs()),
        }
    }
}
