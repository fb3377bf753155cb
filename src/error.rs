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

use std::path::PathBuf;

pub type Fallible<T> = Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// The state file exists but is unreadable or malformed. Fatal at
    /// startup; never silently discarded.
    #[error("{}: {message}", path.display())]
    CorruptState { path: PathBuf, message: String },
    /// A deck file failed validation. Carries every problem found in the
    /// file, not just the first.
    #[error("{}:\n{}", path.display(), errors.iter().map(|e| format!("- {e}")).collect::<Vec<_>>().join("\n"))]
    InvalidDeck { path: PathBuf, errors: Vec<String> },
    /// Two decks produced the same card key. Configuration error, fatal at
    /// startup.
    #[error("duplicate card key '{key}' across decks")]
    DuplicateCardKey { key: String },
    /// A rating outside the four levels reached the boundary. Caller bug.
    #[error("unknown rating '{0}' (expected again, hard, good, or easy)")]
    InvalidRating(String),
}

#[cfg(test)]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Io(std::io::Error::other(e))
    }
}
