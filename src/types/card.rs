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

/// A flashcard. Created once at deck load time and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// The ID of the deck this card belongs to, derived from the deck
    /// file's resolved absolute path.
    deck_id: String,
    /// The card's ID, unique within its deck.
    card_id: String,
    /// The front (question) text.
    front: String,
    /// The back (answer) text.
    back: String,
    /// The card's tags, sorted and deduplicated. May be empty.
    tags: Vec<String>,
    /// The human-readable name of the deck.
    deck_name: String,
}

impl Card {
    pub fn new(
        deck_id: String,
        card_id: String,
        front: String,
        back: String,
        tags: Vec<String>,
        deck_name: String,
    ) -> Self {
        Self {
            deck_id,
            card_id,
            front,
            back,
            tags,
            deck_name,
        }
    }

    /// The card's globally unique key, the sole join key between the
    /// catalog and the state store.
    pub fn key(&self) -> String {
        format!("{}:{}", self.deck_id, self.card_id)
    }

    #[allow(dead_code)]
    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }
}
