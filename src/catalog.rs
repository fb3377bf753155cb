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

use std::collections::HashMap;

use crate::decks::Deck;
use crate::error::Error;
use crate::error::Fallible;
use crate::types::card::Card;

/// An immutable, in-memory view of every loaded deck's cards, keyed by the
/// globally unique card key.
///
/// Card order is deck order, then card order within the deck; selection
/// tie-breaks depend on it.
pub struct Catalog {
    cards: Vec<Card>,
    index: HashMap<String, usize>,
    deck_count: usize,
}

impl Catalog {
    /// Flatten the decks into a catalog, rejecting duplicate card keys
    /// across the whole run.
    pub fn new(decks: Vec<Deck>) -> Fallible<Self> {
        let deck_count = decks.len();
        let mut cards = Vec::new();
        let mut index = HashMap::new();
        for deck in decks {
            for card in deck.cards {
                let key = card.key();
                if index.contains_key(&key) {
                    return Err(Error::DuplicateCardKey { key });
                }
                index.insert(key, cards.len());
                cards.push(card);
            }
        }
        Ok(Self {
            cards,
            index,
            deck_count,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Card> {
        self.index.get(key).map(|&i| &self.cards[i])
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn deck_count(&self) -> usize {
        self.deck_count
    }
}
