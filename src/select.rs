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

use crate::catalog::Catalog;
use crate::store::StateStore;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// The outcome of picking the next card to study.
#[derive(Clone, Debug)]
pub struct Selection {
    /// The card to present, if any is available.
    pub card: Option<Card>,
    pub due_count: usize,
    pub new_count: usize,
    pub total_count: usize,
    /// When no card is available, the earliest future due time across all
    /// records, if any.
    pub next_due: Option<Timestamp>,
}

/// Pick the next card to study.
///
/// Due cards strictly precede new cards: existing material is reinforced
/// before more is introduced. Among due cards the earliest `due` wins,
/// ties broken by catalog order; among new cards, catalog order. The
/// result is deterministic for identical inputs.
pub fn select_next(catalog: &Catalog, store: &StateStore, now: Timestamp) -> Selection {
    let mut best_due: Option<(Timestamp, usize)> = None;
    let mut first_new: Option<usize> = None;
    let mut next_due: Option<Timestamp> = None;
    let mut due_count = 0;
    let mut new_count = 0;

    for (index, card) in catalog.iter().enumerate() {
        match store.get(&card.key()) {
            None => {
                new_count += 1;
                if first_new.is_none() {
                    first_new = Some(index);
                }
            }
            Some(record) if record.due <= now => {
                due_count += 1;
                let candidate = (record.due, index);
                if best_due.is_none_or(|best| candidate < best) {
                    best_due = Some(candidate);
                }
            }
            Some(record) => {
                if next_due.is_none_or(|earliest| record.due < earliest) {
                    next_due = Some(record.due);
                }
            }
        }
    }

    let chosen = best_due.map(|(_, index)| index).or(first_new);
    let card = chosen.map(|index| catalog.cards()[index].clone());
    let next_due = if card.is_some() { None } else { next_due };
    Selection {
        card,
        due_count,
        new_count,
        total_count: catalog.card_count(),
        next_due,
    }
}
