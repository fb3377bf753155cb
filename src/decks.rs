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

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;

use crate::error::Error;
use crate::error::Fallible;
use crate::types::card::Card;

/// How many hex characters of the hash to keep for deck and card IDs.
const ID_LEN: usize = 12;

/// A validated deck of cards, loaded from a JSON file.
#[derive(Debug)]
pub struct Deck {
    pub path: PathBuf,
    pub deck_id: String,
    pub name: String,
    pub cards: Vec<Card>,
}

/// Derive a deck's ID from its resolved absolute path. The same file
/// reached through a different path is deliberately a distinct deck.
fn deck_id_for_path(path: &Path) -> Fallible<String> {
    let resolved = path.canonicalize()?;
    let digest = blake3::hash(resolved.to_string_lossy().as_bytes());
    Ok(digest.to_hex()[..ID_LEN].to_string())
}

/// Derive a card's ID from its content, so IDs are stable across loads and
/// identical cards hash identically.
fn card_id(front: &str, back: &str, tags: &[String]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(front.as_bytes());
    hasher.update(b"\n");
    hasher.update(back.as_bytes());
    for tag in tags {
        hasher.update(b"\n");
        hasher.update(tag.as_bytes());
    }
    hasher.finalize().to_hex()[..ID_LEN].to_string()
}

/// Load and validate a single deck file. All problems found in the file
/// are collected into one error report.
pub fn load_deck(path: &Path) -> Fallible<Deck> {
    let invalid = |errors: Vec<String>| Error::InvalidDeck {
        path: path.to_path_buf(),
        errors,
    };

    let text = std::fs::read_to_string(path)
        .map_err(|e| invalid(vec![format!("could not read file: {e}")]))?;
    let data: Value = serde_json::from_str(&text)
        .map_err(|e| invalid(vec![format!("invalid JSON: {e}")]))?;

    let (name, raw_cards) = match data {
        Value::Array(cards) => (None, cards),
        Value::Object(mut object) => {
            let name = match object.get("name") {
                Some(Value::String(s)) => Some(s.clone()),
                _ => None,
            };
            match object.remove("cards") {
                Some(Value::Array(cards)) => (name, cards),
                Some(_) => {
                    return Err(invalid(vec![
                        "top-level field 'cards' must be an array".to_string(),
                    ]));
                }
                None => {
                    return Err(invalid(vec![
                        "missing required top-level field 'cards' (array)".to_string(),
                    ]));
                }
            }
        }
        _ => {
            return Err(invalid(vec![
                "deck JSON must be an array of cards or an object with a 'cards' array".to_string(),
            ]));
        }
    };

    let deck_id = deck_id_for_path(path)
        .map_err(|e| invalid(vec![format!("could not resolve path: {e}")]))?;
    let name = name.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "deck".to_string())
    });

    let mut errors: Vec<String> = Vec::new();
    let mut cards: Vec<Card> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, raw) in raw_cards.iter().enumerate() {
        let Value::Object(object) = raw else {
            errors.push(format!("card {index}: must be an object"));
            continue;
        };
        if object.contains_key("id") {
            errors.push(format!(
                "card {index}: field 'id' is deprecated; card IDs are derived from content"
            ));
            continue;
        }
        let front = require_string(object, "front", index, &mut errors);
        let back = require_string(object, "back", index, &mut errors);
        let tags = match object.get("tags") {
            None => Some(Vec::new()),
            Some(Value::Array(items)) if items.iter().all(Value::is_string) => {
                let mut tags: Vec<String> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                tags.sort();
                tags.dedup();
                Some(tags)
            }
            Some(_) => {
                errors.push(format!(
                    "card {index}: field 'tags' must be a list of strings when provided"
                ));
                None
            }
        };

        if let (Some(front), Some(back), Some(tags)) = (front, back, tags) {
            if front.is_empty() {
                errors.push(format!("card {index}: field 'front' must not be empty"));
                continue;
            }
            if back.is_empty() {
                errors.push(format!("card {index}: field 'back' must not be empty"));
                continue;
            }
            let card_id = card_id(&front, &back, &tags);
            // Identical cards within a deck collapse to one.
            if seen.insert(card_id.clone()) {
                cards.push(Card::new(
                    deck_id.clone(),
                    card_id,
                    front,
                    back,
                    tags,
                    name.clone(),
                ));
            }
        }
    }

    if !errors.is_empty() {
        return Err(invalid(errors));
    }

    Ok(Deck {
        path: path.to_path_buf(),
        deck_id,
        name,
        cards,
    })
}

/// Load every deck, collecting all failures rather than stopping at the
/// first bad file.
pub fn load_decks(paths: &[PathBuf]) -> (Vec<Deck>, Vec<Error>) {
    let mut decks = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        match load_deck(path) {
            Ok(deck) => decks.push(deck),
            Err(e) => failures.push(e),
        }
    }
    (decks, failures)
}

fn require_string(
    object: &Map<String, Value>,
    field: &str,
    index: usize,
    errors: &mut Vec<String>,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("card {index}: field '{field}' must be a string"));
            None
        }
        None => {
            errors.push(format!("card {index}: missing required field '{field}'"));
            None
        }
    }
}
