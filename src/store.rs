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

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::error::Fallible;
use crate::types::record::CardRecord;
use crate::types::timestamp::Timestamp;

/// The state file schema version this build reads and writes.
const SCHEMA_VERSION: u32 = 1;

/// The durable mapping from card key to scheduling record, backed by a
/// single JSON state file.
///
/// Single-writer model: one process owns the file. `get` and `put` touch
/// only the in-memory map; `save` persists the whole store.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    records: BTreeMap<String, CardRecord>,
}

#[derive(Serialize, Deserialize)]
struct StateFile {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<Timestamp>,
    #[serde(default)]
    records: BTreeMap<String, CardRecord>,
}

impl StateStore {
    /// Load the store from `path`. A missing file is an empty store, not an
    /// error. A file that exists but is unreadable or does not match the
    /// expected shape is a `CorruptState` error carrying the path.
    pub fn load(path: &Path) -> Fallible<Self> {
        let corrupt = |message: String| Error::CorruptState {
            path: path.to_path_buf(),
            message,
        };

        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                records: BTreeMap::new(),
            });
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| corrupt(format!("could not read state file: {e}")))?;
        let file: StateFile =
            serde_json::from_str(&text).map_err(|e| corrupt(format!("invalid state file: {e}")))?;
        if file.version != SCHEMA_VERSION {
            return Err(corrupt(format!(
                "unknown schema version {} (expected {SCHEMA_VERSION})",
                file.version
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            records: file.records,
        })
    }

    pub fn get(&self, key: &str) -> Option<&CardRecord> {
        self.records.get(key)
    }

    /// Update the in-memory store. Does not persist; call `save`.
    pub fn put(&mut self, key: String, record: CardRecord) {
        self.records.insert(key, record);
    }

    /// Remove a card's record, returning it if one existed. Not reachable
    /// from the UI yet; a forget-card action needs to delete records
    /// cleanly rather than zero them out.
    #[allow(dead_code)]
    pub fn remove(&mut self, key: &str) -> Option<CardRecord> {
        self.records.remove(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full store durably.
    ///
    /// The serialized content goes to a temporary file in the same
    /// directory, is flushed and fsynced, and is then atomically renamed
    /// onto the target path. A crash at any point before the rename leaves
    /// the previous state file intact; no partial write is ever observable.
    pub fn save(&self, now: Timestamp) -> Fallible<()> {
        let payload = StateFile {
            version: SCHEMA_VERSION,
            updated_at: Some(now),
            records: self.records.clone(),
        };
        let mut text = serde_json::to_string_pretty(&payload)?;
        text.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = temp_path(&self.path);
        let result = write_and_replace(&tmp_path, &self.path, text.as_bytes());
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp_path);
        }
        result
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_and_replace(tmp_path: &Path, path: &Path, bytes: &[u8]) -> Fallible<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(tmp_path, path)?;
    Ok(())
}
