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

use std::sync::Arc;
use std::sync::Mutex;

use crate::catalog::Catalog;
use crate::store::StateStore;

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<Catalog>,
    pub mutable: Arc<Mutex<MutableState>>,
}

pub struct MutableState {
    /// Whether the back of the current card is showing.
    pub reveal: bool,
    pub store: StateStore,
    /// Cards rated this run. Session-local, reset every process start,
    /// never persisted.
    pub done_count: usize,
}
