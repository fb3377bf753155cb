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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::drill::state::ServerState;
use crate::error::Fallible;
use crate::select::select_next;
use crate::sm2::Rating;
use crate::sm2::apply_rating;
use crate::types::timestamp::Timestamp;

#[derive(Deserialize)]
pub struct FormData {
    action: String,
    card_key: Option<String>,
}

pub async fn post_handler(State(state): State<ServerState>, Form(form): Form<FormData>) -> Redirect {
    match action_handler(state, &form) {
        Ok(()) => {}
        Err(e) => {
            log::error!("error: {e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: ServerState, form: &FormData) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();

    if form.action == "reveal" {
        if mutable.reveal {
            log::error!("Revealing a card that is already revealed.");
        } else {
            mutable.reveal = true;
        }
        return Ok(());
    }

    let rating = Rating::parse(&form.action)?;
    if !mutable.reveal {
        log::error!("Rating a card that is not revealed.");
        return Ok(());
    }

    let now = Timestamp::now();
    let selection = select_next(&state.catalog, &mutable.store, now);
    let Some(card) = selection.card else {
        log::error!("Rating with no card available.");
        return Ok(());
    };

    let key = card.key();
    // Guard against a stale submission for a card that is no longer
    // current.
    let posted_key = form.card_key.as_deref().unwrap_or("");
    if state.catalog.get(posted_key).is_none() || posted_key != key {
        log::error!("Rating a card that is not the current one.");
        return Ok(());
    }
    let record = apply_rating(mutable.store.get(&key), rating, now);
    log::debug!(
        "{key} {} interval={:.1}d ease={:.2} reps={}",
        rating.as_str(),
        record.interval_days,
        record.ease_factor,
        record.repetitions
    );
    mutable.store.put(key, record);
    mutable.store.save(now)?;
    mutable.done_count += 1;
    mutable.reveal = false;
    Ok(())
}
