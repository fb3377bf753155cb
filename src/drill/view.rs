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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::drill::state::ServerState;
use crate::drill::template::page_template;
use crate::select::Selection;
use crate::select::select_next;
use crate::sm2::Rating;
use crate::sm2::apply_rating;
use crate::types::card::Card;
use crate::types::record::CardRecord;
use crate::types::timestamp::Timestamp;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let now = Timestamp::now();
    let mutable = state.mutable.lock().unwrap();
    let selection = select_next(&state.catalog, &mutable.store, now);
    let body = match &selection.card {
        None => empty_view(&selection, mutable.done_count),
        Some(card) => {
            if mutable.reveal {
                let previews = rating_previews(mutable.store.get(&card.key()), now);
                revealed_view(card, &selection, mutable.done_count, &previews)
            } else {
                front_view(card, &selection, mutable.done_count)
            }
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn counts_line(selection: &Selection, done_count: usize) -> Markup {
    html! {
        div.counts {
            span { (selection.due_count) " due" }
            " · "
            span { (selection.new_count) " new" }
            " · "
            span { (done_count) " done" }
            " · "
            span { (selection.total_count) " total" }
        }
    }
}

fn tags_line(card: &Card) -> Markup {
    html! {
        @if !card.tags().is_empty() {
            div.tags {
                @for tag in card.tags() {
                    span.tag { (tag) }
                }
            }
        }
    }
}

fn empty_view(selection: &Selection, done_count: usize) -> Markup {
    html! {
        div.root {
            div.card {
                div.header {
                    h1 { "recall" }
                    (counts_line(selection, done_count))
                }
                div.content {
                    p { "No cards available." }
                    @if let Some(next_due) = selection.next_due {
                        p.next-due { "Next card at " (next_due.local_string()) "." }
                    }
                }
            }
        }
    }
}

fn front_view(card: &Card, selection: &Selection, done_count: usize) -> Markup {
    html! {
        div.root {
            div.card {
                div.header {
                    h1 { (card.deck_name()) }
                    (counts_line(selection, done_count))
                }
                div.content {
                    div.front { p { (card.front()) } }
                    div.back {}
                    (tags_line(card))
                }
                div.controls {
                    form action="/" method="post" {
                        input type="hidden" name="card_key" value=(card.key());
                        button id="reveal" name="action" value="reveal" { "Reveal" }
                    }
                }
            }
        }
    }
}

fn revealed_view(
    card: &Card,
    selection: &Selection,
    done_count: usize,
    previews: &[(Rating, String); 4],
) -> Markup {
    html! {
        div.root {
            div.card {
                div.header {
                    h1 { (card.deck_name()) }
                    (counts_line(selection, done_count))
                }
                div.content {
                    div.front { p { (card.front()) } }
                    div.back { p { (card.back()) } }
                    (tags_line(card))
                }
                div.controls {
                    form action="/" method="post" {
                        input type="hidden" name="card_key" value=(card.key());
                        @for (rating, sleep) in previews {
                            button id=(rating.as_str()) name="action" value=(rating.as_str()) {
                                (rating.label())
                                " "
                                span.sleep { (sleep) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// How long the card would sleep under each rating, e.g. `1m` or `6d`.
fn rating_previews(existing: Option<&CardRecord>, now: Timestamp) -> [(Rating, String); 4] {
    Rating::ALL.map(|rating| {
        let next = apply_rating(existing, rating, now);
        (rating, format_sleep(next.due.seconds_since(now)))
    })
}

fn format_sleep(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 90 {
        return "1m".to_string();
    }
    if seconds < 60 * 60 {
        let minutes = ((seconds as f64) / 60.0).round().max(1.0) as i64;
        return format!("{minutes}m");
    }
    if seconds < 24 * 60 * 60 {
        let hours = ((seconds as f64) / 3600.0).round().max(1.0) as i64;
        return format!("{hours}h");
    }
    let days = (seconds as f64) / 86_400.0;
    let rounded = days.round();
    if (days - rounded).abs() >= 0.05 && days < 10.0 {
        return format!("{days:.1}d");
    }
    format!("{}d", (rounded as i64).max(1))
}
