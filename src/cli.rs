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

use clap::Parser;

use crate::catalog::Catalog;
use crate::decks::load_decks;
use crate::drill::server::start_server;
use crate::error::Fallible;
use crate::store::StateStore;

/// A local, single-user spaced repetition study server.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Deck JSON file(s) to study.
    #[arg(required = true)]
    decks: Vec<PathBuf>,

    /// Path to the JSON state file (progress is stored here).
    #[arg(long, default_value = "recall_state.json")]
    state_file: PathBuf,

    /// Host interface to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Do not open a browser automatically.
    #[arg(long)]
    no_browser: bool,

    /// Validate deck files and exit (no server).
    #[arg(long)]
    validate_only: bool,
}

pub fn entrypoint() -> Fallible<()> {
    let cli = Cli::parse();

    let (decks, failures) = load_decks(&cli.decks);
    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("{failure}");
            eprintln!();
        }
        std::process::exit(1);
    }

    for deck in &decks {
        log::debug!(
            "Loaded deck '{}' [{}] with {} card(s) from {}.",
            deck.name,
            deck.deck_id,
            deck.cards.len(),
            deck.path.display()
        );
    }

    if cli.validate_only {
        println!("Validated {} deck(s).", decks.len());
        return Ok(());
    }

    let catalog = Catalog::new(decks)?;
    let store = StateStore::load(&cli.state_file)?;
    if store.is_empty() {
        log::debug!("Starting with an empty state store at {}.", store.path().display());
    } else {
        log::debug!(
            "Loaded {} record(s) from {}.",
            store.len(),
            store.path().display()
        );
    }
    log::debug!(
        "Studying {} card(s) across {} deck(s).",
        catalog.card_count(),
        catalog.deck_count()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(start_server(
        catalog,
        store,
        &cli.host,
        cli.port,
        !cli.no_browser,
    ))
}
