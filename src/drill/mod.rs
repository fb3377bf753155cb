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

mod post;
pub mod server;
mod state;
mod template;
mod view;

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::path::PathBuf;
    use std::time::Duration;

    use reqwest::StatusCode;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::catalog::Catalog;
    use crate::decks::load_deck;
    use crate::drill::server::start_server;
    use crate::error::Fallible;
    use crate::store::StateStore;

    const DECK: &str = r#"{
        "name": "Capitals",
        "cards": [
            {"front": "Capital of France?", "back": "Paris"}
        ]
    }"#;

    async fn start_test_server(dir: &Path) -> Fallible<(String, PathBuf)> {
        let deck_path = dir.join("deck.json");
        std::fs::write(&deck_path, DECK)?;
        let state_path = dir.join("state.json");

        let deck = load_deck(&deck_path)?;
        let catalog = Catalog::new(vec![deck])?;
        let store = StateStore::load(&state_path)?;

        let port = portpicker::pick_unused_port().expect("no free port");
        spawn(async move { start_server(catalog, store, "127.0.0.1", port, false).await });
        loop {
            if let Ok(stream) = TcpStream::connect(("127.0.0.1", port)).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        Ok((format!("http://127.0.0.1:{port}"), state_path))
    }

    fn extract_card_key(html: &str) -> String {
        let marker = "name=\"card_key\" value=\"";
        let start = html.find(marker).expect("no card_key in page") + marker.len();
        let end = html[start..].find('"').unwrap() + start;
        html[start..end].to_string()
    }

    #[tokio::test]
    async fn test_static_routes() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let (base, _) = start_test_server(dir.path()).await?;

        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_study_flow() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let (base, state_path) = start_test_server(dir.path()).await?;
        let client = reqwest::Client::new();

        // The front of the new card, answer hidden.
        let response = reqwest::get(format!("{base}/")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Capital of France?"));
        assert!(!html.contains("Paris"));
        assert!(html.contains("Reveal"));
        assert!(html.contains("1 new"));
        assert!(html.contains("0 done"));

        // Reveal: the back appears, with sleep previews on the buttons.
        let response = client
            .post(format!("{base}/"))
            .form(&[("action", "reveal")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Paris"));
        assert!(html.contains("Again"));
        assert!(html.contains("Easy"));
        assert!(html.contains("1m"));
        assert!(html.contains("1d"));
        let card_key = extract_card_key(&html);

        // Rate Good: the card sleeps until tomorrow, so nothing is left.
        let response = client
            .post(format!("{base}/"))
            .form(&[("action", "good"), ("card_key", card_key.as_str())])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("No cards available."));
        assert!(html.contains("Next card at"));
        assert!(html.contains("1 done"));

        // The rating was persisted.
        let text = std::fs::read_to_string(&state_path)?;
        assert!(text.contains("\"version\": 1"));
        assert!(text.contains("\"repetitions\": 1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_rating_an_unrevealed_card_is_ignored() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let (base, state_path) = start_test_server(dir.path()).await?;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/"))
            .form(&[("action", "good")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Capital of France?"));
        assert!(html.contains("0 done"));
        assert!(!state_path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_rating_with_a_stale_card_key_is_ignored() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let (base, state_path) = start_test_server(dir.path()).await?;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/"))
            .form(&[("action", "reveal")])
            .send()
            .await?;
        assert!(response.status().is_success());

        // The posted key does not name the current card.
        let response = client
            .post(format!("{base}/"))
            .form(&[("action", "good"), ("card_key", "bogus:bogus")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Paris"));
        assert!(html.contains("0 done"));
        assert!(!state_path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action_is_rejected_without_side_effects() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let (base, state_path) = start_test_server(dir.path()).await?;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/"))
            .form(&[("action", "excellent")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("0 done"));
        assert!(!state_path.exists());
        Ok(())
    }
}
