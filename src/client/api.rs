//! Async client for the game service's dungeon endpoint

use crate::client::snapshot::{DungeonStateResponse, RunSnapshot};
use crate::core::config::ApiConfig;
use crate::core::error::{AdvisorError, Result};
use reqwest::Client;

/// Polls the game service for the current run
pub struct GameClient {
    client: Client,
    config: ApiConfig,
}

impl GameClient {
    /// Create a client with explicit configuration
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.config.bearer_token.is_some()
    }

    fn dungeon_state_url(&self) -> String {
        format!("{}/game/dungeon/state", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetch the active run, if any.
    ///
    /// `Ok(None)` means the service reports no active run: the fight is over
    /// (player died or the run ended).
    pub async fn fetch_run(&self) -> Result<Option<RunSnapshot>> {
        let mut request = self.client.get(self.dungeon_state_url());
        if let Some(token) = &self.config.bearer_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AdvisorError::Api(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Api(format!(
                "failed to fetch game state: {} {}",
                status, error_text
            )));
        }

        let body: DungeonStateResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::Api(e.to_string()))?;

        tracing::trace!(?body, "dungeon state");
        body.into_run().map(RunSnapshot::from_run).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GameClient::new(ApiConfig {
            base_url: "https://api.example.com/".into(),
            bearer_token: Some("test-token".into()),
        });
        assert!(client.is_authenticated());
        assert_eq!(
            client.dungeon_state_url(),
            "https://api.example.com/game/dungeon/state"
        );
    }

    #[test]
    fn test_unauthenticated_client() {
        let client = GameClient::new(ApiConfig {
            bearer_token: None,
            ..ApiConfig::default()
        });
        assert!(!client.is_authenticated());
        assert_eq!(
            client.dungeon_state_url(),
            "https://gigaverse.io/api/game/dungeon/state"
        );
    }
}
