use crate::config::ApiConfig;
use crate::error::Result;
use crate::gateway::DescriptionGateway;
use crate::wire::{self, DescriptionBody};
use async_trait::async_trait;
use dugout_core::{PlayerId, PlayerRecord, PlayerUpdate};
use gloo_net::http::{Request, Response};

/// Browser `fetch` implementation of [`DescriptionGateway`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpGateway {
    config: ApiConfig,
}

impl HttpGateway {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Body text of a successful response
    async fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            tracing::warn!(status, "API request failed");
            return Err(wire::status_error(status, &body));
        }

        Ok(body)
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

#[async_trait(?Send)]
impl DescriptionGateway for HttpGateway {
    async fn list_players(&self) -> Result<Vec<PlayerRecord>> {
        let url = self.config.players_url();
        tracing::debug!(%url, "GET players");

        let response = Request::get(&url).send().await?;
        let body = Self::read_body(response).await?;
        wire::decode_players(&body)
    }

    async fn get_player(&self, player_id: PlayerId) -> Result<PlayerRecord> {
        let url = self.config.player_url(player_id);
        tracing::debug!(%url, "GET player");

        let response = Request::get(&url).send().await?;
        let body = Self::read_body(response).await?;
        wire::decode_player(&body)
    }

    async fn load_description(&self, player_id: PlayerId) -> Result<String> {
        let url = self.config.description_url(player_id);
        tracing::debug!(%url, "GET description");

        let response = Request::get(&url).send().await?;
        let body = Self::read_body(response).await?;
        wire::decode_description(&body)
    }

    async fn generate_description(&self, player_id: PlayerId) -> Result<String> {
        let url = self.config.description_url(player_id);
        tracing::debug!(%url, "POST description");

        let response = Request::post(&url).send().await?;
        let body = Self::read_body(response).await?;
        wire::decode_description(&body)
    }

    async fn save_description(&self, player_id: PlayerId, text: &str) -> Result<String> {
        let url = self.config.description_url(player_id);
        tracing::debug!(%url, "PUT description");

        let response = Request::put(&url)
            .json(&DescriptionBody::new(text))?
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        wire::decode_description(&body)
    }

    async fn update_player(
        &self,
        player_id: PlayerId,
        update: &PlayerUpdate,
    ) -> Result<PlayerRecord> {
        let url = self.config.player_url(player_id);
        tracing::debug!(%url, "PUT player");

        let response = Request::put(&url).json(update)?.send().await?;
        let body = Self::read_body(response).await?;
        wire::decode_player(&body)
    }
}
