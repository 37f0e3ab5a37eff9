use dugout_core::PlayerId;

/// API root used when `DUGOUT_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Configuration for the player API client
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Polling interval of the UI loop in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(option_env!("DUGOUT_API_URL").unwrap_or(DEFAULT_API_URL))
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            poll_interval_ms: 50,
        }
    }

    pub fn with_poll_interval(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// `{base}/players`
    pub fn players_url(&self) -> String {
        format!("{}/players", self.base_url)
    }

    /// `{base}/players/{id}`
    pub fn player_url(&self, player_id: PlayerId) -> String {
        format!("{}/{}", self.players_url(), player_id)
    }

    /// `{base}/players/{id}/description`
    pub fn description_url(&self, player_id: PlayerId) -> String {
        format!("{}/description", self.player_url(player_id))
    }
}
