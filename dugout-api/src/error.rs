use dugout_core::{PlayerError, QueueError};

/// Errors talking to the player API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` is the server's `error` field when present
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid player update: {0}")]
    InvalidUpdate(#[from] PlayerError),

    #[error("No player is active")]
    NoActivePlayer,

    #[error("Command queue error: {0}")]
    Queue(#[from] QueueError),
}

impl ApiError {
    /// Text shown to the user as the description's last error
    pub fn display_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(target_arch = "wasm32")]
impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Serialization(e),
            other => ApiError::Network(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
