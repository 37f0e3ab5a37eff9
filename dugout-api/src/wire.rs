use crate::error::{ApiError, Result};
use dugout_core::PlayerRecord;
use serde::{Deserialize, Serialize};

/// `{ "description": ... }` as sent and received by the description endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionBody {
    #[serde(default)]
    pub description: Option<String>,
}

impl DescriptionBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            description: Some(text.into()),
        }
    }

    /// A null or missing description reads as empty text
    pub fn into_text(self) -> String {
        self.description.unwrap_or_default()
    }
}

/// Error payload of the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Build the error for a non-2xx response
pub fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));

    ApiError::Status { status, message }
}

pub fn decode_description(body: &str) -> Result<String> {
    let body: DescriptionBody =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(body.into_text())
}

pub fn decode_player(body: &str) -> Result<PlayerRecord> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub fn decode_players(body: &str) -> Result<Vec<PlayerRecord>> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
