use crate::error::Result;
use async_trait::async_trait;
use dugout_core::{PlayerId, PlayerRecord, PlayerUpdate};

/// Remote calls the description lifecycle depends on
///
/// Single-threaded (`?Send`): implementations run on the browser event loop.
#[async_trait(?Send)]
pub trait DescriptionGateway {
    /// `GET /players`
    async fn list_players(&self) -> Result<Vec<PlayerRecord>>;

    /// `GET /players/{id}`
    async fn get_player(&self, player_id: PlayerId) -> Result<PlayerRecord>;

    /// `GET /players/{id}/description`
    async fn load_description(&self, player_id: PlayerId) -> Result<String>;

    /// `POST /players/{id}/description`; the server stores the result
    async fn generate_description(&self, player_id: PlayerId) -> Result<String>;

    /// `PUT /players/{id}/description`
    async fn save_description(&self, player_id: PlayerId, text: &str) -> Result<String>;

    /// `PUT /players/{id}` with new statistics
    async fn update_player(&self, player_id: PlayerId, update: &PlayerUpdate)
        -> Result<PlayerRecord>;
}
