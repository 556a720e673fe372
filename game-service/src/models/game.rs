use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GameRequest {
    /// Description of the educational game to generate.
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Prompt must be between 10 and 1000 characters"
    ))]
    pub prompt: String,
}

/// Returned after a game has been generated and stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResponse {
    pub game_id: String,
    pub message: String,
    pub play_url: String,
}

impl GameResponse {
    pub fn created(game_id: Uuid) -> Self {
        let game_id = game_id.as_hyphenated().to_string();
        Self {
            play_url: format!("/api/game/{}", game_id),
            message: "Game generated successfully!".to_string(),
            game_id,
        }
    }
}
