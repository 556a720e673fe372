//! Game generation and retrieval.

use crate::models::{GameRequest, GameResponse};
use crate::sanitizer::{sanitize_html, InvalidHtml};
use crate::services::metrics::{record_generation, record_provider_error};
use crate::services::prompt::{game_instruction, SYSTEM_INSTRUCTION};
use crate::services::providers::{FinishReason, GenerationParams, ProviderError, TextProvider};
use crate::services::storage::GameStore;
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid game ID format")]
    InvalidId,

    #[error("Game not found")]
    NotFound,

    #[error("Failed to generate game: {0}")]
    Generation(#[from] ProviderError),

    #[error("Failed to generate game: {0}")]
    InvalidContent(#[from] InvalidHtml),

    #[error("Failed to generate game: {}", storage_cause(.0))]
    Persist(#[source] AppError),

    #[error(transparent)]
    Storage(AppError),
}

/// The underlying failure of a storage error, without the response prefix.
fn storage_cause(err: &AppError) -> String {
    match err {
        AppError::InternalError(cause)
        | AppError::BadRequest(cause)
        | AppError::NotFound(cause)
        | AppError::ConfigError(cause) => format!("{:#}", cause),
        other => other.to_string(),
    }
}

impl GameError {
    fn outcome(&self) -> &'static str {
        match self {
            GameError::Generation(_) => "provider_error",
            GameError::InvalidContent(_) => "invalid_html",
            GameError::Persist(_) => "storage_error",
            _ => "error",
        }
    }
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        match err {
            e @ GameError::InvalidId => AppError::BadRequest(anyhow::anyhow!("{}", e)),
            e @ GameError::NotFound => AppError::NotFound(anyhow::anyhow!("{}", e)),
            GameError::Storage(inner) => inner,
            other => AppError::InternalError(anyhow::anyhow!("{}", other)),
        }
    }
}

/// Parses a canonical (hyphenated, 36 character) UUID.
pub fn parse_game_id(raw: &str) -> Result<Uuid, GameError> {
    if raw.len() != 36 {
        return Err(GameError::InvalidId);
    }
    Uuid::try_parse(raw).map_err(|_| GameError::InvalidId)
}

#[derive(Clone)]
pub struct GameService {
    provider: Arc<dyn TextProvider>,
    store: Arc<dyn GameStore>,
    params: GenerationParams,
}

impl GameService {
    pub fn new(
        provider: Arc<dyn TextProvider>,
        store: Arc<dyn GameStore>,
        params: GenerationParams,
    ) -> Self {
        Self {
            provider,
            store,
            params,
        }
    }

    /// Generates, validates and stores a new game.
    ///
    /// The request must already have passed length validation. Nothing is
    /// written unless the model output passes sanitization.
    pub async fn generate(&self, request: &GameRequest) -> Result<GameResponse, GameError> {
        let start = Instant::now();
        let result = self.generate_inner(request).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        record_generation(outcome, start.elapsed());

        result
    }

    async fn generate_inner(&self, request: &GameRequest) -> Result<GameResponse, GameError> {
        tracing::info!(prompt_len = request.prompt.chars().count(), "Generating game");

        let response = self
            .provider
            .generate(
                SYSTEM_INSTRUCTION,
                &game_instruction(&request.prompt),
                &self.params,
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Generation call failed");
                record_provider_error(e.kind());
                e
            })?;

        if response.finish_reason == FinishReason::Length {
            tracing::warn!(
                output_tokens = response.output_tokens,
                "Model output hit the token limit"
            );
        }

        let html = sanitize_html(&response.text).map_err(|e| {
            tracing::error!(raw_len = response.text.len(), "Model output is not an HTML document");
            e
        })?;

        let game_id = Uuid::new_v4();
        self.store.save(game_id, &html).await.map_err(|e| {
            tracing::error!(game_id = %game_id, error = %e, "Failed to store game");
            GameError::Persist(e)
        })?;

        tracing::info!(
            game_id = %game_id,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = response.finish_reason.as_str(),
            html_len = html.len(),
            "Game generated"
        );

        Ok(GameResponse::created(game_id))
    }

    /// Returns the stored document for `game_id`.
    pub async fn fetch(&self, game_id: &str) -> Result<String, GameError> {
        let id = parse_game_id(game_id)?;

        self.store
            .load(id)
            .await
            .map_err(|e| {
                tracing::error!(game_id = %id, error = %e, "Failed to read game");
                GameError::Storage(e)
            })?
            .ok_or(GameError::NotFound)
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.store.health_check().await
    }
}
