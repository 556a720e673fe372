use crate::models::{GameRequest, GameResponse};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Html,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

pub async fn generate_game(
    State(state): State<AppState>,
    payload: Result<Json<GameRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::info!(error = %e, "Rejected game request body");
        e
    })?;

    req.validate().map_err(|e| {
        tracing::info!(error = %e, "Rejected game request");
        e
    })?;

    let response = state.games.generate(&req).await?;

    Ok(Json(response))
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let html = state.games.fetch(&game_id).await?;
    Ok(Html(html))
}
