use crate::startup::AppState;
use axum::{extract::State, response::Html};
use service_core::error::AppError;
use std::io::ErrorKind;

/// Serves the landing page from the static directory, read fresh on every request.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = state.config.storage.static_dir.join("index.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Landing page missing");
            Err(AppError::NotFound(anyhow::anyhow!("Frontend not found")))
        }
        Err(e) => Err(AppError::from(e)),
    }
}
