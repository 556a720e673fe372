#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use game_service::config::GameConfig;
use game_service::services::providers::mock::MockTextProvider;
use game_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const VALID_GAME: &str = "<!DOCTYPE html>\n<html><head><title>Quiz</title></head><body><script>let score = 0;</script></body></html>";

pub const PROMPT: &str = "A multiplication quiz for 8 year olds";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("Response body is not UTF-8")
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<MockTextProvider>,
    pub root: PathBuf,
    pub games_dir: PathBuf,
    pub static_dir: PathBuf,
}

/// Configuration pointing at throwaway directories.
pub fn test_config(games_dir: &Path, static_dir: &Path) -> GameConfig {
    let games_dir = games_dir.display().to_string();
    let static_dir = static_dir.display().to_string();

    GameConfig::from_lookup(CoreConfig { port: 0 }, false, |key| match key {
        "GEMINI_API_KEY" => Some("test-api-key".to_string()),
        "GAMES_DIR" => Some(games_dir.clone()),
        "STATIC_DIR" => Some(static_dir.clone()),
        _ => None,
    })
    .expect("Failed to build test configuration")
}

impl TestApp {
    pub async fn spawn(provider: MockTextProvider) -> Self {
        let root = PathBuf::from(format!("target/test-app-{}", Uuid::new_v4()));
        let games_dir = root.join("games");
        let static_dir = root.join("static");
        tokio::fs::create_dir_all(&static_dir)
            .await
            .expect("Failed to create static dir");

        let provider = Arc::new(provider);
        let state = AppState::new(test_config(&games_dir, &static_dir), provider.clone())
            .await
            .expect("Failed to build application state");

        TestApp {
            router: build_router(state),
            provider,
            root,
            games_dir,
            static_dir,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn generate(&self, prompt: &str) -> TestResponse {
        self.post_json("/api/generate", &serde_json::json!({ "prompt": prompt }))
            .await
    }

    /// Number of documents currently in the games directory.
    pub fn stored_games(&self) -> usize {
        std::fs::read_dir(&self.games_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.root).await;
    }
}
