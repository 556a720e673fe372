//! HTTP handlers for the game service.

pub mod frontend;
pub mod games;
pub mod health;

pub use frontend::index;
pub use games::{generate_game, get_game};
pub use health::{health_check, metrics_endpoint, readiness_check};
