pub mod game;

pub use game::{GameRequest, GameResponse};
