pub mod game;
pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod storage;

pub use game::{GameError, GameService};
pub use self::metrics::{get_metrics, init_metrics};
pub use storage::{GameStore, LocalGameStore};
