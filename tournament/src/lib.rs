pub mod error;
pub mod runner;
pub mod database;

pub use error::RunError;
pub use runner::{play_out, run_batch, run_game, GameResult, PlayerResult};
