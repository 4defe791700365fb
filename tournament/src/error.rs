use monopoly_engine::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("game with seed {seed} reached the {turns}-turn limit without a winner")]
    TurnLimit { seed: u64, turns: u32 },

    #[error("unknown agent kind {0:?}")]
    UnknownAgent(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
