// ═══════════════════════════════════════════════════════════════════════
// Engine errors
//
// Insufficient funds are not an error: rent, tax and card payments
// may drive a balance negative, and the end-of-turn bankruptcy check is
// the only place insolvency is handled.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{PlayerId, RetainedCard};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no players remain in the game")]
    NoPlayers,

    #[error("no decision maker registered for player {0}")]
    MissingDecisionMaker(PlayerId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("no square named {0:?} on this board")]
    UnknownSquare(String),

    #[error("player {player} does not hold {card:?}")]
    CardNotHeld { player: PlayerId, card: RetainedCard },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
