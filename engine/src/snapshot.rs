// ═══════════════════════════════════════════════════════════════════════
// Snapshot — opaque save/restore of the full engine state
//
// The RNG travels with the snapshot, so a restored game throws the same
// dice the uninterrupted game would have.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::EngineError;
use crate::types::GameState;

pub fn save(state: &GameState) -> Result<String, EngineError> {
    Ok(serde_json::to_string(state)?)
}

pub fn save_pretty(state: &GameState) -> Result<String, EngineError> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn restore(data: &str) -> Result<GameState, EngineError> {
    let state: GameState = serde_json::from_str(data)?;
    state.config.validate()?;
    if state.players.len() != state.positions.len() {
        return Err(EngineError::InvalidConfig(format!(
            "snapshot has {} players but {} positions",
            state.players.len(), state.positions.len()
        )));
    }
    if let Some(&bad) = state.positions.iter().find(|&&p| p >= state.board.len()) {
        return Err(EngineError::InvalidConfig(format!(
            "snapshot position {} is off a {}-square board", bad, state.board.len()
        )));
    }
    for p in &state.players {
        if let Some(sq) = p.properties.iter().find(|&&sq| !state.board.contains(sq)) {
            return Err(EngineError::InvalidConfig(format!(
                "{} holds a title for square #{} off a {}-square board", p.token, sq.0, state.board.len()
            )));
        }
    }
    for group in &state.board.groups {
        if let Some(sq) = group.members.iter().find(|&&sq| !state.board.contains(sq)) {
            return Err(EngineError::InvalidConfig(format!(
                "group {} lists square #{} off a {}-square board", group.name, sq.0, state.board.len()
            )));
        }
    }
    Ok(state)
}
