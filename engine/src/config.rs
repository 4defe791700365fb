// ═══════════════════════════════════════════════════════════════════════
// Game configuration — rules knobs fixed at game creation
// ═══════════════════════════════════════════════════════════════════════

use crate::board::TOKENS;
use crate::error::EngineError;
use crate::types::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnMode {
    /// One roll per turn.
    #[default]
    Standard,
    /// A double grants another roll; the third double in a row sends the
    /// player to jail.
    ExtraRollOnDouble,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub players: u8,
    pub starting_cash: Money,
    /// Paid to the bank on release from jail when no card is held.
    pub jail_fine: Money,
    pub turn_mode: TurnMode,
    /// Give the active player a trade phase after their landing resolves.
    pub trades: bool,
    /// Safety cap for drivers that play a game to completion.
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            players: 4,
            starting_cash: 1500,
            jail_fine: 50,
            turn_mode: TurnMode::Standard,
            trades: true,
            max_turns: 2_000,
        }
    }
}

impl GameConfig {
    pub fn with_players(players: u8) -> Self {
        GameConfig { players, ..GameConfig::default() }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(2..=TOKENS.len() as u8).contains(&self.players) {
            return Err(EngineError::InvalidConfig(format!(
                "player count must be 2–{}, got {}", TOKENS.len(), self.players
            )));
        }
        if self.starting_cash <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "starting cash must be positive, got {}", self.starting_cash
            )));
        }
        if self.jail_fine < 0 {
            return Err(EngineError::InvalidConfig("jail fine cannot be negative".into()));
        }
        Ok(())
    }
}
