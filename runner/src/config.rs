//! Loads `GameConfig` from an optional TOML file and applies CLI overrides.

use anyhow::{Context, Result};
use clap::Args;
use monopoly_engine::{GameConfig, Money, TurnMode};
use std::fs;
use std::path::Path;

/// Rule flags shared by every subcommand that starts a game.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleOverrides {
    /// Number of players (2–8)
    #[arg(short, long)]
    pub players: Option<u8>,
    /// Starting cash per player
    #[arg(long)]
    pub cash: Option<Money>,
    /// Fine paid to leave jail without a card
    #[arg(long)]
    pub jail_fine: Option<Money>,
    /// Roll again on doubles; three in a row goes to jail
    #[arg(long)]
    pub extra_rolls: bool,
    /// Disable the trade phase
    #[arg(long)]
    pub no_trades: bool,
    /// Turn cap before a game is abandoned
    #[arg(long)]
    pub max_turns: Option<u32>,
}

impl RuleOverrides {
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(p) = self.players {
            config.players = p;
        }
        if let Some(c) = self.cash {
            config.starting_cash = c;
        }
        if let Some(f) = self.jail_fine {
            config.jail_fine = f;
        }
        if self.extra_rolls {
            config.turn_mode = TurnMode::ExtraRollOnDouble;
        }
        if self.no_trades {
            config.trades = false;
        }
        if let Some(t) = self.max_turns {
            config.max_turns = t;
        }
        config
    }
}

/// Missing fields in the file fall back to the defaults.
pub fn parse(contents: &str) -> Result<GameConfig> {
    toml::from_str(contents).context("Failed to parse game config")
}

pub fn load(path: Option<&Path>, overrides: &RuleOverrides) -> Result<GameConfig> {
    let base = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            parse(&contents).with_context(|| format!("in {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate().context("Invalid game config")?;
    Ok(config)
}
