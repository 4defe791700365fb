// ═══════════════════════════════════════════════════════════════════════
// Database — SQLite storage for tournament results and ELO ratings
// ═══════════════════════════════════════════════════════════════════════

use crate::runner::GameResult;
use rusqlite::{params, Connection, Result};

/// Rating every agent starts from.
pub const INITIAL_ELO: f64 = 1500.0;

pub struct Database {
    conn: Connection,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub name: String,
    pub elo: f64,
    pub games: u32,
    pub wins: u32,
}

impl Database {
    /// Open (or create) a database at the given path.
    pub fn new(path: &str) -> Result<Self> {
        let db = Database { conn: Connection::open(path)? };
        db.create_schema()?;
        Ok(db)
    }

    /// In-memory database (useful for tests).
    pub fn in_memory() -> Result<Self> {
        let db = Database { conn: Connection::open_in_memory()? };
        db.create_schema()?;
        Ok(db)
    }

    fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch("
            CREATE TABLE IF NOT EXISTS agents (
                id          INTEGER PRIMARY KEY,
                name        TEXT NOT NULL UNIQUE,
                elo         REAL NOT NULL DEFAULT 1500.0,
                games       INTEGER NOT NULL DEFAULT 0,
                wins        INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS games (
                id          INTEGER PRIMARY KEY,
                seed        INTEGER NOT NULL,
                turns       INTEGER NOT NULL,
                winner      TEXT NOT NULL,
                played_at   TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS game_players (
                id              INTEGER PRIMARY KEY,
                game_id         INTEGER NOT NULL REFERENCES games(id),
                agent_id        INTEGER NOT NULL REFERENCES agents(id),
                player          INTEGER NOT NULL,
                token           TEXT NOT NULL,
                placement       INTEGER NOT NULL,
                final_cash      INTEGER NOT NULL,
                properties      INTEGER NOT NULL,
                eliminated_turn INTEGER
            );
        ")
    }

    /// Register an agent (or return existing ID).
    pub fn register_agent(&self, name: &str) -> Result<i64> {
        self.conn.execute("INSERT OR IGNORE INTO agents (name) VALUES (?1)", params![name])?;
        self.conn.query_row("SELECT id FROM agents WHERE name = ?1", params![name], |row| row.get(0))
    }

    /// Store a completed game, registering its agents and bumping their
    /// game/win counters. An agent kind seated twice counts once per game.
    pub fn store_game(&self, result: &GameResult) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO games (seed, turns, winner) VALUES (?1, ?2, ?3)",
            params![result.seed as i64, result.turns_played as i64, result.winner_agent],
        )?;
        let game_id = tx.last_insert_rowid();

        let mut seen: Vec<i64> = Vec::new();
        for pr in &result.player_results {
            let agent_id = self.register_agent(&pr.agent_name)?;
            tx.execute(
                "INSERT INTO game_players (game_id, agent_id, player, token, placement, final_cash, properties, eliminated_turn)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    game_id,
                    agent_id,
                    pr.player.0 as i64,
                    pr.token,
                    pr.placement as i64,
                    pr.final_cash,
                    pr.final_properties as i64,
                    pr.eliminated_on_turn.map(|t| t as i64),
                ],
            )?;
            if !seen.contains(&agent_id) {
                seen.push(agent_id);
                let won = pr.agent_name == result.winner_agent;
                tx.execute(
                    "UPDATE agents SET games = games + 1, wins = wins + ?1 WHERE id = ?2",
                    params![won as i64, agent_id],
                )?;
            }
        }
        tx.commit()?;
        Ok(game_id)
    }

    fn elo_of(&self, agent_id: i64) -> f64 {
        self.conn
            .query_row("SELECT elo FROM agents WHERE id = ?1", params![agent_id], |row| row.get(0))
            .unwrap_or(INITIAL_ELO)
    }

    /// Update ELO ratings for a set of agents after a game.
    /// Simple multiplayer ELO: winner gains K points from each loser.
    pub fn update_elo(&self, winner_id: i64, loser_ids: &[i64], k: f64) -> Result<()> {
        for &loser_id in loser_ids.iter().filter(|&&id| id != winner_id) {
            let winner_elo = self.elo_of(winner_id);
            let loser_elo = self.elo_of(loser_id);

            let expected_winner = 1.0 / (1.0 + 10f64.powf((loser_elo - winner_elo) / 400.0));
            let delta = k * (1.0 - expected_winner);

            self.conn.execute("UPDATE agents SET elo = elo + ?1 WHERE id = ?2", params![delta, winner_id])?;
            self.conn.execute("UPDATE agents SET elo = elo - ?1 WHERE id = ?2", params![delta, loser_id])?;
        }
        Ok(())
    }

    /// Store the game and apply its ELO update in one call.
    pub fn record(&self, result: &GameResult, k: f64) -> Result<i64> {
        let game_id = self.store_game(result)?;
        let winner_id = self.register_agent(&result.winner_agent)?;
        let mut losers = Vec::new();
        for pr in &result.player_results[1..] {
            let id = self.register_agent(&pr.agent_name)?;
            if !losers.contains(&id) {
                losers.push(id);
            }
        }
        self.update_elo(winner_id, &losers, k)?;
        Ok(game_id)
    }

    /// ELO leaderboard, best first.
    pub fn leaderboard(&self) -> Result<Vec<Standing>> {
        let mut stmt = self.conn.prepare("SELECT name, elo, games, wins FROM agents ORDER BY elo DESC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Standing {
                name: row.get(0)?,
                elo: row.get(1)?,
                games: row.get(2)?,
                wins: row.get(3)?,
            })
        })?;
        let standings: Result<Vec<Standing>> = rows.collect();
        standings
    }

    /// Get total number of games stored.
    pub fn game_count(&self) -> Result<u32> {
        self.conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
    }
}
