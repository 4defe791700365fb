// ═══════════════════════════════════════════════════════════════════════
// Game Runner — plays complete headless games with agents
// ═══════════════════════════════════════════════════════════════════════

use crate::error::RunError;
use monopoly_engine::setup::create_initial_state;
use monopoly_engine::types::*;
use monopoly_engine::{play_turn, Agents, GameConfig};
use rayon::prelude::*;
use serde::Serialize;

/// Result of a completed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub seed: u64,
    pub winner: PlayerId,
    pub winner_agent: String,
    pub turns_played: u32,
    /// Ordered by placement, winner first.
    pub player_results: Vec<PlayerResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerResult {
    pub player: PlayerId,
    pub token: String,
    pub agent_name: String,
    /// 1 for the winner; later eliminations place higher.
    pub placement: usize,
    pub final_cash: Money,
    pub final_properties: usize,
    /// `None` for the winner.
    pub eliminated_on_turn: Option<u32>,
}

impl GameResult {
    /// One JSON line per game.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Run a complete game on a fresh state. Each agent in the map controls
/// one player. Fails with `TurnLimit` past `config.max_turns`.
pub fn run_game(agents: &mut Agents, config: &GameConfig, seed: u64) -> Result<GameResult, RunError> {
    let mut state = create_initial_state(config, seed)?;
    play_out(&mut state, agents, seed)
}

/// Drive an existing state (fresh or restored) until one player is left.
pub fn play_out(state: &mut GameState, agents: &mut Agents, seed: u64) -> Result<GameResult, RunError> {
    let _span = tracing::debug_span!("game", seed).entered();

    while state.winner().is_none() {
        if state.turn >= state.config.max_turns {
            tracing::warn!(seed, turns = state.turn, "turn limit reached");
            return Err(RunError::TurnLimit { seed, turns: state.turn });
        }
        play_turn(state, agents)?;
    }

    // Includes players removed before a restore
    let eliminated: Vec<PlayerResult> = state.bankruptcies.iter()
        .map(|b| PlayerResult {
            player: b.player.id,
            token: b.player.token.clone(),
            agent_name: agent_name(agents, b.player.id),
            placement: 0,
            final_cash: b.player.cash,
            final_properties: b.player.properties.len(),
            eliminated_on_turn: Some(b.turn),
        })
        .collect();

    let winner = state.winner().ok_or(monopoly_engine::EngineError::NoPlayers)?;
    let survivor = state.player(winner)?;
    let mut player_results = vec![PlayerResult {
        player: winner,
        token: survivor.token.clone(),
        agent_name: agent_name(agents, winner),
        placement: 1,
        final_cash: survivor.cash,
        final_properties: survivor.properties.len(),
        eliminated_on_turn: None,
    }];
    // Last out places second
    player_results.extend(eliminated.into_iter().rev());
    for (i, pr) in player_results.iter_mut().enumerate() {
        pr.placement = i + 1;
    }

    let winner_agent = agent_name(agents, winner);
    tracing::info!(seed, turns = state.turn, winner = %winner, agent = %winner_agent, "game finished");
    Ok(GameResult {
        seed,
        winner,
        winner_agent,
        turns_played: state.turn,
        player_results,
    })
}

fn agent_name(agents: &Agents, player: PlayerId) -> String {
    agents.get(&player).map_or_else(String::new, |a| a.name().to_string())
}

/// Play one game per seed in parallel. Seats cycle through `kinds`.
/// Results come back in seed order.
pub fn run_batch(config: &GameConfig, kinds: &[&str], seeds: &[u64]) -> Vec<(u64, Result<GameResult, RunError>)> {
    seeds.par_iter()
        .map(|&seed| (seed, run_seeded(config, kinds, seed)))
        .collect()
}

fn run_seeded(config: &GameConfig, kinds: &[&str], seed: u64) -> Result<GameResult, RunError> {
    let ids: Vec<PlayerId> = (0..config.players).map(PlayerId).collect();
    let mut agents = monopoly_agents::seat_all(&ids, kinds, seed)
        .ok_or_else(|| RunError::UnknownAgent(kinds.join(",")))?;
    run_game(&mut agents, config, seed)
}
