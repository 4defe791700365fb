// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for playing games and running tournaments
// ═══════════════════════════════════════════════════════════════════════

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::RuleOverrides;
use monopoly_engine::setup::create_initial_state;
use monopoly_engine::{play_turn, snapshot, Agents, GameConfig, GameState, PlayerId};
use monopoly_tournament::database::Database;
use monopoly_tournament::{run_batch, RunError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "monopoly-runner", about = "Property-trading board game simulator")]
struct Cli {
    /// TOML file with game rules; flags override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game, printing each turn
    Play {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Agent type: "random", "heuristic", or "mixed"
        #[arg(short, long, default_value = "random")]
        agent: String,
        /// Stop after this many turns
        #[arg(short, long)]
        turns: Option<u32>,
        /// Write a snapshot here when the run stops
        #[arg(long)]
        save: Option<PathBuf>,
        /// Only print the final standings
        #[arg(short, long)]
        quiet: bool,
        #[command(flatten)]
        rules: RuleOverrides,
    },
    /// Continue a saved game
    Resume {
        snapshot: PathBuf,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value = "random")]
        agent: String,
        #[arg(short, long)]
        turns: Option<u32>,
        #[arg(long)]
        save: Option<PathBuf>,
        #[arg(short, long)]
        quiet: bool,
    },
    /// Run a tournament of N games in parallel
    Tournament {
        #[arg(short, long, default_value_t = 100)]
        games: u32,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value = "results.db")]
        db: String,
        /// Agent type: "random", "heuristic", or "mixed"
        #[arg(short, long, default_value = "mixed")]
        agent: String,
        /// ELO K-factor
        #[arg(short, long, default_value_t = 32.0)]
        k: f64,
        /// Print each finished game as a JSON line
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        rules: RuleOverrides,
    },
    /// Show leaderboard from database
    Leaderboard {
        #[arg(short, long, default_value = "results.db")]
        db: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    match cli.command {
        Commands::Play { seed, agent, turns, save, quiet, rules } => {
            let game = config::load(cli.config.as_deref(), &rules)?;
            let state = create_initial_state(&game, seed).context("Failed to set up game")?;
            println!("=== Property Trading Game ===\n");
            println!("Running single game: seed={}, players={}, agent={}\n", seed, game.players, agent);
            cmd_play(state, seed, &agent, turns, save.as_deref(), quiet)
        }
        Commands::Resume { snapshot, seed, agent, turns, save, quiet } => {
            let data = fs::read_to_string(&snapshot)
                .with_context(|| format!("Failed to read snapshot: {}", snapshot.display()))?;
            let state = snapshot::restore(&data).context("Failed to restore snapshot")?;
            println!("Resuming {} at turn {} with {} players\n", snapshot.display(), state.turn, state.players.len());
            cmd_play(state, seed, &agent, turns, save.as_deref(), quiet)
        }
        Commands::Tournament { games, seed, db, agent, k, json, rules } => {
            let game = config::load(cli.config.as_deref(), &rules)?;
            cmd_tournament(&game, games, seed, &db, &agent, k, json)
        }
        Commands::Leaderboard { db } => cmd_leaderboard(&db),
    }
}

/// Initialise the `tracing` subscriber. Logs go to stderr so they never
/// mix with the game transcript.
fn init_logging(json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("monopoly_engine=info,monopoly_tournament=info"));

    if json {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn agent_kinds(agent: &str) -> Vec<&str> {
    match agent {
        "mixed" => vec!["heuristic", "random"],
        other => vec![other],
    }
}

fn make_agents(state: &GameState, seed: u64, agent: &str) -> Result<Agents> {
    let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    match monopoly_agents::seat_all(&ids, &agent_kinds(agent), seed) {
        Some(agents) => Ok(agents),
        None => bail!("Unknown agent type {:?} (expected one of {:?} or \"mixed\")", agent, monopoly_agents::AGENT_KINDS),
    }
}

fn cmd_play(mut state: GameState, seed: u64, agent: &str, turns: Option<u32>, save: Option<&Path>, quiet: bool) -> Result<()> {
    let mut agents = make_agents(&state, seed, agent)?;
    let stop_at = turns.map_or(state.config.max_turns, |n| state.turn.saturating_add(n).min(state.config.max_turns));

    while state.winner().is_none() && state.turn < stop_at {
        let roll = play_turn(&mut state, &mut agents)?;
        if !quiet {
            println!("Turn {:>4}  roll {}+{}", state.turn, roll.0, roll.1);
            for event in &state.events {
                println!("    {}", event);
            }
        }
    }

    println!();
    match state.winner() {
        Some(winner) => println!("Game finished after {} turns! Winner: {}", state.turn, state.player(winner)?),
        None => println!("Stopped after {} turns without a winner.", state.turn),
    }
    print_standings(&state);

    if let Some(path) = save {
        let data = snapshot::save_pretty(&state).context("Failed to serialize game")?;
        fs::write(path, data).with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        println!("\nSnapshot saved to: {}", path.display());
    }
    Ok(())
}

fn print_standings(state: &GameState) {
    println!("\n  Standings:");
    for (p, &pos) in state.players.iter().zip(&state.positions) {
        let (houses, hotels) = state.buildings_of(p.id);
        println!(
            "    {:18} ${:>6}  on {:24} deeds: {:2}  houses: {:2}  hotels: {}",
            p.token, p.cash, state.board.squares[pos].name, p.properties.len(), houses, hotels
        );
    }
}

/// Game seeds are spaced 1000 apart and wrap at `u64::MAX`.
fn tournament_seeds(seed: u64, games: u32) -> Vec<u64> {
    (0..games as u64).map(|g| seed.wrapping_add(g.wrapping_mul(1000))).collect()
}

fn cmd_tournament(game: &GameConfig, num_games: u32, seed: u64, db_path: &str, agent: &str, k: f64, json: bool) -> Result<()> {
    println!("=== Tournament: {} games, {} players, agent={} ===\n", num_games, game.players, agent);
    tracing::info!(games = num_games, players = game.players, agent, "tournament started");

    let db = Database::new(db_path).with_context(|| format!("Failed to open database: {}", db_path))?;
    let seeds = tournament_seeds(seed, num_games);
    let results = run_batch(game, &agent_kinds(agent), &seeds);

    let mut wins: BTreeMap<String, u32> = BTreeMap::new();
    let mut unfinished = 0u32;
    let mut errors = 0u32;
    for (game_seed, result) in &results {
        match result {
            Ok(r) => {
                *wins.entry(r.winner_agent.clone()).or_insert(0) += 1;
                db.record(r, k).context("Failed to store game")?;
                if json {
                    println!("{}", r.to_json()?);
                }
            }
            Err(RunError::TurnLimit { .. }) => unfinished += 1,
            Err(RunError::UnknownAgent(kind)) => bail!("Unknown agent type {:?}", kind),
            Err(e) => {
                errors += 1;
                eprintln!("Game seed {}: ERROR -- {}", game_seed, e);
            }
        }
    }

    println!("--- Summary ({} games, {} unfinished, {} errors) ---", num_games, unfinished, errors);
    for (name, w) in &wins {
        let pct = if num_games > 0 { *w as f64 / num_games as f64 * 100.0 } else { 0.0 };
        println!("  {:10}: {:>4} wins ({:.1}%)", name, w, pct);
    }
    println!("\nResults saved to: {}", db_path);
    println!("Total games in DB: {}", db.game_count()?);
    Ok(())
}

fn cmd_leaderboard(db_path: &str) -> Result<()> {
    let db = Database::new(db_path).with_context(|| format!("Failed to open database: {}", db_path))?;
    let board = db.leaderboard()?;
    if board.is_empty() {
        println!("No agents found. Run some tournaments first.");
        return Ok(());
    }
    println!("=== Leaderboard ===\n");
    println!("{:<20} {:>8} {:>8} {:>8}", "Agent", "ELO", "Games", "Wins");
    println!("{}", "-".repeat(48));
    for s in &board {
        println!("{:<20} {:>8.1} {:>8} {:>8}", s.name, s.elo, s.games, s.wins);
    }
    Ok(())
}
