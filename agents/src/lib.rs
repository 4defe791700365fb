pub mod random;
pub mod heuristic;

pub use random::RandomAgent;
pub use heuristic::HeuristicAgent;

use monopoly_engine::{Agents, DecisionMaker, PlayerId};

/// Agent kinds selectable by name from the runner and tournament.
pub const AGENT_KINDS: &[&str] = &["random", "heuristic"];

/// Build a decision maker by name. Unknown names yield `None`.
pub fn make_agent(kind: &str, seed: u64) -> Option<Box<dyn DecisionMaker>> {
    match kind {
        "random" => Some(Box::new(RandomAgent::new(seed))),
        "heuristic" => Some(Box::new(HeuristicAgent::new(seed))),
        _ => None,
    }
}

/// Seat one agent per player, cycling through `kinds`. Each seat gets its
/// own seed so agents of the same kind don't mirror each other.
pub fn seat_all(players: &[PlayerId], kinds: &[&str], seed: u64) -> Option<Agents> {
    if kinds.is_empty() {
        return None;
    }
    let mut agents = Agents::new();
    for (i, &id) in players.iter().enumerate() {
        let kind = kinds[i % kinds.len()];
        let agent = make_agent(kind, seed.wrapping_mul(31).wrapping_add(id.0 as u64 + 1))?;
        agents.insert(id, agent);
    }
    Some(agents)
}
