// ═══════════════════════════════════════════════════════════════════════
// Game setup — builds a fresh, independent GameState per game
// ═══════════════════════════════════════════════════════════════════════

use crate::board::{standard_board, TOKENS};
use crate::cards::{self, Deck, DeckKind};
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::ledger::LedgerTotals;
use crate::types::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Create the initial state on the standard board.
/// Seed controls deck shuffling and every later dice throw.
pub fn create_initial_state(config: &GameConfig, seed: u64) -> Result<GameState, EngineError> {
    create_on_board(config, standard_board(), seed)
}

/// Create the initial state on a caller-supplied board. Decks are the
/// standard ones, shuffled once here and never again.
pub fn create_on_board(config: &GameConfig, board: Board, seed: u64) -> Result<GameState, EngineError> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut chance = cards::chance_cards();
    let mut community = cards::community_chest_cards();
    chance.shuffle(&mut rng);
    community.shuffle(&mut rng);

    let players: Vec<Player> = TOKENS.iter()
        .take(config.players as usize)
        .enumerate()
        .map(|(i, token)| Player::new(PlayerId(i as u8), *token, config.starting_cash))
        .collect();
    let positions = vec![0; players.len()];
    let initial_cash_total = config.starting_cash * players.len() as Money;

    Ok(GameState {
        config: config.clone(),
        board,
        players,
        positions,
        current: 0,
        chance: Deck::new(DeckKind::Chance, chance),
        community_chest: Deck::new(DeckKind::CommunityChest, community),
        ledger: LedgerTotals::default(),
        rng,
        turn: 0,
        last_roll: (0, 0),
        last_action: String::new(),
        events: Vec::new(),
        initial_cash_total,
        bankruptcies: Vec::new(),
    })
}
