// ═══════════════════════════════════════════════════════════════════════
// Turn engine — resolves exactly one turn per call
//
// Flow for the active player:
//   1. Skip-turn counter > 0 → consume one, no movement, roll (0, 0)
//   2. Jailed → release (spend Get Out of Jail Free, else pay the fine)
//   3. Roll two dice, move, resolve the landing square only
//   4. Optional trade phase
//   5. Negative cash → bankrupt: removed with their position, deeds return
//      to the bank. Otherwise the turn pointer advances.
//
// The engine never decides when the game is over. Callers check
// `GameState::winner()` (exactly one player left).
// ═══════════════════════════════════════════════════════════════════════

use crate::config::TurnMode;
use crate::decision::{seat, Agents};
use crate::dice::Throw;
use crate::error::EngineError;
use crate::landing;
use crate::ledger::{self, Party};
use crate::trade;
use crate::types::*;
use crate::visibility::PlayerView;

/// Faces of the last throw of a turn; (0, 0) when the turn was skipped.
pub type Roll = (u8, u8);

/// Doubles in a row that send a player to jail in `ExtraRollOnDouble` mode.
const DOUBLES_TO_JAIL: u32 = 3;

/// Play the active player's turn.
pub fn play_turn(state: &mut GameState, agents: &mut Agents) -> Result<Roll, EngineError> {
    if state.players.is_empty() {
        return Err(EngineError::NoPlayers);
    }
    if state.current >= state.players.len() {
        state.current = 0;
    }

    let player = state.players[state.current].id;
    for p in &state.players {
        seat(agents, p.id)?;
    }

    state.events.clear();
    state.turn += 1;
    let _span = tracing::debug_span!("turn", turn = state.turn, %player).entered();

    let roll = if state.players[state.current].skip_next_turns > 0 {
        let p = &mut state.players[state.current];
        p.skip_next_turns -= 1;
        let msg = format!("{} skips their turn.", p);
        state.note(msg.clone());
        state.last_action = msg;
        (0, 0)
    } else {
        release_from_jail(state, player)?;
        take_rolls(state, agents, player)?
    };

    if state.config.trades {
        trade::propose_and_execute(state, agents, player)?;
    }

    settle(state, agents, player)?;
    state.last_roll = roll;
    Ok(roll)
}

fn release_from_jail(state: &mut GameState, player: PlayerId) -> Result<(), EngineError> {
    let p = state.player(player)?;
    if !p.jailed {
        return Ok(());
    }
    let token = p.token.clone();

    if p.has_card(RetainedCard::GetOutOfJailFree) {
        state.player_mut(player)?.take_card(RetainedCard::GetOutOfJailFree)?;
        state.note(format!("{} uses Get Out of Jail Free", token));
    } else {
        let fine = state.config.jail_fine;
        ledger::transfer(state, Party::Player(player), Party::Bank, fine)?;
        state.note(format!("{} pays ${} to leave Jail", token, fine));
    }
    state.player_mut(player)?.jailed = false;
    Ok(())
}

/// One roll in `Standard` mode; repeated on doubles in `ExtraRollOnDouble`.
fn take_rolls(state: &mut GameState, agents: &mut Agents, player: PlayerId) -> Result<Roll, EngineError> {
    let mut doubles = 0;
    loop {
        let throw = Throw::roll(&mut state.rng);
        let extra_rolls = state.config.turn_mode == TurnMode::ExtraRollOnDouble;

        if extra_rolls && throw.is_double() {
            doubles += 1;
            if doubles == DOUBLES_TO_JAIL {
                landing::send_to_jail(state, player)?;
                let msg = format!("{} rolls a third double and goes to Jail", state.player(player)?);
                state.note(msg.clone());
                state.last_action = msg;
                return Ok(throw.faces());
            }
        }

        let idx = state.index_of(player).ok_or(EngineError::UnknownPlayer(player))?;
        let target = (state.positions[idx] + throw.total()) % state.board.len();
        state.positions[idx] = target;
        let msg = format!(
            "{} rolls {}+{}={}, lands on {}",
            state.players[idx], throw.first, throw.second, throw.total(), state.board.squares[target]
        );
        state.note(msg.clone());
        state.last_action = msg;
        landing::resolve(state, agents, player, SquareId(target as u8))?;

        let p = state.player(player)?;
        if !extra_rolls || !throw.is_double() || p.jailed || p.cash < 0 {
            return Ok(throw.faces());
        }
        let token = p.token.clone();
        state.note(format!("{} rolled doubles and goes again!", token));
    }
}

/// End-of-turn bankruptcy check and turn-pointer advance.
fn settle(state: &mut GameState, agents: &mut Agents, player: PlayerId) -> Result<(), EngineError> {
    let idx = state.index_of(player).ok_or(EngineError::UnknownPlayer(player))?;

    if state.players[idx].cash >= 0 {
        state.current = (idx + 1) % state.players.len();
        return Ok(());
    }

    // No liquidation exists yet; the hook is consulted and recorded only.
    let wants_mortgage = seat(agents, player)?.decide_mortgage(&PlayerView::new(state, player));
    tracing::debug!(turn = state.turn, %player, wants_mortgage, "mortgage hook consulted");

    remove_bankrupt(state, idx)?;
    if state.current >= state.players.len() {
        state.current = 0;
    }
    Ok(())
}

/// Remove the player at `idx` together with their position. Their deeds go
/// back to the bank and their balance is written off.
pub fn remove_bankrupt(state: &mut GameState, idx: usize) -> Result<(), EngineError> {
    let bankrupt = state.players.remove(idx);
    state.positions.remove(idx);
    state.ledger.written_off += bankrupt.cash;

    for &sq in &bankrupt.properties {
        ledger::release_to_bank(state, sq)?;
    }

    let msg = format!("{} has gone bankrupt!", bankrupt);
    tracing::info!(turn = state.turn, player = %bankrupt.token, cash = bankrupt.cash, remaining = state.players.len(), "bankrupt");
    state.note(msg.clone());
    state.last_action = msg;
    state.bankruptcies.push(Bankruptcy { turn: state.turn, player: bankrupt });
    Ok(())
}
