// ═══════════════════════════════════════════════════════════════════════
// Ledger — atomic cash and title transfers
//
// Transfers never fail for lack of funds. A payer's balance may go negative;
// the turn engine settles that with the end-of-turn bankruptcy check.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::EngineError;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// An economic actor on one side of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    Player(PlayerId),
    Bank,
    /// Every player except the one on the other side of the transfer.
    AllOthers,
}

/// Running totals that make money conservation checkable:
/// `Σ cash + written_off − bank_outflow == initial total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Net amount the bank has paid out (negative when it has collected more).
    pub bank_outflow: Money,
    /// Balances that left the game with bankrupt players.
    pub written_off: Money,
}

impl LedgerTotals {
    pub fn is_balanced(&self, state: &GameState) -> bool {
        state.total_cash() + self.written_off - self.bank_outflow == state.initial_cash_total
    }
}

fn credit(state: &mut GameState, party: Party, amount: Money) -> Result<(), EngineError> {
    match party {
        Party::Player(id) => state.player_mut(id)?.cash += amount,
        Party::Bank => state.ledger.bank_outflow -= amount,
        // Expanded by `transfer` before it gets here
        Party::AllOthers => {}
    }
    Ok(())
}

/// Move `amount` from `payer` to `payee` in one step.
///
/// `AllOthers` expands to one payment per other player, relative to the
/// `Player` on the opposite side. A negative amount reverses direction.
pub fn transfer(state: &mut GameState, payer: Party, payee: Party, amount: Money) -> Result<(), EngineError> {
    if amount < 0 {
        return transfer(state, payee, payer, -amount);
    }
    if amount == 0 {
        return Ok(());
    }

    match (payer, payee) {
        (Party::AllOthers, Party::Player(to)) => {
            let others: Vec<PlayerId> = state.players.iter().map(|p| p.id).filter(|&id| id != to).collect();
            for other in others {
                transfer(state, Party::Player(other), Party::Player(to), amount)?;
            }
        }
        (Party::Player(from), Party::AllOthers) => {
            let others: Vec<PlayerId> = state.players.iter().map(|p| p.id).filter(|&id| id != from).collect();
            for other in others {
                transfer(state, Party::Player(from), Party::Player(other), amount)?;
            }
        }
        (Party::AllOthers, _) | (_, Party::AllOthers) => {
            tracing::warn!(?payer, ?payee, amount, "AllOthers needs a player counterparty; ignored");
        }
        (from, to) => {
            credit(state, from, -amount)?;
            credit(state, to, amount)?;
            tracing::trace!(?from, ?to, amount, "transfer");
        }
    }
    Ok(())
}

/// Reassign title of `square`, keeping the owner reference and owner lists
/// in agreement. `None` returns the deed to the bank.
pub fn transfer_title(state: &mut GameState, square: SquareId, to: Option<PlayerId>) -> Result<(), EngineError> {
    if let Some(id) = to {
        // Validate before touching anything
        state.player(id)?;
    }
    let deed = match state.board.square_mut(square).deed_mut() {
        Some(d) => d,
        None => return Ok(()),
    };
    let from = deed.owner;
    deed.owner = to;

    if let Some(old) = from {
        if let Ok(p) = state.player_mut(old) {
            p.properties.retain(|&s| s != square);
        }
    }
    if let Some(new) = to {
        let p = state.player_mut(new)?;
        if !p.owns(square) {
            p.properties.push(square);
        }
    }
    Ok(())
}

/// Return a deed to the bank with its buildings cleared.
pub fn release_to_bank(state: &mut GameState, square: SquareId) -> Result<(), EngineError> {
    transfer_title(state, square, None)?;
    if let Some(deed) = state.board.square_mut(square).deed_mut() {
        deed.level = 0;
    }
    Ok(())
}

/// Atomic purchase: pay the bank, set owner, append to the owner's list.
pub fn buy(state: &mut GameState, player: PlayerId, square: SquareId, price: Money) -> Result<(), EngineError> {
    transfer(state, Party::Player(player), Party::Bank, price)?;
    transfer_title(state, square, Some(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::setup::create_initial_state;

    fn state3() -> GameState {
        create_initial_state(&GameConfig::with_players(3), 7).unwrap()
    }

    #[test]
    fn test_player_to_player_conserves() {
        let mut s = state3();
        transfer(&mut s, Party::Player(PlayerId(0)), Party::Player(PlayerId(1)), 300).unwrap();
        assert_eq!(s.players[0].cash, 1200);
        assert_eq!(s.players[1].cash, 1800);
        assert_eq!(s.ledger.bank_outflow, 0);
        assert!(s.ledger.is_balanced(&s));
    }

    #[test]
    fn test_bank_transfers_tracked() {
        let mut s = state3();
        transfer(&mut s, Party::Bank, Party::Player(PlayerId(2)), 200).unwrap();
        transfer(&mut s, Party::Player(PlayerId(0)), Party::Bank, 50).unwrap();
        assert_eq!(s.ledger.bank_outflow, 150);
        assert!(s.ledger.is_balanced(&s));
    }

    #[test]
    fn test_all_others_collect_and_pay() {
        let mut s = state3();
        transfer(&mut s, Party::AllOthers, Party::Player(PlayerId(0)), 50).unwrap();
        assert_eq!(s.players[0].cash, 1600);
        assert_eq!(s.players[1].cash, 1450);
        assert_eq!(s.players[2].cash, 1450);

        transfer(&mut s, Party::Player(PlayerId(1)), Party::AllOthers, 100).unwrap();
        assert_eq!(s.players[1].cash, 1250);
        assert_eq!(s.total_cash(), 4500);
    }

    #[test]
    fn test_transfer_may_go_negative() {
        let mut s = state3();
        transfer(&mut s, Party::Player(PlayerId(0)), Party::Bank, 2000).unwrap();
        assert_eq!(s.players[0].cash, -500);
    }

    #[test]
    fn test_negative_amount_reverses() {
        let mut s = state3();
        transfer(&mut s, Party::Bank, Party::Player(PlayerId(0)), -15).unwrap();
        assert_eq!(s.players[0].cash, 1485);
        assert_eq!(s.ledger.bank_outflow, -15);
    }

    #[test]
    fn test_title_moves_between_lists() {
        let mut s = state3();
        let sq = SquareId(1);
        transfer_title(&mut s, sq, Some(PlayerId(0))).unwrap();
        assert!(s.players[0].owns(sq));
        transfer_title(&mut s, sq, Some(PlayerId(1))).unwrap();
        assert!(!s.players[0].owns(sq));
        assert_eq!(s.players[1].properties, vec![sq]);
        assert_eq!(s.board.square(sq).owner(), Some(PlayerId(1)));
    }

    #[test]
    fn test_title_to_unknown_player_is_rejected() {
        let mut s = state3();
        assert!(transfer_title(&mut s, SquareId(1), Some(PlayerId(9))).is_err());
        assert_eq!(s.board.square(SquareId(1)).owner(), None);
    }
}
