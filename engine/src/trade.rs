// ═══════════════════════════════════════════════════════════════════════
// Trades — bilateral property + cash offers
// ═══════════════════════════════════════════════════════════════════════

use crate::decision::{seat, Agents, CashDirection, TradeOffer};
use crate::error::EngineError;
use crate::ledger::{self, Party};
use crate::types::*;
use crate::visibility::PlayerView;

/// Let `proposer` make an offer to every other player. Accepted offers
/// execute immediately. Returns how many trades went through.
pub fn propose_and_execute(state: &mut GameState, agents: &mut Agents, proposer: PlayerId) -> Result<usize, EngineError> {
    let others: Vec<PlayerId> = state.players.iter().map(|p| p.id).filter(|&id| id != proposer).collect();
    let mut executed = 0;

    for other in others {
        let offer = seat(agents, proposer)?.propose_trade(&PlayerView::new(state, proposer), other);
        let Some(offer) = offer else { continue };

        if let Err(reason) = check_titles(state, &offer, proposer, other) {
            tracing::warn!(turn = state.turn, %proposer, %other, reason, "malformed trade offer ignored");
            continue;
        }

        let from = state.player(proposer)?.token.clone();
        let to = state.player(other)?.token.clone();
        state.note(format!(
            "{} proposes trade to {}: give {:?}, receive {:?}, ${} {:?}",
            from, to, offer.give, offer.receive, offer.cash, offer.direction
        ));

        let accepted = seat(agents, other)?.accept_trade(&PlayerView::new(state, other), &offer);
        if accepted {
            execute(state, &offer)?;
            executed += 1;
            tracing::info!(turn = state.turn, proposer = %from, counterparty = %to, "trade executed");
            state.note("Trade executed");
        } else {
            state.note(format!("{} rejects trade", to));
        }
    }
    Ok(executed)
}

/// Offers may only move squares their side actually owns. Solvency is not
/// checked.
fn check_titles(state: &GameState, offer: &TradeOffer, proposer: PlayerId, other: PlayerId) -> Result<(), &'static str> {
    if offer.proposer != proposer || offer.counterparty != other {
        return Err("offer names the wrong parties");
    }
    if offer.cash < 0 {
        return Err("cash must be non-negative; use direction");
    }
    if offer.give.iter().chain(&offer.receive).any(|&sq| !state.board.contains(sq)) {
        return Err("offer names a square off the board");
    }
    if !offer.give.iter().all(|&sq| state.board.square(sq).is_owned_by(proposer)) {
        return Err("proposer does not own every square offered");
    }
    if !offer.receive.iter().all(|&sq| state.board.square(sq).is_owned_by(other)) {
        return Err("counterparty does not own every square requested");
    }
    Ok(())
}

/// Swap titles for both sets, then settle the cash. All-or-nothing: the
/// parties are validated before anything moves.
pub fn execute(state: &mut GameState, offer: &TradeOffer) -> Result<(), EngineError> {
    state.player(offer.proposer)?;
    state.player(offer.counterparty)?;
    if let Some(&sq) = offer.give.iter().chain(&offer.receive).find(|&&sq| !state.board.contains(sq)) {
        return Err(EngineError::UnknownSquare(format!("#{}", sq.0)));
    }

    for &sq in &offer.give {
        ledger::transfer_title(state, sq, Some(offer.counterparty))?;
    }
    for &sq in &offer.receive {
        ledger::transfer_title(state, sq, Some(offer.proposer))?;
    }

    let (payer, payee) = match offer.direction {
        CashDirection::ProposerPays => (offer.proposer, offer.counterparty),
        CashDirection::CounterpartyPays => (offer.counterparty, offer.proposer),
    };
    ledger::transfer(state, Party::Player(payer), Party::Player(payee), offer.cash)
}
