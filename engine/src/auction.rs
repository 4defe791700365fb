// ═══════════════════════════════════════════════════════════════════════
// Auction — multi-round bidding for a square its lander declined to buy
//
// Every player is a candidate. In each round each active bidder is asked
// for a bid; it stands only if it beats their own previous bid and fits
// within their cash. Anything else is a pass, and a pass is final.
// ═══════════════════════════════════════════════════════════════════════

use crate::decision::{seat, Agents, Bids};
use crate::error::EngineError;
use crate::ledger;
use crate::types::*;
use crate::visibility::PlayerView;
use std::collections::HashMap;

/// Run the auction and settle it. Returns the winner (if any) and the
/// price paid; `(None, 0)` when nobody bid.
pub fn auction(state: &mut GameState, agents: &mut Agents, square: SquareId) -> Result<(Option<PlayerId>, Money), EngineError> {
    let name = state.board.square(square).name.clone();
    state.note(format!("Auction for {}", name));

    let mut bids = Bids::new();
    // When each standing bid was placed, for tie-breaking
    let mut placed_at: HashMap<PlayerId, u32> = HashMap::new();
    let mut sequence = 0u32;
    let mut active: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();

    loop {
        let mut accepted_this_round = 0;
        let mut still_active = Vec::with_capacity(active.len());

        for &bidder in &active {
            let bid = seat(agents, bidder)?
                .decide_bid_auction(&PlayerView::new(state, bidder), square, &bids);
            let previous = bids.get(&bidder).copied().unwrap_or(0);
            let cash = state.player(bidder)?.cash;
            let token = state.player(bidder)?.token.clone();

            if bid > previous && bid <= cash {
                bids.insert(bidder, bid);
                sequence += 1;
                placed_at.insert(bidder, sequence);
                accepted_this_round += 1;
                still_active.push(bidder);
                tracing::debug!(turn = state.turn, bidder = %token, bid, "bid");
                state.note(format!("{} bids ${}", token, bid));
            } else {
                state.note(format!("{} passes", token));
            }
        }

        active = still_active;
        if accepted_this_round == 0 || active.len() <= 1 {
            break;
        }
    }

    // Highest bid wins; among equals, whoever reached it first
    let winner = bids.iter()
        .map(|(&id, &amount)| (id, amount, placed_at[&id]))
        .max_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)));

    let Some((winner, price, _)) = winner else {
        state.note(format!("No bids for {}, auction ends unsold", name));
        return Ok((None, 0));
    };

    ledger::buy(state, winner, square, price)?;
    let token = state.player(winner)?.token.clone();
    tracing::info!(turn = state.turn, winner = %token, square = %name, price, "auction won");
    state.note(format!("{} wins auction for {} at ${}", token, name, price));
    Ok((Some(winner), price))
}
