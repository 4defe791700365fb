// ═══════════════════════════════════════════════════════════════════════
// DecisionMaker — the contract every seat at the table implements
//
// The engine consults a decision maker at each choice point, handing it a
// read-only `PlayerView`. Because the view borrows the state immutably,
// nothing can mutate the game while a decision is pending. Decision makers
// may keep private state of their own (an RNG, a model) behind `&mut self`.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::EngineError;
use crate::types::*;
use crate::visibility::PlayerView;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Standing bids in an auction, keyed by bidder.
pub type Bids = BTreeMap<PlayerId, Money>;

/// Decision makers for every seat, keyed by player.
pub type Agents = HashMap<PlayerId, Box<dyn DecisionMaker>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashDirection {
    ProposerPays,
    CounterpartyPays,
}

/// A bilateral property-and-cash offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub proposer: PlayerId,
    pub counterparty: PlayerId,
    /// Squares moving from proposer to counterparty.
    pub give: Vec<SquareId>,
    /// Squares moving from counterparty to proposer.
    pub receive: Vec<SquareId>,
    /// Net cash, always non-negative; `direction` says who pays.
    pub cash: Money,
    pub direction: CashDirection,
}

pub trait DecisionMaker: Send {
    /// Human-readable name (e.g. "Random", "Heuristic").
    fn name(&self) -> &str;

    /// Buy the unowned square just landed on? `false` sends it to auction.
    fn decide_purchase(&mut self, view: &PlayerView, square: SquareId) -> bool;

    /// Bid for `square`. Must exceed this player's own standing bid and
    /// stay within their cash to be accepted; anything else is a pass.
    fn decide_bid_auction(&mut self, view: &PlayerView, square: SquareId, current_bids: &Bids) -> Money;

    /// Optionally make an offer to `other`.
    fn propose_trade(&mut self, view: &PlayerView, other: PlayerId) -> Option<TradeOffer>;

    /// Accept an offer made to this player?
    fn accept_trade(&mut self, view: &PlayerView, offer: &TradeOffer) -> bool;

    /// Consulted when the player ends a turn insolvent. Liquidation is not
    /// implemented; the answer is recorded only.
    fn decide_mortgage(&mut self, view: &PlayerView) -> bool;

    /// Add a building to an owned square just landed on?
    fn decide_build_house(&mut self, view: &PlayerView, square: SquareId) -> bool;
}

pub(crate) fn seat(agents: &mut Agents, player: PlayerId) -> Result<&mut Box<dyn DecisionMaker>, EngineError> {
    agents.get_mut(&player).ok_or(EngineError::MissingDecisionMaker(player))
}
