// ═══════════════════════════════════════════════════════════════════════
// Heuristic Agent — keeps a cash reserve and plays for monopolies.
// Significantly stronger than RandomAgent.
//
//   - Buys when the purchase leaves the reserve intact (half the reserve
//     if the square completes a colour group)
//   - Bids in small random steps up to a value-weighted ceiling
//   - Builds only on monopolies
//   - Proposes cash-for-title trades that complete a monopoly
//   - Accepts trades that gain value without breaking its own monopolies
// ═══════════════════════════════════════════════════════════════════════

use monopoly_engine::types::*;
use monopoly_engine::{Bids, CashDirection, DecisionMaker, PlayerView, TradeOffer};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct HeuristicAgent {
    rng: ChaCha8Rng,
    /// Cash the agent tries never to drop below.
    pub reserve: Money,
}

impl HeuristicAgent {
    pub fn new(seed: u64) -> Self {
        HeuristicAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
            reserve: 200,
        }
    }

    pub fn with_reserve(seed: u64, reserve: Money) -> Self {
        HeuristicAgent { reserve, ..Self::new(seed) }
    }

    /// Would owning `square` give `player` the whole group?
    fn completes_group(view: &PlayerView, player: PlayerId, square: SquareId) -> bool {
        let Some(group) = view.square(square).deed().and_then(|d| d.group) else {
            return false;
        };
        view.board().group(group).members.iter()
            .all(|&sq| sq == square || view.square(sq).is_owned_by(player))
    }

    /// Whether `square` is part of a group `player` currently holds whole.
    fn in_monopoly(view: &PlayerView, player: PlayerId, square: SquareId) -> bool {
        view.square(square).deed()
            .and_then(|d| d.group)
            .map_or(false, |g| view.has_monopoly(player, g))
    }

    fn price_of(view: &PlayerView, square: SquareId) -> Money {
        view.square(square).deed().map_or(0, |d| d.price)
    }

    /// The most this agent will pay for `square` in an auction.
    fn bid_ceiling(&self, view: &PlayerView, square: SquareId) -> Money {
        let me = view.viewer;
        let price = Self::price_of(view, square);
        let blocks_rival = view.players().iter()
            .filter(|p| p.id != me)
            .any(|p| Self::completes_group(view, p.id, square));

        let value = if Self::completes_group(view, me, square) {
            price * 3 / 2
        } else if blocks_rival {
            price * 5 / 4
        } else {
            price * 3 / 4
        };
        value.min(view.my_cash() - self.reserve / 2)
    }
}

impl DecisionMaker for HeuristicAgent {
    fn name(&self) -> &str { "Heuristic" }

    fn decide_purchase(&mut self, view: &PlayerView, square: SquareId) -> bool {
        let price = Self::price_of(view, square);
        let floor = if Self::completes_group(view, view.viewer, square) { self.reserve / 2 } else { self.reserve };
        view.my_cash() - price >= floor
    }

    fn decide_bid_auction(&mut self, view: &PlayerView, square: SquareId, bids: &Bids) -> Money {
        let leader = bids.iter().max_by_key(|(_, amount)| **amount);
        // Already on top: pass and let the standing bid ride
        if let Some((&id, _)) = leader {
            if id == view.viewer {
                return 0;
            }
        }
        let top = leader.map_or(0, |(_, &amount)| amount);
        let next = top + self.rng.gen_range(1..=10);
        if next <= self.bid_ceiling(view, square) { next } else { 0 }
    }

    fn propose_trade(&mut self, view: &PlayerView, other: PlayerId) -> Option<TradeOffer> {
        let me = view.viewer;
        let spare = view.my_cash() - self.reserve;

        // A square of `other`'s that is the last missing piece of one of our groups
        let target = view.player(other)?.properties.iter().copied()
            .find(|&sq| Self::completes_group(view, me, sq))?;

        let offer_cash = Self::price_of(view, target) * 3 / 2;
        if offer_cash > spare {
            return None;
        }
        Some(TradeOffer {
            proposer: me,
            counterparty: other,
            give: Vec::new(),
            receive: vec![target],
            cash: offer_cash,
            direction: CashDirection::ProposerPays,
        })
    }

    fn accept_trade(&mut self, view: &PlayerView, offer: &TradeOffer) -> bool {
        let me = view.viewer;
        if offer.receive.iter().any(|&sq| Self::in_monopoly(view, me, sq)) {
            return false;
        }

        let gained: Money = offer.give.iter().map(|&sq| Self::price_of(view, sq)).sum();
        let lost: Money = offer.receive.iter().map(|&sq| Self::price_of(view, sq)).sum();
        let cash = match offer.direction {
            CashDirection::ProposerPays => offer.cash,
            CashDirection::CounterpartyPays => -offer.cash,
        };
        if view.my_cash() + cash < self.reserve / 2 {
            return false;
        }

        // Handing a rival their monopoly costs a premium
        let completes_theirs = offer.receive.iter()
            .any(|&sq| Self::completes_group(view, offer.proposer, sq));
        let premium = if completes_theirs { lost / 4 } else { 0 };
        gained - lost + cash > premium
    }

    fn decide_mortgage(&mut self, view: &PlayerView) -> bool {
        view.my_cash() < 0 && view.me().map_or(false, |p| !p.properties.is_empty())
    }

    fn decide_build_house(&mut self, view: &PlayerView, square: SquareId) -> bool {
        let Some(deed) = view.square(square).deed() else {
            return false;
        };
        view.square(square).is_buildable()
            && deed.level < MAX_LEVEL
            && Self::in_monopoly(view, view.viewer, square)
            && view.my_cash() - deed.building_cost >= self.reserve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monopoly_engine::ledger;
    use monopoly_engine::setup::create_initial_state;
    use monopoly_engine::GameConfig;

    const MEDITERRANEAN: SquareId = SquareId(1);
    const BALTIC: SquareId = SquareId(3);
    const BOARDWALK: SquareId = SquareId(39);

    fn state() -> GameState {
        create_initial_state(&GameConfig::with_players(2), 11).unwrap()
    }

    fn give(s: &mut GameState, sq: SquareId, owner: u8) {
        ledger::transfer_title(s, sq, Some(PlayerId(owner))).unwrap();
    }

    #[test]
    fn test_buys_only_above_reserve() {
        let mut s = state();
        let mut agent = HeuristicAgent::new(1);
        assert!(agent.decide_purchase(&PlayerView::new(&s, PlayerId(0)), BOARDWALK));
        s.players[0].cash = 550;
        assert!(!agent.decide_purchase(&PlayerView::new(&s, PlayerId(0)), BOARDWALK));
    }

    #[test]
    fn test_stretches_reserve_to_complete_group() {
        let mut s = state();
        give(&mut s, SquareId(37), 0); // Park Place
        s.players[0].cash = 520;
        let mut agent = HeuristicAgent::new(1);
        assert!(agent.decide_purchase(&PlayerView::new(&s, PlayerId(0)), BOARDWALK));
    }

    #[test]
    fn test_builds_only_on_monopoly() {
        let mut s = state();
        give(&mut s, BALTIC, 0);
        let mut agent = HeuristicAgent::new(1);
        assert!(!agent.decide_build_house(&PlayerView::new(&s, PlayerId(0)), BALTIC));
        give(&mut s, MEDITERRANEAN, 0);
        assert!(agent.decide_build_house(&PlayerView::new(&s, PlayerId(0)), BALTIC));
        s.board.square_mut(BALTIC).deed_mut().unwrap().level = MAX_LEVEL;
        assert!(!agent.decide_build_house(&PlayerView::new(&s, PlayerId(0)), BALTIC));
    }

    #[test]
    fn test_never_builds_on_stations() {
        let mut s = state();
        for sq in [5, 15, 25, 35] {
            give(&mut s, SquareId(sq), 0);
        }
        let mut agent = HeuristicAgent::new(1);
        assert!(!agent.decide_build_house(&PlayerView::new(&s, PlayerId(0)), SquareId(5)));
    }

    #[test]
    fn test_bids_pass_when_leading_or_too_high() {
        let s = state();
        let view = PlayerView::new(&s, PlayerId(0));
        let mut agent = HeuristicAgent::new(4);

        let mut bids = Bids::new();
        bids.insert(PlayerId(0), 100);
        assert_eq!(agent.decide_bid_auction(&view, BOARDWALK, &bids), 0);

        bids.insert(PlayerId(1), 2000);
        assert_eq!(agent.decide_bid_auction(&view, BOARDWALK, &bids), 0);

        let bid = agent.decide_bid_auction(&view, BOARDWALK, &Bids::new());
        assert!((1..=10).contains(&bid));
    }

    #[test]
    fn test_proposes_monopoly_completing_trade() {
        let mut s = state();
        give(&mut s, MEDITERRANEAN, 0);
        give(&mut s, BALTIC, 1);
        let mut agent = HeuristicAgent::new(1);
        let offer = agent.propose_trade(&PlayerView::new(&s, PlayerId(0)), PlayerId(1)).unwrap();
        assert_eq!(offer.receive, vec![BALTIC]);
        assert!(offer.give.is_empty());
        assert_eq!(offer.cash, 90);
        assert_eq!(offer.direction, CashDirection::ProposerPays);

        s.players[0].cash = 250;
        assert!(agent.propose_trade(&PlayerView::new(&s, PlayerId(0)), PlayerId(1)).is_none());
    }

    #[test]
    fn test_accepts_profitable_trade_only() {
        let mut s = state();
        give(&mut s, BOARDWALK, 1);
        let mut agent = HeuristicAgent::new(1);
        let view = PlayerView::new(&s, PlayerId(1));
        let mut offer = TradeOffer {
            proposer: PlayerId(0),
            counterparty: PlayerId(1),
            give: Vec::new(),
            receive: vec![BOARDWALK],
            cash: 450,
            direction: CashDirection::ProposerPays,
        };
        assert!(agent.accept_trade(&view, &offer));
        offer.cash = 300;
        assert!(!agent.accept_trade(&view, &offer));
    }

    #[test]
    fn test_refuses_to_break_own_monopoly() {
        let mut s = state();
        give(&mut s, MEDITERRANEAN, 1);
        give(&mut s, BALTIC, 1);
        let mut agent = HeuristicAgent::new(1);
        let offer = TradeOffer {
            proposer: PlayerId(0),
            counterparty: PlayerId(1),
            give: Vec::new(),
            receive: vec![BALTIC],
            cash: 1000,
            direction: CashDirection::ProposerPays,
        };
        assert!(!agent.accept_trade(&PlayerView::new(&s, PlayerId(1)), &offer));
    }
}
