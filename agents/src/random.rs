// ═══════════════════════════════════════════════════════════════════════
// Random Agent — every decision is a weighted coin flip.
// Serves as baseline and for testing game engine stability.
// ═══════════════════════════════════════════════════════════════════════

use monopoly_engine::types::*;
use monopoly_engine::{Bids, DecisionMaker, PlayerView, TradeOffer};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Cash below which the agent considers mortgaging.
const MIN_CASH_THRESHOLD: Money = 200;

pub struct RandomAgent {
    rng: ChaCha8Rng,
    pub buy_prob: f64,
    pub trade_prob: f64,
    pub mortgage_prob: f64,
    pub build_prob: f64,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self::with_probabilities(seed, 0.5, 0.5, 0.5, 0.5)
    }

    pub fn with_probabilities(seed: u64, buy: f64, trade: f64, mortgage: f64, build: f64) -> Self {
        RandomAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
            buy_prob: buy.clamp(0.0, 1.0),
            trade_prob: trade.clamp(0.0, 1.0),
            mortgage_prob: mortgage.clamp(0.0, 1.0),
            build_prob: build.clamp(0.0, 1.0),
        }
    }
}

impl DecisionMaker for RandomAgent {
    fn name(&self) -> &str { "Random" }

    fn decide_purchase(&mut self, _view: &PlayerView, _square: SquareId) -> bool {
        self.rng.gen_bool(self.buy_prob)
    }

    fn decide_bid_auction(&mut self, view: &PlayerView, _square: SquareId, _bids: &Bids) -> Money {
        // Never bid from a non-positive balance
        let max_cash = view.my_cash().max(0);
        if self.rng.gen_bool(0.5) && max_cash > 0 {
            self.rng.gen_range(0..=max_cash)
        } else {
            0
        }
    }

    fn propose_trade(&mut self, _view: &PlayerView, _other: PlayerId) -> Option<TradeOffer> {
        None
    }

    fn accept_trade(&mut self, _view: &PlayerView, _offer: &TradeOffer) -> bool {
        self.rng.gen_bool(self.trade_prob)
    }

    fn decide_mortgage(&mut self, view: &PlayerView) -> bool {
        view.my_cash() < MIN_CASH_THRESHOLD && self.rng.gen_bool(self.mortgage_prob)
    }

    fn decide_build_house(&mut self, view: &PlayerView, square: SquareId) -> bool {
        let Some(cost) = view.square(square).deed().map(|d| d.building_cost) else {
            return false;
        };
        view.my_cash() > cost && self.rng.gen_bool(self.build_prob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monopoly_engine::setup::create_initial_state;
    use monopoly_engine::GameConfig;

    fn state() -> GameState {
        create_initial_state(&GameConfig::with_players(2), 3).unwrap()
    }

    #[test]
    fn test_always_and_never() {
        let s = state();
        let view = PlayerView::new(&s, PlayerId(0));
        let mut yes = RandomAgent::with_probabilities(1, 1.0, 1.0, 1.0, 1.0);
        let mut no = RandomAgent::with_probabilities(1, 0.0, 0.0, 0.0, 0.0);
        for _ in 0..20 {
            assert!(yes.decide_purchase(&view, SquareId(1)));
            assert!(!no.decide_purchase(&view, SquareId(1)));
            assert!(!no.decide_build_house(&view, SquareId(1)));
        }
    }

    #[test]
    fn test_bids_stay_within_cash() {
        let mut s = state();
        s.players[0].cash = 90;
        let view = PlayerView::new(&s, PlayerId(0));
        let mut agent = RandomAgent::new(5);
        for _ in 0..200 {
            let bid = agent.decide_bid_auction(&view, SquareId(1), &Bids::new());
            assert!((0..=90).contains(&bid));
        }
    }

    #[test]
    fn test_broke_agent_never_bids() {
        let mut s = state();
        s.players[0].cash = -10;
        let view = PlayerView::new(&s, PlayerId(0));
        let mut agent = RandomAgent::new(5);
        for _ in 0..50 {
            assert_eq!(agent.decide_bid_auction(&view, SquareId(1), &Bids::new()), 0);
        }
    }

    #[test]
    fn test_mortgage_only_below_threshold() {
        let s = state();
        let view = PlayerView::new(&s, PlayerId(0));
        let mut agent = RandomAgent::with_probabilities(1, 0.5, 0.5, 1.0, 0.5);
        assert!(!agent.decide_mortgage(&view));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let s = state();
        let view = PlayerView::new(&s, PlayerId(0));
        let mut a = RandomAgent::new(77);
        let mut b = RandomAgent::new(77);
        for _ in 0..30 {
            assert_eq!(a.decide_purchase(&view, SquareId(1)), b.decide_purchase(&view, SquareId(1)));
        }
    }
}
