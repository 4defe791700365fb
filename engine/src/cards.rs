// ═══════════════════════════════════════════════════════════════════════
// Chance and Community Chest — card kinds, effect table, cyclic decks
// ═══════════════════════════════════════════════════════════════════════

use crate::decision::Agents;
use crate::error::EngineError;
use crate::landing;
use crate::ledger::{self, Party};
use crate::types::*;
use crate::dice;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Chance,
    CommunityChest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    AdvanceToGo,
    BankError,
    DoctorFees,
    SaleOfStock,
    GetOutOfJailFree,
    GoToJail,
    GrandOperaNight,
    HolidayFund,
    IncomeTaxRefund,
    Birthday,
    LifeInsurance,
    HospitalFees,
    SchoolFees,
    ConsultancyFee,
    StreetRepairs,
    BeautyContest,
    Inheritance,
    TaxRefundCommunityChest,
    AdvanceToIllinois,
    AdvanceToStCharles,
    AdvanceToNearestUtility,
    AdvanceToNearestRailroad,
    BankDividend,
    GoBackThree,
    GeneralRepairs,
    PoorTax,
    TripToReading,
    WalkOnBoardwalk,
    ChairmanOfTheBoard,
    BuildingLoanMatures,
    CrosswordCompetition,
    DoubleRent,
    SkipNextTurn,
    TaxRefundChance,
}

/// Squares a card can send a player to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Start,
    Named(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nearest {
    Utility,
    Railroad,
}

/// What a card does. Each card maps to exactly one effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEffect {
    /// Move with standard landing resolution.
    AdvanceTo(Destination),
    /// Relative move with standard landing resolution.
    MoveBy(i32),
    /// Move to the nearest square of a type with the card's own payment rule.
    AdvanceToNearest(Nearest),
    GoToJail,
    /// Positive: bank pays the player. Negative: the player pays the bank.
    Bank(Money),
    /// Positive: every other player pays the player. Negative: the reverse.
    AllOthers(Money),
    Repairs { per_house: Money, per_hotel: Money },
    Retain(RetainedCard),
    DoubleRent,
    SkipTurn,
}

impl Card {
    pub fn name(self) -> &'static str {
        use Card::*;
        match self {
            AdvanceToGo => "Advance to Go (Collect $200)",
            BankError => "Bank error in your favor - Collect $200",
            DoctorFees => "Doctor's Fees - Pay $50",
            SaleOfStock => "From sale of stock you get $50",
            GetOutOfJailFree => "Get Out of Jail Free - This card may be kept until needed or sold",
            GoToJail => "Go to Jail - Go directly to jail - Do not pass Go - Do not collect $200",
            GrandOperaNight => "Grand Opera Night - Collect $50 from every player for opening night seats",
            HolidayFund => "Holiday Fund matures - Receive $100",
            IncomeTaxRefund => "Income tax refund - Collect $20",
            Birthday => "It is your birthday - Collect $10 from each player",
            LifeInsurance => "Life insurance matures - Collect $100",
            HospitalFees => "Pay hospital fees of $100",
            SchoolFees => "Pay school fees of $150",
            ConsultancyFee => "Receive $25 consultancy fee",
            StreetRepairs => "You are assessed for street repairs - $40 per house - $115 per hotel",
            BeautyContest => "You have won second prize in a beauty contest - Collect $10",
            Inheritance => "You inherit $100",
            TaxRefundCommunityChest => "Tax Refund: Receive $75 from the bank",
            AdvanceToIllinois => "Advance to Illinois Ave.",
            AdvanceToStCharles => "Advance to St. Charles Place",
            AdvanceToNearestUtility => "Advance token to nearest Utility. If owned, throw dice and pay owner ten times the amount thrown",
            AdvanceToNearestRailroad => "Advance token to the nearest Railroad and pay owner twice the rental. If unowned, you may buy it",
            BankDividend => "Bank pays you dividend of $50",
            GoBackThree => "Go Back 3 Spaces",
            GeneralRepairs => "Make general repairs on all your property - For each house pay $25 - For each hotel $100",
            PoorTax => "Pay poor tax of $15",
            TripToReading => "Take a trip to Reading Railroad",
            WalkOnBoardwalk => "Take a walk on the Boardwalk - Advance token to Boardwalk",
            ChairmanOfTheBoard => "You have been elected Chairman of the Board - Pay each player $50",
            BuildingLoanMatures => "Your building loan matures - Collect $150",
            CrosswordCompetition => "You have won a crossword competition - Collect $10",
            DoubleRent => "Double Rent: Next rent you collect is doubled",
            SkipNextTurn => "Skip Next Turn: You lose your next turn",
            TaxRefundChance => "Tax Refund: Receive $100 from the bank",
        }
    }

    pub fn effect(self) -> CardEffect {
        use Card::*;
        use CardEffect as E;
        match self {
            AdvanceToGo => E::AdvanceTo(Destination::Start),
            BankError => E::Bank(200),
            DoctorFees => E::Bank(-50),
            SaleOfStock => E::Bank(50),
            GetOutOfJailFree => E::Retain(RetainedCard::GetOutOfJailFree),
            GoToJail => E::GoToJail,
            GrandOperaNight => E::AllOthers(50),
            HolidayFund => E::Bank(100),
            IncomeTaxRefund => E::Bank(20),
            Birthday => E::AllOthers(10),
            LifeInsurance => E::Bank(100),
            HospitalFees => E::Bank(-100),
            SchoolFees => E::Bank(-150),
            ConsultancyFee => E::Bank(25),
            StreetRepairs => E::Repairs { per_house: 40, per_hotel: 115 },
            BeautyContest => E::Bank(10),
            Inheritance => E::Bank(100),
            TaxRefundCommunityChest => E::Bank(75),
            AdvanceToIllinois => E::AdvanceTo(Destination::Named("Illinois Avenue")),
            AdvanceToStCharles => E::AdvanceTo(Destination::Named("St. Charles Place")),
            AdvanceToNearestUtility => E::AdvanceToNearest(Nearest::Utility),
            AdvanceToNearestRailroad => E::AdvanceToNearest(Nearest::Railroad),
            BankDividend => E::Bank(50),
            GoBackThree => E::MoveBy(-3),
            GeneralRepairs => E::Repairs { per_house: 25, per_hotel: 100 },
            PoorTax => E::Bank(-15),
            TripToReading => E::AdvanceTo(Destination::Named("Reading Railroad")),
            WalkOnBoardwalk => E::AdvanceTo(Destination::Named("Boardwalk")),
            ChairmanOfTheBoard => E::AllOthers(-50),
            BuildingLoanMatures => E::Bank(150),
            CrosswordCompetition => E::Bank(10),
            DoubleRent => E::DoubleRent,
            SkipNextTurn => E::SkipTurn,
            TaxRefundChance => E::Bank(100),
        }
    }
}

// ── Deck contents ──────────────────────────────────────────────────────

pub fn community_chest_cards() -> Vec<Card> {
    use Card::*;
    vec![
        AdvanceToGo, BankError, DoctorFees, SaleOfStock, GetOutOfJailFree,
        GoToJail, GrandOperaNight, HolidayFund, IncomeTaxRefund, Birthday,
        LifeInsurance, HospitalFees, SchoolFees, ConsultancyFee, StreetRepairs,
        BeautyContest, Inheritance, TaxRefundCommunityChest,
    ]
}

pub fn chance_cards() -> Vec<Card> {
    use Card::*;
    vec![
        AdvanceToGo, AdvanceToIllinois, AdvanceToStCharles, AdvanceToNearestUtility,
        AdvanceToNearestRailroad, BankDividend, GetOutOfJailFree, GoBackThree,
        GoToJail, GeneralRepairs, PoorTax, TripToReading, WalkOnBoardwalk,
        ChairmanOfTheBoard, BuildingLoanMatures, CrosswordCompetition,
        DoubleRent, SkipNextTurn, TaxRefundChance,
    ]
}

// ── Deck ───────────────────────────────────────────────────────────────

/// A cyclic FIFO deck. Drawn cards go back to the bottom after use, so the
/// length never changes across a draw + requeue pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub kind: DeckKind,
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn new(kind: DeckKind, cards: Vec<Card>) -> Self {
        Deck { kind, cards: cards.into() }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn requeue(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn peek(&self) -> Option<Card> {
        self.cards.front().copied()
    }
}

fn deck_mut(state: &mut GameState, kind: DeckKind) -> &mut Deck {
    match kind {
        DeckKind::Chance => &mut state.chance,
        DeckKind::CommunityChest => &mut state.community_chest,
    }
}

/// Draw the front card of `kind`, apply it to `player`, and put it back at
/// the bottom. An empty deck is a no-op.
pub fn draw_and_apply(state: &mut GameState, agents: &mut Agents, player: PlayerId, kind: DeckKind) -> Result<(), EngineError> {
    let Some(card) = deck_mut(state, kind).draw() else {
        return Ok(());
    };
    let token = state.player(player)?.token.clone();
    state.note(format!("{} draws {:?}: {}", token, kind, card.name()));
    let outcome = apply(state, agents, player, card);
    deck_mut(state, kind).requeue(card);
    outcome
}

/// Execute one card effect against `player`.
pub fn apply(state: &mut GameState, agents: &mut Agents, player: PlayerId, card: Card) -> Result<(), EngineError> {
    match card.effect() {
        CardEffect::AdvanceTo(dest) => {
            let target = match dest {
                Destination::Start => state.board.start()
                    .ok_or_else(|| EngineError::UnknownSquare("Start".into()))?,
                Destination::Named(name) => state.board.index_by_name(name)?,
            };
            landing::move_to(state, agents, player, target, true)?;
        }

        CardEffect::MoveBy(steps) => {
            let n = state.board.len() as i32;
            let from = state.position_of(player).ok_or(EngineError::UnknownPlayer(player))? as i32;
            let target = SquareId((from + steps).rem_euclid(n) as u8);
            landing::move_to(state, agents, player, target, true)?;
        }

        CardEffect::AdvanceToNearest(kind) => advance_to_nearest(state, agents, player, kind)?,

        CardEffect::GoToJail => landing::send_to_jail(state, player)?,

        CardEffect::Bank(amount) => {
            ledger::transfer(state, Party::Bank, Party::Player(player), amount)?;
        }

        CardEffect::AllOthers(amount) => {
            ledger::transfer(state, Party::AllOthers, Party::Player(player), amount)?;
        }

        CardEffect::Repairs { per_house, per_hotel } => {
            let (houses, hotels) = state.buildings_of(player);
            let bill = per_house * houses as Money + per_hotel * hotels as Money;
            ledger::transfer(state, Party::Player(player), Party::Bank, bill)?;
        }

        CardEffect::Retain(kept) => state.player_mut(player)?.add_card(kept),

        CardEffect::DoubleRent => state.player_mut(player)?.double_rent = true,

        CardEffect::SkipTurn => state.player_mut(player)?.skip_next_turns += 1,
    }
    Ok(())
}

/// Nearest utility / railroad. Unowned targets resolve normally (buy or
/// auction). Owned targets bypass standard rent: the lander pays the card's
/// own formula and moves without landing resolution.
fn advance_to_nearest(state: &mut GameState, agents: &mut Agents, player: PlayerId, kind: Nearest) -> Result<(), EngineError> {
    let from = state.position_of(player).ok_or(EngineError::UnknownPlayer(player))?;
    let target = match kind {
        Nearest::Utility => state.board.nearest_after(from, Square::is_utility),
        Nearest::Railroad => state.board.nearest_after(from, Square::is_station),
    };
    let Some(target) = target else {
        return Ok(());
    };

    match state.board.square(target).owner() {
        None => landing::move_to(state, agents, player, target, true),
        Some(owner) if owner == player => landing::move_to(state, agents, player, target, false),
        Some(owner) => {
            let amount = match kind {
                Nearest::Utility => 10 * dice::simple_amount(&mut state.rng),
                Nearest::Railroad => 2 * landing::rent_for(state, target),
            };
            ledger::transfer(state, Party::Player(player), Party::Player(owner), amount)?;
            let (payer, payee) = (state.player(player)?.token.clone(), state.player(owner)?.token.clone());
            state.note(format!("{} pays ${} to {}", payer, amount, payee));
            landing::move_to(state, agents, player, target, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_deck_sizes() {
        assert_eq!(community_chest_cards().len(), 18);
        assert_eq!(chance_cards().len(), 19);
    }

    #[test]
    fn test_no_duplicate_kinds_within_a_deck() {
        for deck in [chance_cards(), community_chest_cards()] {
            let unique: HashSet<Card> = deck.iter().copied().collect();
            assert_eq!(unique.len(), deck.len());
        }
    }

    #[test]
    fn test_draw_requeue_cycles() {
        let mut deck = Deck::new(DeckKind::Chance, vec![Card::PoorTax, Card::DoubleRent, Card::GoToJail]);
        for _ in 0..7 {
            let c = deck.draw().unwrap();
            deck.requeue(c);
            assert_eq!(deck.len(), 3);
        }
        // 7 draws over 3 cards: front is back to index 1
        assert_eq!(deck.peek(), Some(Card::DoubleRent));
    }

    #[test]
    fn test_effect_table_spot_checks() {
        assert_eq!(Card::BuildingLoanMatures.effect(), CardEffect::Bank(150));
        assert_eq!(Card::Birthday.effect(), CardEffect::AllOthers(10));
        assert_eq!(Card::ChairmanOfTheBoard.effect(), CardEffect::AllOthers(-50));
        assert_eq!(Card::TaxRefundChance.effect(), CardEffect::Bank(100));
        assert_eq!(Card::TaxRefundCommunityChest.effect(), CardEffect::Bank(75));
    }
}
