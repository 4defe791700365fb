// ═══════════════════════════════════════════════════════════════════════
// Core types — squares, deeds, players and the full game state
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::Deck;
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::ledger::LedgerTotals;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed cash amount. Balances may go negative until the end-of-turn
/// bankruptcy check.
pub type Money = i64;

/// Highest building level: 1–4 are houses, 5 is a hotel.
pub const MAX_LEVEL: u8 = 5;

// ── Identifiers ────────────────────────────────────────────────────────

/// Stable player identifier. Survives roster shrinkage, unlike indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Index into `Board::squares`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct SquareId(pub u8);

impl SquareId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into `Board::groups`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u8);

// ── Deeds ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rent {
    /// Street rent indexed by building level. `monopoly` replaces
    /// `tiers[0]` when the owner holds the whole group.
    Tiered { tiers: [Money; 6], monopoly: Money },
    /// `base` doubled for every additional station the owner holds.
    Station { base: Money },
    /// Fresh two-dice throw multiplied by `factor`.
    Utility { factor: Money },
}

/// Title data shared by every purchasable square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deed {
    pub price: Money,
    pub mortgage: Money,
    pub owner: Option<PlayerId>,
    pub rent: Rent,
    pub group: Option<GroupId>,
    pub building_cost: Money,
    pub level: u8,
}

impl Deed {
    pub fn new(price: Money, rent: Rent) -> Self {
        Deed {
            price,
            mortgage: price / 2,
            owner: None,
            rent,
            group: None,
            building_cost: 0,
            level: 0,
        }
    }

    pub fn houses(&self) -> u32 {
        if self.level < MAX_LEVEL { self.level as u32 } else { 0 }
    }

    pub fn hotels(&self) -> u32 {
        if self.level == MAX_LEVEL { 1 } else { 0 }
    }
}

// ── Squares ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquareKind {
    Start { pass_bonus: Money },
    Property(Deed),
    TrainStation(Deed),
    Utility(Deed),
    Chance,
    CommunityChest,
    Tax { amount: Money },
    FreeParking,
    Jail,
    GoToJail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub name: String,
    pub kind: SquareKind,
}

impl Square {
    pub fn new(name: impl Into<String>, kind: SquareKind) -> Self {
        Square { name: name.into(), kind }
    }

    /// Rent-collector capability: present on properties, stations and utilities.
    pub fn deed(&self) -> Option<&Deed> {
        match &self.kind {
            SquareKind::Property(d) | SquareKind::TrainStation(d) | SquareKind::Utility(d) => Some(d),
            _ => None,
        }
    }

    pub fn deed_mut(&mut self) -> Option<&mut Deed> {
        match &mut self.kind {
            SquareKind::Property(d) | SquareKind::TrainStation(d) | SquareKind::Utility(d) => Some(d),
            _ => None,
        }
    }

    /// Tax-payer capability.
    pub fn tax(&self) -> Option<Money> {
        match self.kind {
            SquareKind::Tax { amount } => Some(amount),
            _ => None,
        }
    }

    pub fn pass_bonus(&self) -> Option<Money> {
        match self.kind {
            SquareKind::Start { pass_bonus } => Some(pass_bonus),
            _ => None,
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.deed().and_then(|d| d.owner)
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner() == Some(player)
    }

    pub fn can_be_bought(&self) -> bool {
        self.deed().map_or(false, |d| d.owner.is_none())
    }

    /// Only streets carry buildings.
    pub fn is_buildable(&self) -> bool {
        matches!(&self.kind, SquareKind::Property(d) if d.level < MAX_LEVEL)
    }

    pub fn is_station(&self) -> bool {
        matches!(self.kind, SquareKind::TrainStation(_))
    }

    pub fn is_utility(&self) -> bool {
        matches!(self.kind, SquareKind::Utility(_))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub name: String,
    pub members: Vec<SquareId>,
}

// ── Board ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub squares: Vec<Square>,
    pub groups: Vec<PropertyGroup>,
}

impl Board {
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn square(&self, id: SquareId) -> &Square {
        &self.squares[id.index()]
    }

    /// Checked bounds for ids that come from outside the engine.
    pub fn contains(&self, id: SquareId) -> bool {
        id.index() < self.squares.len()
    }

    pub fn square_mut(&mut self, id: SquareId) -> &mut Square {
        &mut self.squares[id.index()]
    }

    pub fn group(&self, id: GroupId) -> &PropertyGroup {
        &self.groups[id.0 as usize]
    }

    pub fn index_by_name(&self, name: &str) -> Result<SquareId, EngineError> {
        self.squares.iter()
            .position(|s| s.name == name)
            .map(|i| SquareId(i as u8))
            .ok_or_else(|| EngineError::UnknownSquare(name.to_string()))
    }

    /// First square (from index 0) matching `pred`.
    pub fn find(&self, pred: impl Fn(&Square) -> bool) -> Option<SquareId> {
        self.squares.iter().position(pred).map(|i| SquareId(i as u8))
    }

    /// Next square strictly after `from`, walking forward and wrapping.
    pub fn nearest_after(&self, from: usize, pred: impl Fn(&Square) -> bool) -> Option<SquareId> {
        let n = self.len();
        (1..=n)
            .map(|step| (from + step) % n)
            .find(|&i| pred(&self.squares[i]))
            .map(|i| SquareId(i as u8))
    }

    pub fn jail(&self) -> Option<SquareId> {
        self.find(|s| matches!(s.kind, SquareKind::Jail))
    }

    pub fn start(&self) -> Option<SquareId> {
        self.find(|s| matches!(s.kind, SquareKind::Start { .. }))
    }
}

// ── Players ────────────────────────────────────────────────────────────

/// Cards a player keeps instead of resolving immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetainedCard {
    GetOutOfJailFree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub token: String,
    pub cash: Money,
    pub properties: Vec<SquareId>,
    pub cards: Vec<RetainedCard>,
    pub skip_next_turns: u32,
    pub double_rent: bool,
    pub jailed: bool,
}

impl Player {
    pub fn new(id: PlayerId, token: impl Into<String>, cash: Money) -> Self {
        Player {
            id,
            token: token.into(),
            cash,
            properties: Vec::new(),
            cards: Vec::new(),
            skip_next_turns: 0,
            double_rent: false,
            jailed: false,
        }
    }

    pub fn owns(&self, square: SquareId) -> bool {
        self.properties.contains(&square)
    }

    pub fn add_card(&mut self, card: RetainedCard) {
        self.cards.push(card);
    }

    pub fn has_card(&self, card: RetainedCard) -> bool {
        self.cards.contains(&card)
    }

    /// Remove a held card. Callers check `has_card` first; asking for a
    /// card the player does not hold is a lookup failure.
    pub fn take_card(&mut self, card: RetainedCard) -> Result<RetainedCard, EngineError> {
        let pos = self.cards.iter()
            .position(|&c| c == card)
            .ok_or(EngineError::CardNotHeld { player: self.id, card })?;
        Ok(self.cards.remove(pos))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${})", self.token, self.cash)
    }
}

// ── Game State ─────────────────────────────────────────────────────────

/// Complete engine state for one game instance. Everything a snapshot
/// needs, the RNG included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub board: Board,
    /// Turn order. Shrinks on bankruptcy, never grows.
    pub players: Vec<Player>,
    /// Index-aligned with `players`.
    pub positions: Vec<usize>,
    pub current: usize,
    pub chance: Deck,
    pub community_chest: Deck,
    pub ledger: LedgerTotals,
    pub rng: ChaCha8Rng,
    pub turn: u32,
    pub last_roll: (u8, u8),
    pub last_action: String,
    /// Messages produced during the most recent turn.
    pub events: Vec<String>,
    /// Sum of starting balances, for conservation checks.
    pub initial_cash_total: Money,
    /// Players removed so far, oldest first.
    #[serde(default)]
    pub bankruptcies: Vec<Bankruptcy>,
}

/// A player as they stood when removed: balance still negative, titles
/// not yet released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bankruptcy {
    pub turn: u32,
    pub player: Player,
}

impl GameState {
    pub fn index_of(&self, player: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player)
    }

    pub fn player(&self, player: PlayerId) -> Result<&Player, EngineError> {
        self.players.iter()
            .find(|p| p.id == player)
            .ok_or(EngineError::UnknownPlayer(player))
    }

    pub fn player_mut(&mut self, player: PlayerId) -> Result<&mut Player, EngineError> {
        self.players.iter_mut()
            .find(|p| p.id == player)
            .ok_or(EngineError::UnknownPlayer(player))
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    pub fn position_of(&self, player: PlayerId) -> Option<usize> {
        self.index_of(player).map(|i| self.positions[i])
    }

    /// The sole survivor, once only one player remains.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.players.as_slice() {
            [last] => Some(last.id),
            _ => None,
        }
    }

    pub fn total_cash(&self) -> Money {
        self.players.iter().map(|p| p.cash).sum()
    }

    /// Whether `player` owns every member of `group`.
    pub fn has_monopoly(&self, player: PlayerId, group: GroupId) -> bool {
        let members = &self.board.group(group).members;
        !members.is_empty() && members.iter().all(|&sq| self.board.square(sq).is_owned_by(player))
    }

    pub fn stations_owned(&self, player: PlayerId) -> u32 {
        self.board.squares.iter()
            .filter(|s| s.is_station() && s.is_owned_by(player))
            .count() as u32
    }

    /// (houses, hotels) across everything `player` owns.
    pub fn buildings_of(&self, player: PlayerId) -> (u32, u32) {
        self.board.squares.iter()
            .filter(|s| s.is_owned_by(player))
            .filter_map(|s| s.deed())
            .fold((0, 0), |(h, t), d| (h + d.houses(), t + d.hotels()))
    }

    /// Record a turn event for the presentation layer.
    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(turn = self.turn, "{}", message);
        self.events.push(message);
    }
}
