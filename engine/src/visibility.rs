// ═══════════════════════════════════════════════════════════════════════
// Player view — what a decision maker is allowed to read
//
// Everything on the table is public: the board, ownership, building levels,
// positions, cash and held cards of every player. Deck order is hidden;
// only deck sizes are exposed.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::*;

#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    state: &'a GameState,
    pub viewer: PlayerId,
}

impl<'a> PlayerView<'a> {
    pub fn new(state: &'a GameState, viewer: PlayerId) -> Self {
        PlayerView { state, viewer }
    }

    pub fn me(&self) -> Option<&'a Player> {
        self.state.player(self.viewer).ok()
    }

    pub fn my_cash(&self) -> Money {
        self.me().map_or(0, |p| p.cash)
    }

    pub fn players(&self) -> &'a [Player] {
        &self.state.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&'a Player> {
        self.state.player(id).ok()
    }

    pub fn board(&self) -> &'a Board {
        &self.state.board
    }

    pub fn square(&self, id: SquareId) -> &'a Square {
        self.state.board.square(id)
    }

    pub fn position_of(&self, id: PlayerId) -> Option<usize> {
        self.state.position_of(id)
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn has_monopoly(&self, id: PlayerId, group: GroupId) -> bool {
        self.state.has_monopoly(id, group)
    }

    /// How many members of `group` `id` owns.
    pub fn owned_in_group(&self, id: PlayerId, group: GroupId) -> usize {
        self.state.board.group(group).members.iter()
            .filter(|&&sq| self.state.board.square(sq).is_owned_by(id))
            .count()
    }

    pub fn chance_cards_remaining(&self) -> usize {
        self.state.chance.len()
    }

    pub fn community_chest_cards_remaining(&self) -> usize {
        self.state.community_chest.len()
    }
}
