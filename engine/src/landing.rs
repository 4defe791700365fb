// ═══════════════════════════════════════════════════════════════════════
// Landing effects — what happens when a token stops on a square
//
// Rules are tried in order; the first that applies wins:
//   1. Own it       → maybe build
//   2. Unowned deed → buy or auction
//   3. Owned deed   → pay rent
//   4. Card square  → draw, apply, requeue
//   5. Special      → tax / Go bonus / go to jail
// ═══════════════════════════════════════════════════════════════════════

use crate::auction;
use crate::cards::{self, DeckKind};
use crate::decision::{seat, Agents};
use crate::dice;
use crate::error::EngineError;
use crate::ledger::{self, Party};
use crate::types::*;
use crate::visibility::PlayerView;

/// Resolve `player` landing on `square`.
pub fn resolve(state: &mut GameState, agents: &mut Agents, player: PlayerId, square: SquareId) -> Result<(), EngineError> {
    let token = state.player(player)?.token.clone();
    let name = state.board.square(square).name.clone();

    // 1) Own property → maybe build
    if state.board.square(square).is_owned_by(player) {
        let build = seat(agents, player)?.decide_build_house(&PlayerView::new(state, player), square);
        if build && state.board.square(square).is_buildable() {
            build_house(state, player, square)?;
        }
        return Ok(());
    }

    // 2) Unowned property → buy or auction
    if let Some(price) = state.board.square(square).deed().filter(|d| d.owner.is_none()).map(|d| d.price) {
        let buy = seat(agents, player)?.decide_purchase(&PlayerView::new(state, player), square);
        if buy {
            ledger::buy(state, player, square, price)?;
            tracing::info!(turn = state.turn, player = %token, square = %name, price, "purchase");
            state.note(format!("{} buys {} for ${}", token, name, price));
        } else {
            auction::auction(state, agents, square)?;
        }
        return Ok(());
    }

    // 3) Owned by someone else → rent
    if let Some(owner) = state.board.square(square).owner() {
        pay_rent(state, player, owner, square)?;
        return Ok(());
    }

    // 4) Cards, 5) special squares
    match state.board.square(square).kind {
        SquareKind::Chance => cards::draw_and_apply(state, agents, player, DeckKind::Chance)?,
        SquareKind::CommunityChest => cards::draw_and_apply(state, agents, player, DeckKind::CommunityChest)?,
        SquareKind::Tax { amount } => {
            ledger::transfer(state, Party::Player(player), Party::Bank, amount)?;
            state.note(format!("{} pays ${} {}", token, amount, name));
        }
        SquareKind::Start { pass_bonus } => {
            ledger::transfer(state, Party::Bank, Party::Player(player), pass_bonus)?;
            state.note(format!("{} collects ${} on {}", token, pass_bonus, name));
        }
        SquareKind::GoToJail => send_to_jail(state, player)?,
        _ => {}
    }
    Ok(())
}

/// Rent the owner of `square` is currently entitled to. Utility rent
/// throws fresh dice, hence `&mut`.
pub fn rent_for(state: &mut GameState, square: SquareId) -> Money {
    let Some(deed) = state.board.square(square).deed() else {
        return 0;
    };
    let Some(owner) = deed.owner else {
        return 0;
    };
    let (rent, level, group) = (deed.rent, deed.level, deed.group);

    match rent {
        Rent::Tiered { tiers, monopoly } => {
            let has_monopoly = group.map_or(false, |g| state.has_monopoly(owner, g));
            if level == 0 && has_monopoly {
                monopoly
            } else {
                tiers[(level.min(MAX_LEVEL)) as usize]
            }
        }
        Rent::Station { base } => {
            let owned = state.stations_owned(owner).max(1);
            base << (owned - 1)
        }
        Rent::Utility { factor } => factor * dice::simple_amount(&mut state.rng),
    }
}

fn pay_rent(state: &mut GameState, player: PlayerId, owner: PlayerId, square: SquareId) -> Result<(), EngineError> {
    let mut rent = rent_for(state, square);
    let owner_entry = state.player_mut(owner)?;
    if owner_entry.double_rent {
        owner_entry.double_rent = false;
        rent *= 2;
        let owner_token = owner_entry.token.clone();
        state.note(format!("{}'s Double Rent: rent x2 = ${}", owner_token, rent));
    }
    ledger::transfer(state, Party::Player(player), Party::Player(owner), rent)?;

    let payer = state.player(player)?.token.clone();
    let payee = state.player(owner)?.token.clone();
    tracing::debug!(turn = state.turn, payer = %payer, payee = %payee, rent, "rent");
    state.note(format!("{} pays ${} rent to {}", payer, rent, payee));
    Ok(())
}

fn build_house(state: &mut GameState, player: PlayerId, square: SquareId) -> Result<(), EngineError> {
    let cost = state.board.square(square).deed().map_or(0, |d| d.building_cost);
    ledger::transfer(state, Party::Player(player), Party::Bank, cost)?;
    let Some(deed) = state.board.square_mut(square).deed_mut() else {
        return Ok(());
    };
    deed.level += 1;
    let level = deed.level;

    let token = state.player(player)?.token.clone();
    let name = state.board.square(square).name.clone();
    let what = if level == MAX_LEVEL { "a hotel".to_string() } else { format!("house {}", level) };
    tracing::info!(turn = state.turn, player = %token, square = %name, level, cost, "build");
    state.note(format!("{} builds {} on {} for ${}", token, what, name, cost));
    Ok(())
}

/// Place `player` on `target`. With `resolve_landing == false` this is the
/// "move without standard landing resolution" primitive that cards use when
/// they apply their own payment rule.
pub fn move_to(
    state: &mut GameState,
    agents: &mut Agents,
    player: PlayerId,
    target: SquareId,
    resolve_landing: bool,
) -> Result<(), EngineError> {
    let idx = state.index_of(player).ok_or(EngineError::UnknownPlayer(player))?;
    state.positions[idx] = target.index();
    let token = state.players[idx].token.clone();
    let name = state.board.square(target).name.clone();
    state.note(format!("{} moves to {}", token, name));

    if resolve_landing {
        resolve(state, agents, player, target)?;
    }
    Ok(())
}

/// Teleport to the Jail square and mark the player jailed. Nothing chains.
pub fn send_to_jail(state: &mut GameState, player: PlayerId) -> Result<(), EngineError> {
    let jail = state.board.jail().ok_or_else(|| EngineError::UnknownSquare("Jail".into()))?;
    let idx = state.index_of(player).ok_or(EngineError::UnknownPlayer(player))?;
    state.positions[idx] = jail.index();
    state.players[idx].jailed = true;
    let token = state.players[idx].token.clone();
    state.note(format!("{} goes directly to Jail", token));
    Ok(())
}
