// ═══════════════════════════════════════════════════════════════════════
// Dice — two independent uniform six-sided dice from the game RNG
// ═══════════════════════════════════════════════════════════════════════

use crate::types::Money;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Throw {
    pub first: u8,
    pub second: u8,
}

impl Throw {
    pub fn roll(rng: &mut impl Rng) -> Self {
        Throw {
            first: rng.gen_range(1..=6),
            second: rng.gen_range(1..=6),
        }
    }

    pub fn total(self) -> usize {
        (self.first + self.second) as usize
    }

    pub fn is_double(self) -> bool {
        self.first == self.second
    }

    pub fn faces(self) -> (u8, u8) {
        (self.first, self.second)
    }
}

/// Quick two-dice total without keeping the faces. Used by utility rent.
pub fn simple_amount(rng: &mut impl Rng) -> Money {
    Throw::roll(rng).total() as Money
}
