// ═══════════════════════════════════════════════════════════════════════
// Standard board — 40 squares, 8 colour groups, 4 stations, 2 utilities
// Built fresh for every game so no two games share deed state.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::*;

pub const TOKENS: [&str; 8] = [
    "Scottish Terrier",
    "Battleship",
    "Automobile",
    "Top Hat",
    "Thimble",
    "Shoe",
    "Wheelbarrow",
    "Cat",
];

pub const PASS_GO_BONUS: Money = 200;
pub const INCOME_TAX: Money = 200;
pub const LUXURY_TAX: Money = 100;
pub const STATION_PRICE: Money = 200;
pub const STATION_BASE_RENT: Money = 25;
pub const UTILITY_PRICE: Money = 150;
pub const UTILITY_RENT_FACTOR: Money = 4;

const GROUP_NAMES: [&str; 8] = [
    "Brown Group",
    "Light Blue Group",
    "Pink Group",
    "Orange Group",
    "Red Group",
    "Yellow Group",
    "Green Group",
    "Dark Blue Group",
];

// ── Square helpers ─────────────────────────────────────────────────────

fn street(
    name: &str,
    price: Money,
    group: u8,
    tiers: [Money; 6],
    monopoly: Money,
    mortgage: Money,
    building_cost: Money,
) -> Square {
    let mut deed = Deed::new(price, Rent::Tiered { tiers, monopoly });
    deed.group = Some(GroupId(group));
    deed.mortgage = mortgage;
    deed.building_cost = building_cost;
    Square::new(name, SquareKind::Property(deed))
}

fn station(name: &str) -> Square {
    Square::new(name, SquareKind::TrainStation(Deed::new(
        STATION_PRICE,
        Rent::Station { base: STATION_BASE_RENT },
    )))
}

fn utility(name: &str) -> Square {
    Square::new(name, SquareKind::Utility(Deed::new(
        UTILITY_PRICE,
        Rent::Utility { factor: UTILITY_RENT_FACTOR },
    )))
}

fn plain(name: &str, kind: SquareKind) -> Square {
    Square::new(name, kind)
}

/// Derive group membership from the `group` field of each street.
pub fn groups_for(squares: &[Square], names: &[&str]) -> Vec<PropertyGroup> {
    names.iter().enumerate()
        .map(|(gi, name)| PropertyGroup {
            name: name.to_string(),
            members: squares.iter().enumerate()
                .filter(|(_, s)| s.deed().and_then(|d| d.group) == Some(GroupId(gi as u8)))
                .map(|(i, _)| SquareId(i as u8))
                .collect(),
        })
        .collect()
}

pub fn standard_board() -> Board {
    use SquareKind::*;
    let squares = vec![
        plain("Go", Start { pass_bonus: PASS_GO_BONUS }),
        street("Mediterranean Avenue", 60, 0, [2, 10, 30, 90, 160, 250], 2, 30, 50),
        plain("Community Chest", CommunityChest),
        street("Baltic Avenue", 60, 0, [4, 20, 60, 180, 320, 450], 8, 30, 50),
        plain("Income Tax", Tax { amount: INCOME_TAX }),
        station("Reading Railroad"),
        street("Oriental Avenue", 100, 1, [6, 30, 90, 270, 400, 550], 12, 50, 50),
        plain("Chance", Chance),
        street("Vermont Avenue", 100, 1, [6, 30, 90, 270, 400, 550], 12, 50, 50),
        street("Connecticut Avenue", 120, 1, [8, 40, 100, 300, 450, 600], 16, 60, 50),
        plain("Jail", Jail),
        street("St. Charles Place", 140, 2, [10, 50, 150, 450, 625, 750], 20, 70, 100),
        utility("Electric Company"),
        street("States Avenue", 140, 2, [10, 50, 150, 450, 625, 750], 20, 70, 100),
        street("Virginia Avenue", 160, 2, [12, 60, 180, 500, 700, 900], 24, 80, 100),
        station("Pennsylvania Railroad"),
        street("St. James Place", 180, 3, [14, 70, 200, 550, 750, 950], 28, 90, 100),
        plain("Community Chest", CommunityChest),
        street("Tennessee Avenue", 180, 3, [14, 70, 200, 550, 750, 950], 28, 90, 100),
        street("New York Avenue", 200, 3, [16, 80, 220, 600, 800, 1000], 32, 90, 100),
        plain("Free Parking", FreeParking),
        street("Kentucky Avenue", 220, 4, [18, 90, 250, 700, 875, 1050], 36, 110, 150),
        plain("Chance", Chance),
        street("Indiana Avenue", 220, 4, [18, 90, 250, 700, 875, 1050], 36, 110, 150),
        street("Illinois Avenue", 240, 4, [20, 100, 300, 750, 925, 1100], 40, 120, 150),
        station("B. & O. Railroad"),
        street("Atlantic Avenue", 260, 5, [22, 110, 330, 800, 975, 1150], 44, 130, 150),
        street("Ventnor Avenue", 260, 5, [22, 110, 330, 800, 975, 1150], 44, 130, 150),
        utility("Water Works"),
        street("Marvin Gardens", 280, 5, [24, 120, 360, 850, 1025, 1200], 48, 140, 150),
        plain("Go To Jail", GoToJail),
        street("Pacific Avenue", 300, 6, [26, 130, 390, 900, 1100, 1275], 52, 150, 200),
        street("North Carolina Avenue", 300, 6, [26, 130, 390, 900, 1100, 1275], 52, 150, 200),
        plain("Community Chest", CommunityChest),
        street("Pennsylvania Avenue", 320, 6, [28, 150, 450, 1000, 1200, 1400], 56, 160, 200),
        station("Short Line"),
        plain("Chance", Chance),
        street("Park Place", 350, 7, [35, 175, 500, 1100, 1300, 1500], 70, 175, 200),
        plain("Luxury Tax", Tax { amount: LUXURY_TAX }),
        street("Boardwalk", 400, 7, [50, 200, 600, 1400, 1700, 2000], 100, 200, 200),
    ];
    let groups = groups_for(&squares, &GROUP_NAMES);
    Board { squares, groups }
}
