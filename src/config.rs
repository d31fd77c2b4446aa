use crate::ship::ShipType;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::Carrier,
    ShipType::Battleship,
    ShipType::Cruiser,
    ShipType::Submarine,
    ShipType::Destroyer,
];
/// Cells occupied by a complete fleet (5 + 4 + 3 + 3 + 2).
pub const TOTAL_SHIP_CELLS: usize = 17;

/// Random samples tried per ship before automatic placement gives up.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Wander steps the bot takes before committing to a shot.
pub const BOT_BASE_STEPS: u32 = 5;
/// Extra wander steps granted per consecutive hit within one turn.
pub const BOT_STEPS_PER_HIT: u32 = 2;
