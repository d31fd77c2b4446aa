//! Ship catalog and placement geometry.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The fixed fleet catalog. Each type appears exactly once per fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipType {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipType {
    /// Ship length in cells.
    pub const fn size(self) -> usize {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Cruiser => 3,
            ShipType::Submarine => 3,
            ShipType::Destroyer => 2,
        }
    }

    /// Ship's name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "carrier",
            ShipType::Battleship => "battleship",
            ShipType::Cruiser => "cruiser",
            ShipType::Submarine => "submarine",
            ShipType::Destroyer => "destroyer",
        }
    }

    /// Position of this type in the catalog order.
    pub const fn index(self) -> usize {
        match self {
            ShipType::Carrier => 0,
            ShipType::Battleship => 1,
            ShipType::Cruiser => 2,
            ShipType::Submarine => 3,
            ShipType::Destroyer => 4,
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ship's position on a board: anchor coordinate plus orientation.
/// `(x, y)` is the first segment; the rest extend along the orientation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub ship: ShipType,
    pub orientation: Orientation,
    pub x: usize,
    pub y: usize,
}

impl Placement {
    pub fn new(ship: ShipType, orientation: Orientation, x: usize, y: usize) -> Self {
        Self {
            ship,
            orientation,
            x,
            y,
        }
    }

    /// Length of the occupied run, from the catalog.
    pub fn size(&self) -> usize {
        self.ship.size()
    }

    /// Occupied coordinates in segment order (index 0 is the anchor).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (x, y, orientation) = (self.x, self.y, self.orientation);
        (0..self.size()).map(move |i| match orientation {
            Orientation::Horizontal => (x + i, y),
            Orientation::Vertical => (x, y + i),
        })
    }
}
