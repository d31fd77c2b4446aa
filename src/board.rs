//! Board grid state: placement legality, fleet placement, attack
//! resolution and win detection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::{AttackOutcome, GameError};
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS, PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, Placement, ShipType};

/// State of a single grid cell. Ship and hit cells retain the owning ship
/// and the segment index so nothing is lost when a cell is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Ship { ship: ShipType, segment: u8 },
    Hit { ship: ShipType, segment: u8 },
    Miss,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// True once the cell has been attacked (hit or miss).
    pub fn is_resolved(&self) -> bool {
        matches!(self, Cell::Hit { .. } | Cell::Miss)
    }

    /// Owning ship for ship and hit cells.
    pub fn ship(&self) -> Option<ShipType> {
        match self {
            Cell::Ship { ship, .. } | Cell::Hit { ship, .. } => Some(*ship),
            _ => None,
        }
    }
}

/// One player's n×n grid plus the record of where each fleet ship sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    placements: [Option<Placement>; NUM_SHIPS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_SIZE)
    }
}

impl Board {
    /// Create an empty n×n board with no ships placed.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
            placements: [None; NUM_SHIPS],
        }
    }

    /// Board dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), GameError> {
        if x >= self.size || y >= self.size {
            return Err(GameError::OutOfBounds { x, y });
        }
        Ok(())
    }

    /// Cell state at `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Result<Cell, GameError> {
        self.check_bounds(x, y)?;
        Ok(self.cells[y * self.size + x])
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.size + x] = cell;
    }

    /// True when `(x, y)` was already attacked.
    pub fn resolved(&self, x: usize, y: usize) -> Result<bool, GameError> {
        Ok(self.cell(x, y)?.is_resolved())
    }

    /// Where `ship` currently sits, if placed.
    pub fn placement(&self, ship: ShipType) -> Option<&Placement> {
        self.placements[ship.index()].as_ref()
    }

    /// Per-type count of ships still waiting to be placed, in catalog
    /// order. All zeros means the fleet is ready.
    pub fn remaining_to_place(&self) -> [u8; NUM_SHIPS] {
        let mut counts = [0u8; NUM_SHIPS];
        for (i, slot) in self.placements.iter().enumerate() {
            if slot.is_none() {
                counts[i] = 1;
            }
        }
        counts
    }

    /// True once every catalog ship is on the board.
    pub fn fleet_ready(&self) -> bool {
        self.placements.iter().all(|p| p.is_some())
    }

    /// Check whether `placement` may legally occupy this board.
    ///
    /// Rejects runs that leave the grid, then scans the footprint expanded
    /// by one cell on every side (clipped to the grid): any non-empty cell
    /// in that zone rejects the placement, so ships can never touch, even
    /// diagonally. Cells belonging to `own` are exempt, which lets a ship
    /// be re-dropped over its previous footprint while repositioning.
    pub fn placement_allowed(&self, placement: &Placement, own: Option<ShipType>) -> bool {
        let size = placement.size();
        // subtraction form so absurd anchors reject instead of overflowing
        let fits = placement.x < self.size
            && placement.y < self.size
            && match placement.orientation {
                Orientation::Horizontal => size <= self.size - placement.x,
                Orientation::Vertical => size <= self.size - placement.y,
            };
        if !fits {
            return false;
        }

        let (x, y) = (placement.x, placement.y);
        let (run_x, run_y) = match placement.orientation {
            Orientation::Horizontal => (size, 1),
            Orientation::Vertical => (1, size),
        };
        let row_end = (y + run_y).min(self.size - 1);
        let col_end = (x + run_x).min(self.size - 1);
        for row in y.saturating_sub(1)..=row_end {
            for col in x.saturating_sub(1)..=col_end {
                let cell = self.cells[row * self.size + col];
                if cell.is_empty() {
                    continue;
                }
                if own.is_some() && cell.ship() == own {
                    continue;
                }
                return false;
            }
        }
        true
    }

    /// Place (or reposition) a ship.
    ///
    /// If the same ship type is already on the board, its old cells are
    /// cleared first; a ship can therefore pass through its own previous
    /// footprint without self-collision. When the new spot is illegal the
    /// old placement is *not* restored and the ship is left off the board,
    /// matching the drag-and-drop semantics this engine was built for.
    pub fn place_ship(&mut self, placement: Placement) -> Result<(), GameError> {
        let ship = placement.ship;
        if let Some(old) = self.placements[ship.index()].take() {
            for (x, y) in old.cells() {
                self.set(x, y, Cell::Empty);
            }
        }
        if !self.placement_allowed(&placement, Some(ship)) {
            return Err(GameError::IllegalPlacement(ship));
        }
        for (segment, (x, y)) in placement.cells().enumerate() {
            self.set(
                x,
                y,
                Cell::Ship {
                    ship,
                    segment: segment as u8,
                },
            );
        }
        self.placements[ship.index()] = Some(placement);
        Ok(())
    }

    /// Take a ship off the board, restoring its cells to empty. Returns
    /// false if the ship was not placed.
    pub fn remove_ship(&mut self, ship: ShipType) -> bool {
        match self.placements[ship.index()].take() {
            Some(old) => {
                for (x, y) in old.cells() {
                    self.set(x, y, Cell::Empty);
                }
                true
            }
            None => false,
        }
    }

    /// Sample a random legal placement for `ship` without applying it.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship: ShipType,
    ) -> Result<Placement, GameError> {
        let size = ship.size();
        if size > self.size {
            return Err(GameError::PlacementExhausted(ship));
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (x, y) = match orientation {
                Orientation::Horizontal => (
                    rng.random_range(0..=self.size - size),
                    rng.random_range(0..self.size),
                ),
                Orientation::Vertical => (
                    rng.random_range(0..self.size),
                    rng.random_range(0..=self.size - size),
                ),
            };
            let candidate = Placement::new(ship, orientation, x, y);
            if self.placement_allowed(&candidate, Some(ship)) {
                return Ok(candidate);
            }
        }
        Err(GameError::PlacementExhausted(ship))
    }

    /// Place the whole catalog fleet at random, repositioning any ships
    /// already on the board. Exhausting the attempt budget for any ship is
    /// surfaced, never swallowed: the fleet is then known to be incomplete.
    pub fn auto_place_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        for ship in FLEET {
            self.remove_ship(ship);
            let placement = self.random_placement(rng, ship)?;
            self.place_ship(placement)?;
            log::debug!(
                "auto-placed {} at ({}, {}) {:?}",
                ship,
                placement.x,
                placement.y,
                placement.orientation
            );
        }
        Ok(())
    }

    /// Resolve one attack at `(x, y)`.
    ///
    /// A previously attacked cell is rejected with `AlreadyResolved` and
    /// leaves the board untouched. A ship cell becomes a hit, and `sunk`
    /// reports whether this hit completed the ship. An empty cell becomes
    /// a miss.
    pub fn resolve_attack(&mut self, x: usize, y: usize) -> Result<AttackOutcome, GameError> {
        match self.cell(x, y)? {
            Cell::Hit { .. } | Cell::Miss => Err(GameError::AlreadyResolved),
            Cell::Ship { ship, segment } => {
                self.set(x, y, Cell::Hit { ship, segment });
                let sunk = self.hits_on(ship) == ship.size();
                Ok(AttackOutcome::Hit {
                    ship,
                    segment,
                    sunk,
                })
            }
            Cell::Empty => {
                self.set(x, y, Cell::Miss);
                Ok(AttackOutcome::Miss)
            }
        }
    }

    /// Count of hit cells tagged with `ship`.
    pub fn hits_on(&self, ship: ShipType) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Hit { ship: s, .. } if *s == ship))
            .count()
    }

    /// True when every segment of `ship` has been hit.
    pub fn is_sunk(&self, ship: ShipType) -> bool {
        self.hits_on(ship) == ship.size()
    }

    /// Win detection: true when all catalog ships on this board are sunk.
    /// A ship that was never placed keeps this false.
    pub fn fleet_sunk(&self) -> bool {
        FLEET.iter().all(|&ship| self.is_sunk(ship))
    }

    /// Cells that have not been attacked yet.
    pub fn unresolved_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_resolved()).count()
    }
}
