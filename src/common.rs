//! Common engine types: error taxonomy and attack outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ship::ShipType;

/// Result of resolving one shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Shot struck a ship segment. `sunk` is true when this hit completed
    /// the ship.
    Hit {
        ship: ShipType,
        segment: u8,
        sunk: bool,
    },
    /// Shot landed on open water.
    Miss,
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Hit { .. })
    }

    /// Ship type sunk by this shot, if any.
    pub fn sunk_ship(&self) -> Option<ShipType> {
        match self {
            AttackOutcome::Hit {
                ship, sunk: true, ..
            } => Some(*ship),
            _ => None,
        }
    }
}

/// Errors returned by engine operations. All are locally recoverable: the
/// caller may retry, re-roll, or prompt for new input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate outside the grid; rejected before any mutation.
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    /// Placement leaves the grid or violates the one-cell buffer rule.
    #[error("placement of {0} is out of bounds or touches another ship")]
    IllegalPlacement(ShipType),
    /// The cell was already attacked; no state change, no turn consumed.
    #[error("cell was already attacked")]
    AlreadyResolved,
    /// Automatic placement found no legal spot within the attempt budget.
    #[error("no legal placement found for {0} within the attempt budget")]
    PlacementExhausted(ShipType),
    /// The match was started before both fleets were fully placed.
    #[error("both fleets must be fully placed before the match starts")]
    FleetNotReady,
    /// A shot was fired after the match already ended.
    #[error("the match is already over")]
    MatchOver,
}
