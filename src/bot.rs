//! Bot targeting: a tick-driven wander/commit state machine.
//!
//! Each bot turn starts from a random probe cell and wanders across
//! 4-connected neighbors for a fixed budget of steps before committing to
//! a shot. The budget grows with consecutive hits, so the bot "thinks
//! longer" the hotter its streak. The committed coordinate is resampled
//! independently of the wander path; the wander is cosmetic, and changing
//! that would change game balance, so it stays.
//!
//! The machine only moves when `tick` is called, which makes it trivially
//! cancellable: stop ticking (or drop the gunner) and nothing further
//! touches the board.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::Board;
use crate::common::{AttackOutcome, GameError};
use crate::config::{BOT_BASE_STEPS, BOT_STEPS_PER_HIT};
use crate::session::{GameSession, Side};

/// What one scheduler tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotTick {
    /// The probe moved; purely cosmetic, no shot was taken.
    Wander { x: usize, y: usize },
    /// A shot was resolved at `(x, y)`.
    Shot {
        x: usize,
        y: usize,
        outcome: AttackOutcome,
    },
    /// The turn is over; stop ticking.
    TurnOver,
}

#[derive(Clone, Copy)]
enum Phase {
    Idle,
    Wandering {
        x: usize,
        y: usize,
        steps_taken: u32,
        budget: u32,
    },
    Done,
}

/// Per-turn targeting state for one side. Sees only revealed cells on the
/// opposing board, never the ship layout.
pub struct BotGunner {
    side: Side,
    consecutive_hits: u32,
    phase: Phase,
}

impl BotGunner {
    pub fn new(side: Side) -> Self {
        BotGunner {
            side,
            consecutive_hits: 0,
            phase: Phase::Idle,
        }
    }

    /// Wander steps before the shot commits: base plus an escalation per
    /// consecutive hit in the current turn.
    pub fn wander_budget(consecutive_hits: u32) -> u32 {
        BOT_BASE_STEPS + consecutive_hits * BOT_STEPS_PER_HIT
    }

    pub fn consecutive_hits(&self) -> u32 {
        self.consecutive_hits
    }

    /// Reset turn state and pick a random starting probe.
    pub fn start_turn<R: Rng + ?Sized>(&mut self, session: &GameSession, rng: &mut R) {
        self.consecutive_hits = 0;
        let n = session.board(self.side.opponent()).size();
        self.phase = Phase::Wandering {
            x: rng.random_range(0..n),
            y: rng.random_range(0..n),
            steps_taken: 0,
            budget: Self::wander_budget(0),
        };
    }

    /// Advance the machine one step. Returns `TurnOver` once the turn has
    /// ended, it is not this side's turn, or the match is over.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        session: &mut GameSession,
        rng: &mut R,
    ) -> Result<BotTick, GameError> {
        if session.is_over() || session.active() != self.side {
            self.phase = Phase::Done;
        }
        match self.phase {
            Phase::Idle | Phase::Done => Ok(BotTick::TurnOver),
            Phase::Wandering {
                x,
                y,
                steps_taken,
                budget,
            } if steps_taken < budget => {
                let n = session.board(self.side.opponent()).size();
                let (x, y) = wander_step(x, y, n, rng);
                self.phase = Phase::Wandering {
                    x,
                    y,
                    steps_taken: steps_taken + 1,
                    budget,
                };
                Ok(BotTick::Wander { x, y })
            }
            Phase::Wandering { .. } => self.commit(session, rng),
        }
    }

    fn commit<R: Rng + ?Sized>(
        &mut self,
        session: &mut GameSession,
        rng: &mut R,
    ) -> Result<BotTick, GameError> {
        let target = match sample_target(session.board(self.side.opponent()), rng) {
            Some(t) => t,
            None => {
                // Every cell is resolved; the match cannot continue.
                self.phase = Phase::Done;
                return Ok(BotTick::TurnOver);
            }
        };
        let (x, y) = target;
        let report = session.fire(x, y)?;
        if report.outcome.is_hit() {
            self.consecutive_hits += 1;
            if session.is_over() {
                self.phase = Phase::Done;
            } else {
                let n = session.board(self.side.opponent()).size();
                self.phase = Phase::Wandering {
                    x: rng.random_range(0..n),
                    y: rng.random_range(0..n),
                    steps_taken: 0,
                    budget: Self::wander_budget(self.consecutive_hits),
                };
            }
        } else {
            self.consecutive_hits = 0;
            self.phase = Phase::Done;
        }
        Ok(BotTick::Shot {
            x,
            y,
            outcome: report.outcome,
        })
    }
}

/// Move the probe to a uniformly random in-bounds 4-connected neighbor.
fn wander_step<R: Rng + ?Sized>(x: usize, y: usize, n: usize, rng: &mut R) -> (usize, usize) {
    let mut neighbors = [(0usize, 0usize); 4];
    let mut count = 0;
    if x > 0 {
        neighbors[count] = (x - 1, y);
        count += 1;
    }
    if x + 1 < n {
        neighbors[count] = (x + 1, y);
        count += 1;
    }
    if y > 0 {
        neighbors[count] = (x, y - 1);
        count += 1;
    }
    if y + 1 < n {
        neighbors[count] = (x, y + 1);
        count += 1;
    }
    neighbors[..count].choose(rng).copied().unwrap_or((x, y))
}

/// Pick a uniformly random unattacked cell, re-rolling any coordinate that
/// already resolved rather than wasting the shot. Returns `None` when no
/// unattacked cell remains.
fn sample_target<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    if board.unresolved_cells() == 0 {
        return None;
    }
    let n = board.size();
    loop {
        let x = rng.random_range(0..n);
        let y = rng.random_range(0..n);
        if !board.resolved(x, y).unwrap_or(true) {
            return Some((x, y));
        }
    }
}
