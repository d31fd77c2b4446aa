//! Explicit match state threaded through all engine calls: both boards,
//! the active side, per-side tallies and the terminal result.

use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::common::{AttackOutcome, GameError};

/// The two participants. Each side owns the board its own fleet sits on;
/// an attack by one side resolves against the other side's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Human,
    Bot,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Bot,
            Side::Bot => Side::Human,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Bot => 1,
        }
    }
}

/// Who takes the first shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstMove {
    Human,
    Bot,
    Random,
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Placing,
    Playing,
    Over,
}

/// Per-side shot bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotTally {
    pub shots: u32,
    pub hits: u32,
    pub ships_sunk: u32,
}

impl ShotTally {
    pub fn accuracy(&self) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            f64::from(self.hits) / f64::from(self.shots)
        }
    }
}

/// Everything a caller needs to know about one resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireReport {
    pub attacker: Side,
    pub x: usize,
    pub y: usize,
    pub outcome: AttackOutcome,
    /// True when the turn passed to the defender (a miss). A hit keeps the
    /// attacker shooting.
    pub turn_passed: bool,
    pub winner: Option<Side>,
}

/// Trigger keys the narrative collaborator selects flavor text on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTrigger {
    Prologue,
    Turn,
    Hit,
    Miss,
}

impl FireReport {
    /// Trigger for the flavor-text collaborator.
    pub fn chat_trigger(&self) -> ChatTrigger {
        if self.outcome.is_hit() {
            ChatTrigger::Hit
        } else {
            ChatTrigger::Miss
        }
    }
}

/// Terminal aggregate produced once a fleet is eliminated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Side,
    pub human: ShotTally,
    pub bot: ShotTally,
    pub elapsed: Duration,
}

/// A full human-vs-bot match. Replaces the ambient mutable state of the
/// original UI with one value owning both boards and the turn order.
pub struct GameSession {
    boards: [Board; 2],
    tallies: [ShotTally; 2],
    active: Side,
    phase: MatchPhase,
    started_at: Option<Instant>,
    finished: Option<(Side, Duration)>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Fresh session with two empty boards, still in the placement phase.
    pub fn new() -> Self {
        GameSession {
            boards: [Board::default(), Board::default()],
            tallies: [ShotTally::default(); 2],
            active: Side::Human,
            phase: MatchPhase::Placing,
            started_at: None,
            finished: None,
        }
    }

    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    /// Mutable board access for the placement phase.
    pub fn board_mut(&mut self, side: Side) -> &mut Board {
        &mut self.boards[side.index()]
    }

    pub fn tally(&self, side: Side) -> &ShotTally {
        &self.tallies[side.index()]
    }

    pub fn active(&self) -> Side {
        self.active
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::Over
    }

    /// Trigger for the flavor-text collaborator between shots.
    pub fn chat_trigger(&self) -> ChatTrigger {
        match self.phase {
            MatchPhase::Placing => ChatTrigger::Prologue,
            _ => ChatTrigger::Turn,
        }
    }

    /// Randomly place both fleets.
    pub fn auto_deploy<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        for board in &mut self.boards {
            board.auto_place_fleet(rng)?;
        }
        Ok(())
    }

    /// Leave the placement phase. Fails with `FleetNotReady` while either
    /// side still has ships to place.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        first: FirstMove,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if !self.boards.iter().all(|b| b.fleet_ready()) {
            return Err(GameError::FleetNotReady);
        }
        self.active = match first {
            FirstMove::Human => Side::Human,
            FirstMove::Bot => Side::Bot,
            FirstMove::Random => {
                if rng.random() {
                    Side::Human
                } else {
                    Side::Bot
                }
            }
        };
        self.phase = MatchPhase::Playing;
        self.started_at = Some(Instant::now());
        log::info!("match started, {:?} shoots first", self.active);
        Ok(())
    }

    /// Fire the active side's shot at `(x, y)` on the opposing board.
    ///
    /// Resolution and win detection complete before this returns, so no
    /// two shots can ever race on a board. A repeat attack surfaces
    /// `AlreadyResolved` without consuming the turn.
    pub fn fire(&mut self, x: usize, y: usize) -> Result<FireReport, GameError> {
        match self.phase {
            MatchPhase::Placing => return Err(GameError::FleetNotReady),
            MatchPhase::Over => return Err(GameError::MatchOver),
            MatchPhase::Playing => {}
        }
        let attacker = self.active;
        let defender = attacker.opponent();
        let outcome = self.boards[defender.index()].resolve_attack(x, y)?;

        let tally = &mut self.tallies[attacker.index()];
        tally.shots += 1;
        if outcome.is_hit() {
            tally.hits += 1;
        }
        if outcome.sunk_ship().is_some() {
            tally.ships_sunk += 1;
        }

        let mut winner = None;
        let mut turn_passed = false;
        if self.boards[defender.index()].fleet_sunk() {
            self.phase = MatchPhase::Over;
            let elapsed = self
                .started_at
                .map(|t| t.elapsed())
                .unwrap_or_default();
            self.finished = Some((attacker, elapsed));
            winner = Some(attacker);
        } else if !outcome.is_hit() {
            self.active = defender;
            turn_passed = true;
        }
        log::debug!(
            "{:?} fired at ({}, {}): {:?}{}",
            attacker,
            x,
            y,
            outcome,
            if turn_passed { ", turn passes" } else { "" }
        );
        Ok(FireReport {
            attacker,
            x,
            y,
            outcome,
            turn_passed,
            winner,
        })
    }

    /// Terminal aggregate, available once a fleet has been eliminated.
    pub fn result(&self) -> Option<GameResult> {
        let (winner, elapsed) = self.finished?;
        Some(GameResult {
            winner,
            human: self.tallies[Side::Human.index()],
            bot: self.tallies[Side::Bot.index()],
            elapsed,
        })
    }
}
