//! # Per-Player Ledger
//!
//! One ledger per player: the append-only scan log, the set of puzzles
//! ever first-scored, and the cached progress aggregate.
//!
//! ## Invariants Enforced
//!
//! - The scan log only grows; rows are never rewritten
//! - `aggregate.total_points` = sum of points over the scored set
//! - `aggregate.unique_puzzles` = scored set size
//! - `aggregate.total_scans` = scan log length
//! - `start_time` is set by the seeding scan and never moves
//! - `end_time` is set exactly once by an explicit completion
//!
//! The classify/mutate sequence in `record_scan` is pure and
//! single-threaded; the storage adapter wraps it in the per-player
//! mutual-exclusion scope that makes it atomic under concurrent requests.

use super::errors::GameError;
use hunt_types::{PlayerId, ProgressAggregate, PuzzleId, ScanEvent, Timestamp};
use std::collections::BTreeSet;

/// Outcome of one committed scan.
#[derive(Debug, Clone)]
pub struct ScanCommit {
    /// The log row appended for this scan.
    pub event: ScanEvent,
    /// Whether this was the player's first scan of the puzzle.
    pub first_scan: bool,
    /// The aggregate as of this commit.
    pub aggregate: ProgressAggregate,
}

/// A player's scan history and derived totals.
#[derive(Debug, Clone)]
pub struct PlayerLedger {
    player: PlayerId,
    events: Vec<ScanEvent>,
    scored: BTreeSet<PuzzleId>,
    aggregate: Option<ProgressAggregate>,
}

impl PlayerLedger {
    /// Creates an empty ledger for a player.
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            events: Vec::new(),
            scored: BTreeSet::new(),
            aggregate: None,
        }
    }

    /// The player this ledger belongs to.
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Records one verified scan: appends the log row, classifies
    /// first-vs-repeat, and folds the result into the aggregate.
    ///
    /// The first ever scan seeds the aggregate; repeats advance
    /// `total_scans` only.
    pub fn record_scan(&mut self, puzzle: PuzzleId, points: u64, now: Timestamp) -> ScanCommit {
        let event = ScanEvent::new(self.player, puzzle, now);
        self.events.push(event.clone());

        let first_scan = self.scored.insert(puzzle);
        let aggregate = match self.aggregate.as_mut() {
            None => {
                let seeded = ProgressAggregate::seeded(points, now);
                self.aggregate = Some(seeded.clone());
                seeded
            }
            Some(agg) => {
                agg.apply_scan(first_scan, points);
                agg.clone()
            }
        };

        ScanCommit {
            event,
            first_scan,
            aggregate,
        }
    }

    /// Marks the run completed, setting `end_time` exactly once.
    ///
    /// # Errors
    ///
    /// - `NoProgress` if no scan was ever committed
    /// - `AlreadyCompleted` if completion already happened
    pub fn complete(&mut self, now: Timestamp) -> Result<ProgressAggregate, GameError> {
        match self.aggregate.as_mut() {
            None => Err(GameError::NoProgress(self.player)),
            Some(agg) if agg.is_completed => Err(GameError::AlreadyCompleted(self.player)),
            Some(agg) => {
                agg.is_completed = true;
                agg.end_time = Some(now);
                Ok(agg.clone())
            }
        }
    }

    /// The aggregate, if any scan was ever committed.
    pub fn aggregate(&self) -> Option<&ProgressAggregate> {
        self.aggregate.as_ref()
    }

    /// Full scan log, in commit order.
    pub fn events(&self) -> &[ScanEvent] {
        &self.events
    }

    /// How many times this player scanned a given puzzle.
    pub fn scan_count_for(&self, puzzle: PuzzleId) -> u64 {
        self.events.iter().filter(|e| e.puzzle == puzzle).count() as u64
    }

    /// When this player first scanned a given puzzle.
    pub fn first_scanned_at(&self, puzzle: PuzzleId) -> Option<Timestamp> {
        self.events
            .iter()
            .find(|e| e.puzzle == puzzle)
            .map(|e| e.scanned_at)
    }

    /// Puzzles ever first-scored, in id order.
    pub fn scored_puzzles(&self) -> impl Iterator<Item = PuzzleId> + '_ {
        self.scored.iter().copied()
    }
}
