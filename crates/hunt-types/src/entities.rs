//! # Core Domain Entities
//!
//! Identifiers, the append-only scan log row, and the per-player progress
//! aggregate. These types cross crate boundaries and serialize at the
//! interface edge, so everything here derives serde.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// Stable identifier of a player account.
///
/// Issued by the identity collaborator; opaque to the game core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

/// Stable external identifier of a puzzle record.
///
/// This is the decimal id embedded in the scannable payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PuzzleId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display attributes of a player, supplied by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    /// Stable player id.
    pub id: PlayerId,
    /// Full display name.
    pub display_name: String,
    /// Department the player belongs to (leaderboard scoping attribute).
    pub department: String,
    /// Class roll number.
    pub roll_no: String,
}

/// One row of the append-only scan log.
///
/// Multiple rows per (player, puzzle) are legal; only the first one scores.
/// Rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    /// Unique row id.
    pub id: Uuid,
    /// Player who submitted the scan.
    pub player: PlayerId,
    /// Puzzle that was scanned.
    pub puzzle: PuzzleId,
    /// When the scan was committed (ms).
    pub scanned_at: Timestamp,
}

impl ScanEvent {
    /// Creates a new log row with a fresh id.
    pub fn new(player: PlayerId, puzzle: PuzzleId, scanned_at: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            player,
            puzzle,
            scanned_at,
        }
    }
}

/// Per-player running totals derived from the scan log.
///
/// Created lazily on a player's first successful scan and kept consistent
/// with the log by the scan processor's atomic commit.
///
/// Invariants:
/// - `total_points` = sum of point values over puzzles ever first-scored
/// - `unique_puzzles` = size of that set
/// - `total_scans` >= `unique_puzzles`
/// - `start_time` immutable once set; `end_time` set exactly once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressAggregate {
    /// Every scan ever committed, repeats included.
    pub total_scans: u64,
    /// Distinct puzzles first-scored by this player.
    pub unique_puzzles: u64,
    /// Sum of point values over first-scored puzzles.
    pub total_points: u64,
    /// Whether the player has explicitly completed their run.
    pub is_completed: bool,
    /// When the first scan was committed (ms). Immutable once set.
    pub start_time: Timestamp,
    /// When the run was completed (ms). Set exactly once.
    pub end_time: Option<Timestamp>,
}

impl ProgressAggregate {
    /// Seeds a fresh aggregate from a player's first successful scan.
    pub fn seeded(points: u64, now: Timestamp) -> Self {
        Self {
            total_scans: 1,
            unique_puzzles: 1,
            total_points: points,
            is_completed: false,
            start_time: now,
            end_time: None,
        }
    }

    /// Folds one committed scan into the totals.
    ///
    /// `total_scans` always advances; the scoring fields advance only on a
    /// first scan of the puzzle.
    pub fn apply_scan(&mut self, first_scan: bool, points: u64) {
        self.total_scans += 1;
        if first_scan {
            self.unique_puzzles += 1;
            self.total_points += points;
        }
    }

    /// Run duration in whole seconds, once completed.
    pub fn duration_seconds(&self) -> Option<u64> {
        self.end_time
            .map(|end| duration_seconds(self.start_time, end))
    }
}

/// Whole seconds elapsed between two millisecond timestamps, floored.
pub fn duration_seconds(start: Timestamp, end: Timestamp) -> u64 {
    end.saturating_sub(start) / 1000
}
