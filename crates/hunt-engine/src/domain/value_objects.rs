//! Value objects crossing the engine boundary.
//!
//! These serialize at the interface edge (the HTTP collaborator), so field
//! names follow the external camelCase contract.

use hunt_types::{PlayerId, PlayerSummary, PuzzleId, Timestamp};
use serde::{Deserialize, Serialize};

/// Puzzle fields revealed after key verification succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleReveal {
    /// Puzzle id.
    pub id: PuzzleId,
    /// Display title.
    pub title: String,
    /// Clear puzzle text.
    pub content: String,
    /// Clear solution text.
    pub solution: String,
    /// Point value.
    pub points: u64,
}

/// Success output of a scan submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReceipt {
    /// True when this scan scored (first scan of this puzzle).
    pub first_scan: bool,
    /// The revealed puzzle.
    pub puzzle: PuzzleReveal,
}

/// Parameters of a leaderboard page read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    /// Page size; clamped by [`crate::GameConfig`]. `None` uses the default.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Rows to skip.
    #[serde(default)]
    pub offset: usize,
    /// Player issuing the read, for row flagging and their own rank.
    #[serde(default)]
    pub requesting_player: Option<PlayerId>,
}

/// One leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based global rank (local rank on a scoped board).
    pub rank: u64,
    /// Display attributes from the identity collaborator.
    pub player: PlayerSummary,
    /// Distinct puzzles first-scored.
    pub unique_puzzles: u64,
    /// Total scans, repeats included.
    pub total_scans: u64,
    /// Score.
    pub total_points: u64,
    /// Run duration in whole seconds.
    pub duration_seconds: Option<u64>,
    /// Completion timestamp (ms).
    pub completed_at: Option<Timestamp>,
    /// True when this row belongs to the requesting player.
    pub is_requesting_player: bool,
}

/// One page of the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPage {
    /// Count of ranked (completed, scoring) runs overall.
    pub total: u64,
    /// Effective page size used.
    pub limit: usize,
    /// Rows skipped.
    pub offset: usize,
    /// The requesting player's own rank, if they are ranked.
    pub current_player_rank: Option<u64>,
    /// Ordered rows.
    pub entries: Vec<LeaderboardEntry>,
}

/// A player's progress snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Total scans, repeats included.
    pub total_scans: u64,
    /// Distinct puzzles first-scored.
    pub unique_puzzles: u64,
    /// Score.
    pub total_points: u64,
    /// Active puzzles currently in play.
    pub total_puzzles: u64,
    /// `unique_puzzles / total_puzzles`, rounded to whole percent.
    pub completion_percentage: u32,
    /// Whether the run is completed.
    pub is_completed: bool,
    /// First-scan time (ms), if any scan happened.
    pub start_time: Option<Timestamp>,
    /// Completion time (ms), once completed.
    pub end_time: Option<Timestamp>,
}

/// Per-puzzle line of the my-scans report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedPuzzle {
    /// Puzzle id.
    pub puzzle: PuzzleId,
    /// Display title.
    pub title: String,
    /// Point value.
    pub points: u64,
    /// When this player first scanned it (ms).
    pub first_scanned_at: Timestamp,
    /// How many times this player scanned it.
    pub total_scans: u64,
}

/// A player's scan history grouped by puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyScansReport {
    /// Total scans, repeats included.
    pub total_scans: u64,
    /// Distinct puzzles scanned.
    pub unique_puzzles: u64,
    /// One line per distinct puzzle, in first-scan order.
    pub scans: Vec<ScannedPuzzle>,
}

/// Final numbers returned by the completion operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    /// Distinct puzzles first-scored.
    pub unique_puzzles: u64,
    /// Total scans, repeats included.
    pub total_scans: u64,
    /// Final score.
    pub total_points: u64,
    /// Run duration in whole seconds.
    pub duration_seconds: u64,
    /// First-scan time (ms).
    pub start_time: Timestamp,
    /// Completion time (ms).
    pub end_time: Timestamp,
}

/// One line of the recent-scans window in [`GameStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentScan {
    /// Puzzle title.
    pub title: String,
    /// Point value.
    pub points: u64,
    /// When the scan was committed (ms).
    pub scanned_at: Timestamp,
}

/// A player's game statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    /// Active puzzles currently in play.
    pub total_puzzles: u64,
    /// Distinct puzzles first-scored.
    pub solved_puzzles: u64,
    /// Total scans, repeats included.
    pub total_scans: u64,
    /// Score.
    pub total_points: u64,
    /// Whether the run is completed.
    pub is_completed: bool,
    /// Earliest scan time (ms).
    pub first_scan: Option<Timestamp>,
    /// Latest scan time (ms).
    pub last_scan: Option<Timestamp>,
    /// Most recent scans, oldest first.
    pub recent_scans: Vec<RecentScan>,
}
