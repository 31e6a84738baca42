//! # Storage Ports
//!
//! Driven ports for durable state. A production adapter backs these with
//! a transactional store; the in-memory adapter in `adapters::memory`
//! backs them with per-player mutexes. Either way the contract is the
//! same: `commit_scan` is indivisible per player, and reads only ever see
//! committed state.

use crate::domain::{GameError, PuzzleRecord, ScanCommit};
use hunt_types::{PlayerId, ProgressAggregate, PuzzleId, ScanEvent, Timestamp};

/// Per-player scan log and progress aggregate storage.
///
/// Storage faults surface as `GameError::Transient`; callers treat them
/// as retryable and never as partial commits.
pub trait ProgressStore: Send + Sync {
    /// Atomically: classifies first-vs-repeat for `(player, puzzle)`,
    /// appends the scan log row, and creates or updates the aggregate.
    ///
    /// Two concurrent calls for the same player must serialize; they can
    /// never both observe "no prior event" for one puzzle.
    fn commit_scan(
        &self,
        player: PlayerId,
        puzzle: &PuzzleRecord,
        now: Timestamp,
    ) -> Result<ScanCommit, GameError>;

    /// The player's aggregate, absent if they never scanned.
    fn aggregate_for(&self, player: PlayerId) -> Result<Option<ProgressAggregate>, GameError>;

    /// Marks the player's run completed, setting `end_time` exactly once.
    ///
    /// # Errors
    /// - `NoProgress` if the player never scanned
    /// - `AlreadyCompleted` on a second completion
    fn complete_run(
        &self,
        player: PlayerId,
        now: Timestamp,
    ) -> Result<ProgressAggregate, GameError>;

    /// The player's full scan log in commit order (empty if none).
    fn scan_history(&self, player: PlayerId) -> Result<Vec<ScanEvent>, GameError>;

    /// A committed snapshot of every player's aggregate.
    ///
    /// Never sees a commit mid-flight; it may lag a just-committed update
    /// by one read cycle.
    fn all_aggregates(&self) -> Result<Vec<(PlayerId, ProgressAggregate)>, GameError>;
}

/// Read access to puzzle content records, owned by the admin collaborator.
pub trait PuzzleVault: Send + Sync {
    /// Looks a record up by its stable external id.
    fn puzzle(&self, id: PuzzleId) -> Result<Option<PuzzleRecord>, GameError>;

    /// How many records are currently active.
    fn active_count(&self) -> Result<u64, GameError>;
}
