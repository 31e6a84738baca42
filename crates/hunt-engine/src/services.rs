//! # Engine Services
//!
//! The driving surface of the engine: scan submission, progress reads,
//! completion, and leaderboard reads. Services hold the ports as trait
//! objects and carry no state of their own.

use crate::domain::{
    leaderboard, CompletionStats, GameConfig, GameError, GameStats, LeaderboardEntry,
    LeaderboardPage, LeaderboardQuery, MyScansReport, ProgressSnapshot, PuzzleReveal, RecentScan,
    ScannedPuzzle, ScanReceipt,
};
use crate::ports::{PlayerDirectory, ProgressStore, PuzzleVault};
use hunt_crypto::ScanPayload;
use hunt_types::{duration_seconds, PlayerId, ProgressAggregate, PuzzleId, Timestamp};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

/// Current wall-clock time in milliseconds since epoch.
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Processes scan submissions end to end.
pub struct ScanProcessor {
    puzzles: Arc<dyn PuzzleVault>,
    progress: Arc<dyn ProgressStore>,
}

impl ScanProcessor {
    /// Builds a processor over the given collaborators.
    pub fn new(puzzles: Arc<dyn PuzzleVault>, progress: Arc<dyn ProgressStore>) -> Self {
        Self { puzzles, progress }
    }

    /// Submits a scanned payload for an authenticated player.
    pub fn submit(&self, player: PlayerId, raw_payload: &str) -> Result<ScanReceipt, GameError> {
        self.submit_at(player, raw_payload, now_millis())
    }

    /// [`Self::submit`] with an explicit clock, for deterministic tests.
    ///
    /// Order of checks is load-bearing: format, existence, active flag,
    /// key verification, unprotect, then the atomic commit. Content is
    /// revealed only after the key check passes.
    pub fn submit_at(
        &self,
        player: PlayerId,
        raw_payload: &str,
        now: Timestamp,
    ) -> Result<ScanReceipt, GameError> {
        let payload = ScanPayload::decode(raw_payload)?;

        let record = self
            .puzzles
            .puzzle(payload.puzzle)?
            .ok_or(GameError::PuzzleNotFound(payload.puzzle))?;

        if !record.active {
            return Err(GameError::PuzzleInactive(record.id));
        }

        if !record.sealed.key().matches(&payload.key_hex) {
            warn!(%player, puzzle = %record.id, "scan rejected: payload key mismatch");
            return Err(GameError::KeyMismatch(record.id));
        }

        let content = record.sealed.open().map_err(|err| {
            // Stored pair failed with its own key: data corruption, not a
            // client fault. Operators must see this.
            error!(puzzle = %record.id, %err, "stored puzzle content failed to unprotect");
            GameError::ContentCorrupted(record.id)
        })?;

        let commit = self.progress.commit_scan(player, &record, now)?;
        info!(
            %player,
            puzzle = %record.id,
            first_scan = commit.first_scan,
            total_points = commit.aggregate.total_points,
            "scan committed"
        );

        Ok(ScanReceipt {
            first_scan: commit.first_scan,
            puzzle: PuzzleReveal {
                id: record.id,
                title: record.title,
                content,
                solution: record.solution,
                points: record.points,
            },
        })
    }
}

/// Per-player progress reads and the explicit completion action.
pub struct ProgressService {
    puzzles: Arc<dyn PuzzleVault>,
    progress: Arc<dyn ProgressStore>,
    config: GameConfig,
}

impl ProgressService {
    /// Builds the service over the given collaborators.
    pub fn new(
        puzzles: Arc<dyn PuzzleVault>,
        progress: Arc<dyn ProgressStore>,
        config: GameConfig,
    ) -> Self {
        Self {
            puzzles,
            progress,
            config,
        }
    }

    /// A player's running totals against the active puzzle count.
    pub fn snapshot(&self, player: PlayerId) -> Result<ProgressSnapshot, GameError> {
        let aggregate = self.progress.aggregate_for(player)?;
        let total_puzzles = self.puzzles.active_count()?;

        let (total_scans, unique_puzzles, total_points, is_completed, start_time, end_time) =
            match &aggregate {
                Some(agg) => (
                    agg.total_scans,
                    agg.unique_puzzles,
                    agg.total_points,
                    agg.is_completed,
                    Some(agg.start_time),
                    agg.end_time,
                ),
                None => (0, 0, 0, false, None, None),
            };

        let completion_percentage = if total_puzzles > 0 {
            ((unique_puzzles as f64 / total_puzzles as f64) * 100.0).round() as u32
        } else {
            0
        };

        Ok(ProgressSnapshot {
            total_scans,
            unique_puzzles,
            total_points,
            total_puzzles,
            completion_percentage,
            is_completed,
            start_time,
            end_time,
        })
    }

    /// A player's history grouped by puzzle, in first-scan order.
    pub fn my_scans(&self, player: PlayerId) -> Result<MyScansReport, GameError> {
        let history = self.progress.scan_history(player)?;

        // Group rows by puzzle; history is already in commit order, so the
        // first row per puzzle carries its first-scan time.
        let mut grouped: BTreeMap<PuzzleId, (Timestamp, u64)> = BTreeMap::new();
        let mut order: Vec<PuzzleId> = Vec::new();
        for event in &history {
            match grouped.get_mut(&event.puzzle) {
                Some((_, count)) => *count += 1,
                None => {
                    grouped.insert(event.puzzle, (event.scanned_at, 1));
                    order.push(event.puzzle);
                }
            }
        }

        let mut scans = Vec::with_capacity(order.len());
        for puzzle_id in order {
            let (first_scanned_at, total_scans) = grouped[&puzzle_id];
            // Records are never deleted; a miss here means the vault and
            // the scan log disagree.
            let record = self
                .puzzles
                .puzzle(puzzle_id)?
                .ok_or_else(|| {
                    GameError::Internal(format!("scanned puzzle {} missing from vault", puzzle_id))
                })?;
            scans.push(ScannedPuzzle {
                puzzle: puzzle_id,
                title: record.title,
                points: record.points,
                first_scanned_at,
                total_scans,
            });
        }

        Ok(MyScansReport {
            total_scans: history.len() as u64,
            unique_puzzles: scans.len() as u64,
            scans,
        })
    }

    /// A player's overall statistics with a recent-scan window.
    pub fn stats(&self, player: PlayerId) -> Result<GameStats, GameError> {
        let history = self.progress.scan_history(player)?;
        let aggregate = self.progress.aggregate_for(player)?;
        let total_puzzles = self.puzzles.active_count()?;

        let recent_start = history.len().saturating_sub(self.config.recent_scan_window);
        let mut recent_scans = Vec::with_capacity(history.len() - recent_start);
        for event in &history[recent_start..] {
            let record = self.puzzles.puzzle(event.puzzle)?.ok_or_else(|| {
                GameError::Internal(format!("scanned puzzle {} missing from vault", event.puzzle))
            })?;
            recent_scans.push(RecentScan {
                title: record.title,
                points: record.points,
                scanned_at: event.scanned_at,
            });
        }

        Ok(GameStats {
            total_puzzles,
            solved_puzzles: aggregate.as_ref().map_or(0, |a| a.unique_puzzles),
            total_scans: history.len() as u64,
            total_points: aggregate.as_ref().map_or(0, |a| a.total_points),
            is_completed: aggregate.as_ref().is_some_and(|a| a.is_completed),
            first_scan: history.first().map(|e| e.scanned_at),
            last_scan: history.last().map(|e| e.scanned_at),
            recent_scans,
        })
    }

    /// Completes the player's run, freezing `end_time`.
    pub fn complete(&self, player: PlayerId) -> Result<CompletionStats, GameError> {
        self.complete_at(player, now_millis())
    }

    /// [`Self::complete`] with an explicit clock, for deterministic tests.
    pub fn complete_at(
        &self,
        player: PlayerId,
        now: Timestamp,
    ) -> Result<CompletionStats, GameError> {
        let aggregate = self.progress.complete_run(player, now)?;
        let end_time = aggregate.end_time.unwrap_or(now);
        info!(
            %player,
            total_points = aggregate.total_points,
            duration_seconds = duration_seconds(aggregate.start_time, end_time),
            "run completed"
        );
        Ok(CompletionStats {
            unique_puzzles: aggregate.unique_puzzles,
            total_scans: aggregate.total_scans,
            total_points: aggregate.total_points,
            duration_seconds: duration_seconds(aggregate.start_time, end_time),
            start_time: aggregate.start_time,
            end_time,
        })
    }
}

/// Leaderboard reads over committed aggregates.
pub struct Leaderboard {
    progress: Arc<dyn ProgressStore>,
    players: Arc<dyn PlayerDirectory>,
    config: GameConfig,
}

impl Leaderboard {
    /// Builds the ranker over the given collaborators.
    pub fn new(
        progress: Arc<dyn ProgressStore>,
        players: Arc<dyn PlayerDirectory>,
        config: GameConfig,
    ) -> Self {
        Self {
            progress,
            players,
            config,
        }
    }

    /// One ordered page with ranks, viewer flags, and the requesting
    /// player's own rank.
    pub fn page(&self, query: &LeaderboardQuery) -> Result<LeaderboardPage, GameError> {
        let limit = self.config.clamp_limit(query.limit);
        let rows = self.progress.all_aggregates()?;

        let (page, total) = leaderboard::ranked_page(&rows, limit, query.offset);
        let mut entries = Vec::with_capacity(page.len());
        for (rank, player, aggregate) in page {
            entries.push(self.entry(rank, player, &aggregate, query.requesting_player)?);
        }

        let current_player_rank = match query.requesting_player {
            Some(player) => leaderboard::rank_of(&rows, player),
            None => None,
        };

        Ok(LeaderboardPage {
            total,
            limit,
            offset: query.offset,
            current_player_rank,
            entries,
        })
    }

    /// The top `n` rows.
    pub fn top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, GameError> {
        let query = LeaderboardQuery {
            limit: Some(n),
            offset: 0,
            requesting_player: None,
        };
        Ok(self.page(&query)?.entries)
    }

    /// A player's rank, computed as a counting query.
    ///
    /// `None` when the player has no aggregate or has not completed.
    pub fn rank_of(&self, player: PlayerId) -> Result<Option<u64>, GameError> {
        let rows = self.progress.all_aggregates()?;
        Ok(leaderboard::rank_of(&rows, player))
    }

    /// The board restricted to one department; rank numbers are local to
    /// the department.
    pub fn department_board(
        &self,
        department: &str,
    ) -> Result<Vec<LeaderboardEntry>, GameError> {
        let rows = self.progress.all_aggregates()?;

        let mut scoped = Vec::new();
        for (player, aggregate) in rows {
            let Some(summary) = self.players.summary(player)? else {
                continue;
            };
            if summary.department == department {
                scoped.push((player, aggregate));
            }
        }

        let (page, _) = leaderboard::ranked_page(&scoped, usize::MAX, 0);
        let mut entries = Vec::with_capacity(page.len());
        for (rank, player, aggregate) in page {
            entries.push(self.entry(rank, player, &aggregate, None)?);
        }
        Ok(entries)
    }

    fn entry(
        &self,
        rank: u64,
        player: PlayerId,
        aggregate: &ProgressAggregate,
        viewer: Option<PlayerId>,
    ) -> Result<LeaderboardEntry, GameError> {
        let summary = self.players.summary(player)?.ok_or_else(|| {
            GameError::Internal(format!("ranked player {} missing from directory", player))
        })?;
        Ok(LeaderboardEntry {
            rank,
            player: summary,
            unique_puzzles: aggregate.unique_puzzles,
            total_scans: aggregate.total_scans,
            total_points: aggregate.total_points,
            duration_seconds: aggregate.duration_seconds(),
            completed_at: aggregate.end_time,
            is_requesting_player: viewer == Some(player),
        })
    }
}
