//! Domain layer: entities, the per-player ledger, ranking logic, errors,
//! and the value objects returned across the engine's boundary.

pub mod config;
pub mod entities;
pub mod errors;
pub mod leaderboard;
pub mod ledger;
pub mod value_objects;

pub use config::GameConfig;
pub use entities::PuzzleRecord;
pub use errors::GameError;
pub use leaderboard::{is_ranked, rank_order, ranked_page, rank_of};
pub use ledger::{PlayerLedger, ScanCommit};
pub use value_objects::{
    CompletionStats, GameStats, LeaderboardEntry, LeaderboardPage, LeaderboardQuery,
    MyScansReport, ProgressSnapshot, PuzzleReveal, RecentScan, ScannedPuzzle, ScanReceipt,
};
