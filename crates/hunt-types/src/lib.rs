//! # hunt-types
//!
//! Shared domain entities for the Riddle-Hunt game core.
//!
//! ## Clusters
//!
//! - **Identity**: `PlayerId`, `PuzzleId`, `PlayerSummary`
//! - **Progress**: `ScanEvent` (append-only log row), `ProgressAggregate`
//!   (cached per-player totals derived from the scan log)
//!
//! Puzzle content records live in the engine's domain layer, next to the
//! sealed-content value object they embed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entities;

pub use entities::{
    duration_seconds, PlayerId, PlayerSummary, ProgressAggregate, PuzzleId, ScanEvent, Timestamp,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
