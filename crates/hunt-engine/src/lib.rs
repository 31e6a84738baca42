//! # hunt-engine
//!
//! The computational core of the Riddle-Hunt platform.
//!
//! ## Role in System
//!
//! - **Scan Event Processor**: validates a scanned payload, unprotects
//!   puzzle content, classifies first-vs-repeat, and atomically folds the
//!   scan into the player's progress aggregate
//! - **Progress Aggregate Store**: one ledger per player (append-only scan
//!   log + cached totals), mutated only through the atomic commit
//! - **Leaderboard Ranker**: deterministic three-key ranking with
//!   rank-of-one-player as a counting query
//!
//! ## Flow
//!
//! ```text
//! payload ──decode──→ [PuzzleVault] ──key check──→ unprotect
//!                                                     │
//!                              [ProgressStore::commit_scan] (atomic)
//!                                                     │
//!                                               ScanReceipt
//! ```
//!
//! Identity issuance, admin CRUD, and email delivery are collaborators
//! behind the `ports` traits; they are not implemented here.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

pub use adapters::{MemoryPlayerDirectory, MemoryProgressStore, MemoryPuzzleVault};
pub use domain::*;
pub use ports::*;
pub use services::{now_millis, Leaderboard, ProgressService, ScanProcessor};
