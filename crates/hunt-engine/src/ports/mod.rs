//! Ports: the engine's contracts with its collaborators.
//!
//! - `storage`: the per-player progress store (the atomic commit lives
//!   behind it) and the admin-owned puzzle vault
//! - `directory`: the identity collaborator supplying display attributes

pub mod directory;
pub mod storage;

pub use directory::PlayerDirectory;
pub use storage::{ProgressStore, PuzzleVault};
