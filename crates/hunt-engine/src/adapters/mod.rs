//! Adapters implementing the engine's ports.

pub mod memory;

pub use memory::{MemoryPlayerDirectory, MemoryProgressStore, MemoryPuzzleVault};
