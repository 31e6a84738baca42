//! # Riddle-Hunt Test Suite
//!
//! Unified test crate containing cross-crate flows the per-crate unit
//! tests cannot cover alone.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/
//! │   ├── scan_flow.rs    # payload -> scan -> aggregate, fault paths
//! │   ├── concurrency.rs  # idempotent scoring under parallel submits
//! │   └── ranking.rs      # leaderboard determinism and rank-of
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hunt-tests
//! cargo test -p hunt-tests integration::
//! ```
