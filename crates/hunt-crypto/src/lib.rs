//! # hunt-crypto
//!
//! Cryptographic codecs for the Riddle-Hunt game core.
//!
//! ## Components
//!
//! | Module | Concern |
//! |--------|---------|
//! | `sealed` | Per-puzzle symmetric protection (AES-256-GCM, `ivHex:cipherHex`) |
//! | `payload` | Scannable payload literal (`"<puzzleId>:<keyHex>"`) |
//!
//! ## Security Properties
//!
//! - Every blob carries its own random nonce, so sealing identical text
//!   twice with one key yields distinct blobs
//! - AEAD authentication makes a wrong key or a truncated blob fail
//!   cleanly instead of yielding garbage plaintext
//! - Key material is zeroized on drop and never appears in error values

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod payload;
pub mod sealed;

pub use errors::{CryptoError, PayloadError};
pub use payload::{ScanPayload, PAYLOAD_SEPARATOR};
pub use sealed::{protect, unprotect, PuzzleKey, SealedContent};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
