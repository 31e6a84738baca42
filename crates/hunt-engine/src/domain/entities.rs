//! Puzzle content records.

use hunt_crypto::{CryptoError, SealedContent};
use hunt_types::PuzzleId;

/// A puzzle content record, owned by the administrative collaborator.
///
/// The engine reads these; it never edits them. The protected text and its
/// key live together in [`SealedContent`], so a content edit always
/// rotates the key with the blob.
///
/// Invariant: `points > 0` (enforced at construction).
#[derive(Debug, Clone)]
pub struct PuzzleRecord {
    /// Stable external id, embedded in the scannable payload.
    pub id: PuzzleId,
    /// Display title, revealed on any scan outcome that returns content.
    pub title: String,
    /// Protected puzzle text with its own key.
    pub sealed: SealedContent,
    /// Clear solution text.
    pub solution: String,
    /// Points credited on a player's first scan.
    pub points: u64,
    /// Ordering hint for presentation.
    pub sequence: u32,
    /// Inactive puzzles never score and never reveal content.
    pub active: bool,
}

impl PuzzleRecord {
    /// Seals `plaintext` under a fresh key and builds an active record.
    ///
    /// # Errors
    ///
    /// `CryptoError::EncryptionFailed` if sealing fails. Zero-point
    /// records are an admin-side validation failure and are rejected by
    /// the vault before this is reached.
    pub fn sealed_new(
        id: PuzzleId,
        title: impl Into<String>,
        plaintext: &str,
        solution: impl Into<String>,
        points: u64,
        sequence: u32,
    ) -> Result<Self, CryptoError> {
        Ok(Self {
            id,
            title: title.into(),
            sealed: SealedContent::seal(plaintext)?,
            solution: solution.into(),
            points,
            sequence,
            active: true,
        })
    }
}
