//! # Scannable Payload Codec
//!
//! The compact literal physically printed into a scannable code:
//!
//! ```text
//! "<puzzleId>:<keyHex>"
//! ```
//!
//! Decimal external puzzle id, then the raw key exactly as recorded at
//! creation. The separator appears in neither alphabet, so the payload is
//! self-decodable with no external lookup.

use crate::errors::PayloadError;
use crate::sealed::PuzzleKey;
use hunt_types::PuzzleId;

/// Separator between the id and key segments.
pub const PAYLOAD_SEPARATOR: char = ':';

/// A decoded scannable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPayload {
    /// The puzzle's stable external id.
    pub puzzle: PuzzleId,
    /// The key segment, as scanned. Verified against the puzzle's
    /// recorded key before any content is revealed.
    pub key_hex: String,
}

impl ScanPayload {
    /// Encodes a puzzle id and its current key into the payload literal.
    pub fn encode(puzzle: PuzzleId, key: &PuzzleKey) -> String {
        format!("{}{}{}", puzzle, PAYLOAD_SEPARATOR, key.as_str())
    }

    /// Decodes a scanned payload literal.
    ///
    /// # Errors
    ///
    /// - `MissingSeparator`: no separator present
    /// - `AmbiguousSeparator`: more than one separator present
    /// - `InvalidPuzzleId`: id segment is not a decimal integer
    /// - `EmptyKey`: key segment is empty
    pub fn decode(raw: &str) -> Result<Self, PayloadError> {
        let mut segments = raw.split(PAYLOAD_SEPARATOR);
        let id_segment = segments.next().unwrap_or_default();
        let key_segment = segments.next().ok_or(PayloadError::MissingSeparator)?;
        if segments.next().is_some() {
            return Err(PayloadError::AmbiguousSeparator);
        }

        let id: u64 = id_segment
            .parse()
            .map_err(|_| PayloadError::InvalidPuzzleId(id_segment.to_string()))?;
        if key_segment.is_empty() {
            return Err(PayloadError::EmptyKey);
        }

        Ok(Self {
            puzzle: PuzzleId(id),
            key_hex: key_segment.to_string(),
        })
    }
}
