//! Engine error types.
//!
//! One error enum spans the engine's services and ports. Variants map onto
//! the fault taxonomy the HTTP collaborator translates to statuses:
//! client faults (bad payload, unknown/inactive puzzle, key mismatch,
//! completion conflicts), the server-side integrity fault, and transient
//! storage faults. No variant carries protected content or key material.

use hunt_crypto::PayloadError;
use hunt_types::{PlayerId, PuzzleId};

/// Engine error type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The scanned payload string is malformed.
    MalformedPayload(PayloadError),

    /// No puzzle record exists for the decoded id.
    PuzzleNotFound(PuzzleId),

    /// The puzzle is administratively disabled.
    PuzzleInactive(PuzzleId),

    /// The payload's key segment does not match the puzzle's recorded key.
    /// Covers tampering and scans of a since-rotated payload.
    KeyMismatch(PuzzleId),

    /// Stored content failed to unprotect with its own key. The stored
    /// {key, blob} pair is corrupt; an operator must look at this.
    ContentCorrupted(PuzzleId),

    /// Completion was requested for an already-completed run.
    AlreadyCompleted(PlayerId),

    /// Completion was requested before any successful scan.
    NoProgress(PlayerId),

    /// Storage timeout or unavailability; safe to retry.
    Transient(String),

    /// Internal invariant violation.
    Internal(String),
}

impl GameError {
    /// True for faults caused by the client's input or request ordering.
    ///
    /// The remaining variants are server faults the collaborator maps to
    /// 5xx statuses.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Self::MalformedPayload(_)
                | Self::PuzzleNotFound(_)
                | Self::PuzzleInactive(_)
                | Self::KeyMismatch(_)
                | Self::AlreadyCompleted(_)
                | Self::NoProgress(_)
        )
    }

    /// True when a blind retry of the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl From<PayloadError> for GameError {
    fn from(err: PayloadError) -> Self {
        Self::MalformedPayload(err)
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedPayload(err) => write!(f, "malformed payload: {}", err),
            Self::PuzzleNotFound(id) => write!(f, "puzzle {} not found", id),
            Self::PuzzleInactive(id) => write!(f, "puzzle {} is inactive", id),
            Self::KeyMismatch(id) => {
                write!(f, "payload key does not match puzzle {}", id)
            }
            Self::ContentCorrupted(id) => {
                write!(f, "stored content for puzzle {} failed to unprotect", id)
            }
            Self::AlreadyCompleted(player) => {
                write!(f, "player {} already completed the hunt", player)
            }
            Self::NoProgress(player) => {
                write!(f, "player {} has no progress to complete", player)
            }
            Self::Transient(msg) => write!(f, "transient storage fault: {}", msg),
            Self::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}
