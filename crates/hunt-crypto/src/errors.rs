//! Crypto and payload error types.

use thiserror::Error;

/// Content protection errors.
///
/// Messages never carry key material or plaintext.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failed
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (wrong key, malformed or truncated blob)
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Recorded key string cannot be used as cipher key material
    #[error("invalid key material: {0}")]
    InvalidKey(String),
}

/// Scannable payload format errors.
///
/// These are client faults: the scanned string itself is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The separator between id and key is missing.
    #[error("payload separator missing")]
    MissingSeparator,

    /// More than one separator makes the split ambiguous.
    #[error("payload separator is ambiguous")]
    AmbiguousSeparator,

    /// The id segment is not a valid decimal puzzle id.
    #[error("invalid puzzle id segment: {0:?}")]
    InvalidPuzzleId(String),

    /// The key segment is empty.
    #[error("payload key segment is empty")]
    EmptyKey,
}
