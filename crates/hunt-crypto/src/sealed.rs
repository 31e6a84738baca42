//! # Puzzle Content Protection
//!
//! Protects puzzle text with a per-puzzle symmetric key using AES-256-GCM.
//!
//! ## At-rest format
//!
//! ```text
//! ivHex ":" cipherHex
//! ```
//!
//! The iv is a fresh random 12-byte GCM nonce per call, so protecting the
//! same text twice with one key yields two distinct blobs.
//!
//! ## Key format
//!
//! A key is recorded externally as a hex string (32 lowercase chars when
//! generated here). Before cipher use the recorded string is right-padded
//! with `'0'` to 64 hex chars, truncated to 64, and decoded to the 32-byte
//! AES-256 key. Keys recorded at creation therefore remain usable no
//! matter their original length.

use crate::CryptoError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use zeroize::Zeroize;

/// Bytes of fresh entropy behind a generated key (32 hex chars recorded).
const KEY_ENTROPY_BYTES: usize = 16;

/// Hex width of the derived AES-256 cipher key.
const CIPHER_KEY_HEX_WIDTH: usize = 64;

/// GCM nonce width in bytes.
const NONCE_BYTES: usize = 12;

/// A per-puzzle symmetric key in its externally recorded hex form.
///
/// Equality is equality of recorded strings; this is what payload key
/// verification compares. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct PuzzleKey {
    hex: String,
}

impl PuzzleKey {
    /// Generates a fresh full-entropy key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_ENTROPY_BYTES];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        let key = Self {
            hex: hex::encode(bytes),
        };
        bytes.zeroize();
        key
    }

    /// Wraps a key string recorded at puzzle creation.
    pub fn from_recorded(hex: impl Into<String>) -> Self {
        Self { hex: hex.into() }
    }

    /// The recorded hex form, as embedded in scannable payloads.
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Strict comparison against a key segment from a scanned payload.
    pub fn matches(&self, candidate: &str) -> bool {
        self.hex == candidate
    }

    /// Derives the 32-byte AES-256 key from the recorded form.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKey` if the recorded string contains
    /// non-hex characters.
    fn cipher_key(&self) -> Result<[u8; 32], CryptoError> {
        let mut padded = self.hex.clone();
        while padded.len() < CIPHER_KEY_HEX_WIDTH {
            padded.push('0');
        }
        padded.truncate(CIPHER_KEY_HEX_WIDTH);

        let decoded = hex::decode(&padded)
            .map_err(|_| CryptoError::InvalidKey("non-hex characters in key".into()))?;
        padded.zeroize();

        let mut key = [0u8; 32];
        key.copy_from_slice(&decoded);
        Ok(key)
    }
}

// Redacted: key material must never reach logs or error output.
impl std::fmt::Debug for PuzzleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PuzzleKey(..)")
    }
}

/// Protects plaintext under a key, producing an `ivHex:cipherHex` blob.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKey` for unusable key material or
/// `CryptoError::EncryptionFailed` if the cipher rejects the input.
pub fn protect(plaintext: &str, key: &PuzzleKey) -> Result<String, CryptoError> {
    let mut key_bytes = key.cipher_key()?;
    let cipher = Aes256Gcm::new((&key_bytes).into());
    key_bytes.zeroize();

    let mut iv = [0u8; NONCE_BYTES];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut iv);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|_| CryptoError::EncryptionFailed("cipher rejected input".into()))?;

    Ok(format!("{}:{}", hex::encode(iv), hex::encode(ciphertext)))
}

/// Reverses [`protect`]. Never returns partial output.
///
/// # Errors
///
/// Returns `CryptoError::DecryptionFailed` on a malformed or truncated
/// blob, or when the key does not match the blob.
pub fn unprotect(blob: &str, key: &PuzzleKey) -> Result<String, CryptoError> {
    let (iv_hex, cipher_hex) = blob
        .split_once(':')
        .ok_or_else(|| CryptoError::DecryptionFailed("missing iv separator".into()))?;
    if cipher_hex.contains(':') {
        return Err(CryptoError::DecryptionFailed("ambiguous blob format".into()));
    }

    let iv = hex::decode(iv_hex)
        .map_err(|_| CryptoError::DecryptionFailed("iv is not hex".into()))?;
    if iv.len() != NONCE_BYTES {
        return Err(CryptoError::DecryptionFailed("iv has wrong width".into()));
    }
    let ciphertext = hex::decode(cipher_hex)
        .map_err(|_| CryptoError::DecryptionFailed("ciphertext is not hex".into()))?;

    let mut key_bytes = key.cipher_key()?;
    let cipher = Aes256Gcm::new((&key_bytes).into());
    key_bytes.zeroize();

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&iv), ciphertext.as_ref())
        .map_err(|_| CryptoError::DecryptionFailed("key/blob mismatch".into()))?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::DecryptionFailed("plaintext is not utf-8".into()))
}

/// A puzzle's key and protected blob as one versioned value.
///
/// The pair is only ever created together: sealing on a content edit
/// rotates the key with the blob, so a stale key can never sit next to
/// edited content. There is no way to replace one field alone.
#[derive(Debug, Clone)]
pub struct SealedContent {
    key: PuzzleKey,
    blob: String,
}

impl SealedContent {
    /// Seals plaintext under a freshly generated key.
    pub fn seal(plaintext: &str) -> Result<Self, CryptoError> {
        let key = PuzzleKey::generate();
        let blob = protect(plaintext, &key)?;
        Ok(Self { key, blob })
    }

    /// Rehydrates a previously stored pair.
    pub fn from_parts(key: PuzzleKey, blob: String) -> Self {
        Self { key, blob }
    }

    /// Opens the blob with its own key.
    ///
    /// # Errors
    ///
    /// A failure here means the stored pair is corrupt, since the pair is
    /// sealed together by construction.
    pub fn open(&self) -> Result<String, CryptoError> {
        unprotect(&self.blob, &self.key)
    }

    /// The recorded key.
    pub fn key(&self) -> &PuzzleKey {
        &self.key
    }

    /// The protected blob (`ivHex:cipherHex`).
    pub fn blob(&self) -> &str {
        &self.blob
    }
}
