//! Error types for inkseal.
//!
//! Every variant is a distinct failure mode of the envelope. Messages say
//! *what* failed and nothing about key state: a wrong key and a tampered
//! ciphertext both surface as `Authentication`.

use std::fmt;

/// The single error type for all inkseal operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InksealError {
    /// The envelope does not match `nonceHex:ciphertextHex`, or an
    /// authenticated payload is not valid UTF-8.
    Format(&'static str),

    /// AES-GCM sealing failed (the plaintext exceeds the cipher's limit).
    Encryption,

    /// The AES-GCM tag did not verify. Covers wrong key, corrupted
    /// ciphertext and tampering without distinguishing them.
    Authentication,

    /// The system's secure random source failed to produce bytes.
    RandomSource,

    /// A salt, key or digest string is not hex of the expected length.
    InvalidEncoding(&'static str),

    /// A re-derived key does not hash to the stored key hash.
    KeyMismatch,

    /// Decrypted content does not hash to the stored content hash.
    ContentMismatch,

    /// The session holds no key.
    Locked,

    /// No key-derivation parameters are registered under this version.
    UnsupportedKdfVersion(u32),

    /// Configuration could not be read or parsed.
    InvalidConfig(String),

    /// An account record already exists and cannot be replaced.
    AccountExists(String),

    /// The requested account or entry is not in the store.
    NotFound(String),
}

impl fmt::Display for InksealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(reason) => write!(f, "malformed envelope: {}", reason),
            Self::Encryption => write!(f, "encryption failed"),
            Self::Authentication => write!(f, "decryption failed"),
            Self::RandomSource => write!(f, "secure random source unavailable"),
            Self::InvalidEncoding(what) => write!(f, "invalid {} encoding", what),
            Self::KeyMismatch => write!(f, "derived key does not match stored key hash"),
            Self::ContentMismatch => write!(f, "content does not match stored content hash"),
            Self::Locked => write!(f, "session is locked"),
            Self::UnsupportedKdfVersion(v) => write!(f, "unsupported kdf version: {}", v),
            Self::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
            Self::AccountExists(id) => write!(f, "account already exists: {}", id),
            Self::NotFound(id) => write!(f, "not found: {}", id),
        }
    }
}

impl std::error::Error for InksealError {}
