//! Salt generation, password-based key derivation and key ownership.
//!
//! ## Derivation structure
//!
//! ```text
//! PBKDF2-HMAC-SHA256(
//!     password   = UTF-8 bytes of the password,
//!     salt       = 16 raw salt bytes (not the hex text),
//!     iterations = KdfParams::iterations(),
//!     dkLen      = 32
//! )
//! ```
//!
//! Derivation is deterministic: a returning user rebuilds the same key from
//! the same password and the salt the store kept. It is also deliberately
//! slow (about 100k HMAC rounds), so callers on cooperative schedulers
//! should run it off the UI/event thread.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::KdfParams;
use crate::crypto::{self, KEY_LEN, SALT_LEN};
use crate::error::InksealError;

// ---------------------------------------------------------------------------
// Salt
// ---------------------------------------------------------------------------

/// A 128-bit per-account salt. Non-secret; persisted by the store and
/// immutable once an account is set up.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self)
    }
}

impl FromStr for Salt {
    type Err = InksealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; SALT_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InksealError::InvalidEncoding("salt"))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Salt {
    type Error = InksealError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Salt> for String {
    fn from(salt: Salt) -> Self {
        salt.to_string()
    }
}

/// Generate a fresh random salt for a new account.
///
/// Fails with `RandomSource` if the OS random source is unavailable. Setup
/// must abort in that case; there is no weaker fallback.
pub fn generate_salt() -> Result<Salt, InksealError> {
    let mut bytes = [0u8; SALT_LEN];
    crypto::fill_random(&mut bytes)?;
    Ok(Salt(bytes))
}

// ---------------------------------------------------------------------------
// Derived key
// ---------------------------------------------------------------------------

/// A 256-bit key derived from a password and salt.
///
/// - Not `Clone`. The session that derived it owns it.
/// - Zeroised on drop.
/// - `Debug` never prints key bytes.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Parse a key from its 64-character hex form.
    pub fn from_hex(s: &str) -> Result<Self, InksealError> {
        let mut bytes = [0u8; KEY_LEN];
        if hex::decode_to_slice(s, &mut bytes).is_err() {
            bytes.zeroize();
            return Err(InksealError::InvalidEncoding("key"));
        }
        Ok(Self { bytes })
    }

    /// The key's lowercase hex form. This is also the text that
    /// `digest::hash_key` hashes.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive the account key from `password` and `salt` with the current
/// (version 1) parameters.
///
/// Blocking and CPU-bound.
pub fn derive_key(password: &str, salt: &Salt) -> DerivedKey {
    derive_key_with(&KdfParams::V1, password, salt)
}

/// Derive the account key with an explicit registered parameter set.
pub fn derive_key_with(params: &KdfParams, password: &str, salt: &Salt) -> DerivedKey {
    trace!(kdf_version = params.version(), %salt, "deriving key");

    let mut bytes = [0u8; KEY_LEN];
    crypto::pbkdf2_sha256(params.iterations(), salt.as_bytes(), password.as_bytes(), &mut bytes);
    DerivedKey { bytes }
}
