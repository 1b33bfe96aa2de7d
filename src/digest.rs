//! Verification hashes.
//!
//! `KeyHash` is SHA-256 over the derived key's lowercase hex text. It lets
//! the store confirm that a session re-derived the right key without ever
//! seeing the key. It is a single unsalted round, so anyone holding it can
//! test candidate passwords offline at the cost of one PBKDF2 run each;
//! treat it with the confidentiality of a password hash.
//!
//! `ContentHash` is SHA-256 over the plaintext's UTF-8 bytes, independent of
//! the cipher's own tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::{self, DIGEST_LEN};
use crate::error::InksealError;
use crate::keys::DerivedKey;

fn parse_digest(s: &str, what: &'static str) -> Result<[u8; DIGEST_LEN], InksealError> {
    let mut bytes = [0u8; DIGEST_LEN];
    hex::decode_to_slice(s, &mut bytes).map_err(|_| InksealError::InvalidEncoding(what))?;
    Ok(bytes)
}

/// SHA-256 of a derived key's hex encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyHash([u8; DIGEST_LEN]);

/// SHA-256 of a plaintext's UTF-8 encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash([u8; DIGEST_LEN]);

macro_rules! hex_digest {
    ($ty:ident, $what:literal) => {
        impl $ty {
            pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($ty), "({})"), self)
            }
        }

        impl FromStr for $ty {
            type Err = InksealError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_digest(s, $what).map(Self)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = InksealError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(hash: $ty) -> Self {
                hash.to_string()
            }
        }
    };
}

hex_digest!(KeyHash, "key hash");
hex_digest!(ContentHash, "content hash");

impl ContentHash {
    /// Whether `plaintext` hashes to this value.
    pub fn matches(&self, plaintext: &str) -> bool {
        hash_content(plaintext) == *self
    }
}

/// Hash a derived key for server-side verification.
pub fn hash_key(key: &DerivedKey) -> KeyHash {
    let text = key.to_hex();
    KeyHash(crypto::sha256(text.as_bytes()))
}

/// Hash plaintext content for integrity checks.
pub fn hash_content(plaintext: &str) -> ContentHash {
    ContentHash(crypto::sha256(plaintext.as_bytes()))
}

/// Whether `key` hashes to `expected`.
pub fn verify_key(key: &DerivedKey, expected: &KeyHash) -> bool {
    hash_key(key) == *expected
}
