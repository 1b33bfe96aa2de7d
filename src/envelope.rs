//! The serialized ciphertext envelope.
//!
//! # Wire format
//! ```text
//! envelope = nonceHex ":" ciphertextHex
//! nonceHex      = 24 hex chars (12-byte AES-GCM nonce)
//! ciphertextHex = hex of ciphertext || 16-byte GCM tag
//! ```
//!
//! Exactly one `:` must appear. Encoding emits lowercase hex; decoding
//! accepts either case. An envelope is never mutated. When content changes
//! a new envelope (with a new nonce) replaces it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::{self, NONCE_LEN};
use crate::error::InksealError;
use crate::keys::DerivedKey;

const SEPARATOR: char = ':';

/// Nonce plus authenticated ciphertext for one piece of content.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Envelope {
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encrypt `plaintext` under `key` with a fresh random nonce.
    pub fn seal(plaintext: &str, key: &DerivedKey) -> Result<Self, InksealError> {
        let (nonce, ciphertext) = crypto::seal(key.as_bytes(), plaintext.as_bytes())?;
        Ok(Self { nonce, ciphertext })
    }

    /// Authenticate and decrypt this envelope.
    ///
    /// Returns the exact original plaintext or an error, never a partial
    /// string.
    pub fn open(&self, key: &DerivedKey) -> Result<String, InksealError> {
        let plaintext = crypto::open(key.as_bytes(), &self.nonce, &self.ciphertext)?;
        String::from_utf8(plaintext).map_err(|e| {
            e.into_bytes().zeroize();
            InksealError::Format("plaintext is not UTF-8")
        })
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Ciphertext with the GCM tag appended.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            hex::encode(self.nonce),
            SEPARATOR,
            hex::encode(&self.ciphertext)
        )
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("nonce", &hex::encode(self.nonce))
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

impl FromStr for Envelope {
    type Err = InksealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(SEPARATOR);
        let (nonce_hex, ciphertext_hex) = match (parts.next(), parts.next(), parts.next()) {
            (Some(nonce), Some(ciphertext), None) => (nonce, ciphertext),
            (_, None, _) => return Err(InksealError::Format("missing separator")),
            _ => return Err(InksealError::Format("more than one separator")),
        };

        let mut nonce = [0u8; NONCE_LEN];
        hex::decode_to_slice(nonce_hex, &mut nonce)
            .map_err(|_| InksealError::Format("nonce must be 24 hex characters"))?;

        let ciphertext = hex::decode(ciphertext_hex)
            .map_err(|_| InksealError::Format("ciphertext is not hex"))?;

        Ok(Self { nonce, ciphertext })
    }
}

impl TryFrom<String> for Envelope {
    type Error = InksealError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Envelope> for String {
    fn from(envelope: Envelope) -> Self {
        envelope.to_string()
    }
}

/// Encrypt `plaintext` under `key`.
pub fn encrypt(plaintext: &str, key: &DerivedKey) -> Result<Envelope, InksealError> {
    Envelope::seal(plaintext, key)
}

/// Parse a serialized envelope and decrypt it under `key`.
///
/// Fails with `Format` if `envelope` does not have exactly one `:` or its
/// halves are not valid hex, and with `Authentication` if the tag does not
/// verify.
pub fn decrypt(envelope: &str, key: &DerivedKey) -> Result<String, InksealError> {
    envelope.parse::<Envelope>()?.open(key)
}
