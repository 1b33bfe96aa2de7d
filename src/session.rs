//! Session-scoped key holder.
//!
//! The derived key lives in exactly one place: a `Session` the caller owns
//! and passes to every encrypt/decrypt. There is no crate-level "current
//! key". Locking or dropping the session zeroises the key.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::KdfParams;
use crate::digest::{self, hash_content};
use crate::envelope::Envelope;
use crate::error::InksealError;
use crate::keys::{self, DerivedKey};
use crate::record::{AccountRecord, SealedEntry};

/// Holds at most one derived key for the lifetime of a login.
#[derive(Default)]
pub struct Session {
    key: Option<DerivedKey>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("unlocked", &self.is_unlocked())
            .finish()
    }
}

impl Session {
    /// A locked session.
    pub fn new() -> Self {
        Self::default()
    }

    /// An unlocked session holding `key`.
    pub fn from_key(key: DerivedKey) -> Self {
        Self { key: Some(key) }
    }

    /// Re-derive the key from `password` and the account's stored salt and
    /// KDF version, then check it against the stored key hash.
    ///
    /// On `KeyMismatch` the session is left exactly as it was.
    pub fn unlock(&mut self, password: &str, account: &AccountRecord) -> Result<(), InksealError> {
        let params = KdfParams::for_version(account.kdf_version)?;
        let key = keys::derive_key_with(&params, password, &account.salt);

        if !digest::verify_key(&key, &account.key_hash) {
            warn!(salt = %account.salt, "unlock rejected: key hash mismatch");
            return Err(InksealError::KeyMismatch);
        }

        info!(salt = %account.salt, kdf_version = account.kdf_version, "session unlocked");
        self.key = Some(key);
        Ok(())
    }

    /// Drop (and zeroise) the held key.
    pub fn lock(&mut self) {
        if self.key.take().is_some() {
            info!("session locked");
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.key.is_some()
    }

    fn key(&self) -> Result<&DerivedKey, InksealError> {
        self.key.as_ref().ok_or(InksealError::Locked)
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<Envelope, InksealError> {
        Envelope::seal(plaintext, self.key()?)
    }

    pub fn decrypt(&self, envelope: &Envelope) -> Result<String, InksealError> {
        envelope.open(self.key()?)
    }

    /// Encrypt `plaintext` and record its content hash.
    pub fn seal_entry(&self, plaintext: &str) -> Result<SealedEntry, InksealError> {
        let envelope = self.encrypt(plaintext)?;
        debug!(plaintext_len = plaintext.len(), "entry sealed");
        Ok(SealedEntry {
            envelope,
            content_hash: Some(hash_content(plaintext)),
            sealed_at: Utc::now(),
        })
    }

    /// Decrypt an entry and, if it carries a content hash, check the
    /// plaintext against it.
    pub fn open_entry(&self, entry: &SealedEntry) -> Result<String, InksealError> {
        let plaintext = self.decrypt(&entry.envelope)?;
        if let Some(hash) = &entry.content_hash {
            if !hash.matches(&plaintext) {
                warn!("entry content hash mismatch");
                return Err(InksealError::ContentMismatch);
            }
        }
        Ok(plaintext)
    }
}
