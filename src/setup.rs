//! One-time "enable encryption" flow.
//!
//! salt -> key -> key hash, in that order. Each call draws a new salt, so
//! calling it twice for the same password yields two unrelated accounts.
//! Returning users never come through here; they re-derive against the
//! stored salt (see `Session::unlock`).

use chrono::Utc;
use tracing::info;

use crate::config::KdfParams;
use crate::digest::{self, KeyHash};
use crate::error::InksealError;
use crate::keys::{self, DerivedKey, Salt};
use crate::record::AccountRecord;
use crate::session::Session;

/// Output of first-time setup.
///
/// `salt` and `key_hash` go to the store (via `account_record`); `key`
/// stays with the caller's session.
#[derive(Debug)]
pub struct EnclaveSetup {
    pub salt: Salt,
    pub key: DerivedKey,
    pub key_hash: KeyHash,
    pub kdf_version: u32,
}

impl EnclaveSetup {
    /// The record to persist remotely. Contains no key material.
    pub fn account_record(&self) -> AccountRecord {
        AccountRecord {
            salt: self.salt,
            key_hash: self.key_hash,
            kdf_version: self.kdf_version,
            created_at: Utc::now(),
        }
    }

    /// Hand the key to a new unlocked session.
    pub fn into_session(self) -> Session {
        Session::from_key(self.key)
    }
}

/// Set up encryption for a new account with the current KDF parameters.
pub fn initialize_encryption(password: &str) -> Result<EnclaveSetup, InksealError> {
    initialize_encryption_with(&KdfParams::default(), password)
}

/// Set up encryption for a new account with explicit KDF parameters.
pub fn initialize_encryption_with(
    params: &KdfParams,
    password: &str,
) -> Result<EnclaveSetup, InksealError> {
    let salt = keys::generate_salt()?;
    let key = keys::derive_key_with(params, password, &salt);
    let key_hash = digest::hash_key(&key);

    info!(%salt, kdf_version = params.version(), "encryption initialised");

    Ok(EnclaveSetup {
        salt,
        key,
        key_hash,
        kdf_version: params.version(),
    })
}
