//! Records handed to the remote store.
//!
//! Everything here is non-secret: salts, key hashes, envelopes and content
//! hashes. Passwords and derived keys have no field to land in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::{ContentHash, KeyHash};
use crate::envelope::Envelope;
use crate::keys::Salt;

/// The per-account state persisted at setup and read back at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Salt fed to key derivation. Immutable after setup.
    pub salt: Salt,
    /// Hash of the derived key, checked when a session unlocks.
    pub key_hash: KeyHash,
    /// Registered KDF parameter version the key was derived with.
    pub kdf_version: u32,
    /// When encryption was enabled for the account.
    pub created_at: DateTime<Utc>,
}

/// One encrypted content item as the store keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedEntry {
    pub envelope: Envelope,
    /// Hash of the plaintext, checked after decryption when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<ContentHash>,
    /// When this envelope was produced. Replacing content replaces the
    /// whole entry.
    pub sealed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::hash_content;

    #[test]
    fn account_record_json_shape() {
        let record = AccountRecord {
            salt: "000102030405060708090a0b0c0d0e0f".parse().unwrap(),
            key_hash: hash_content("k").to_string().parse().unwrap(),
            kdf_version: 1,
            created_at: Utc::now(),
        };

        let value: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["salt"], "000102030405060708090a0b0c0d0e0f");
        assert_eq!(value["kdf_version"], 1);
        assert_eq!(value["key_hash"].as_str().unwrap().len(), 64);

        let back: AccountRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn sealed_entry_content_hash_is_optional() {
        let key = crate::keys::DerivedKey::from_hex(&"11".repeat(32)).unwrap();
        let entry = SealedEntry {
            envelope: Envelope::seal("no hash kept", &key).unwrap(),
            content_hash: None,
            sealed_at: Utc::now(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("content_hash").is_none());
        let back: SealedEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
