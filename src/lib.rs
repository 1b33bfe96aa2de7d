//! # inkseal
//!
//! Client-side encryption envelope for journal content.
//!
//! A user's password and a server-stored, non-secret salt reconstruct a
//! 256-bit key (PBKDF2-HMAC-SHA256, 100,000 iterations). Content is sealed
//! under that key with AES-256-GCM and a fresh nonce into a
//! `nonceHex:ciphertextHex` envelope. The backend only ever sees the salt,
//! a SHA-256 hash of the key, envelopes and content hashes.
//!
//! ## Flow
//!
//! ```text
//! setup:   password -> generate_salt -> derive_key -> hash_key
//!          (salt, key_hash) -> store;  key -> Session
//! login:   password + stored salt -> derive_key -> compare hash_key -> Session
//! content: Session::encrypt / Session::decrypt
//! ```
//!
//! ## Public API
//!
//! Only the items re-exported here are intended for callers. The `ring`
//! primitives stay inside `crypto`.

pub(crate) mod crypto;
pub mod config;
pub mod digest;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod record;
pub mod session;
pub mod setup;
pub mod store;

pub use config::{EnclaveConfig, KdfParams, CURRENT_KDF_VERSION, PBKDF2_ITERATIONS};
pub use crypto::{DIGEST_LEN, KEY_LEN, NONCE_LEN, SALT_LEN, TAG_LEN};
pub use digest::{hash_content, hash_key, verify_key, ContentHash, KeyHash};
pub use envelope::{decrypt, encrypt, Envelope};
pub use error::InksealError;
pub use keys::{derive_key, derive_key_with, generate_salt, DerivedKey, Salt};
pub use record::{AccountRecord, SealedEntry};
pub use session::Session;
pub use setup::{initialize_encryption, initialize_encryption_with, EnclaveSetup};
pub use store::{MemoryStore, RecordStore};
