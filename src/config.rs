//! Key-derivation parameters and crate configuration.
//!
//! PBKDF2 parameters are a versioned registry. A version, once published,
//! never changes: every client of an account must derive with the exact
//! iteration count the account was set up with. Raising the work factor
//! means registering a new version and migrating accounts onto it.

use std::num::NonZeroU32;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InksealError;

/// Iteration count of KDF version 1.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// The current KDF version used for new accounts.
pub const CURRENT_KDF_VERSION: u32 = 1;

/// A registered set of PBKDF2-HMAC-SHA256 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    version: u32,
    iterations: NonZeroU32,
}

impl KdfParams {
    /// Version 1: PBKDF2-HMAC-SHA256, 100,000 iterations, 256-bit output.
    pub const V1: KdfParams = KdfParams {
        version: 1,
        iterations: match NonZeroU32::new(PBKDF2_ITERATIONS) {
            Some(n) => n,
            None => panic!("iteration count must be non-zero"),
        },
    };

    /// Look up the parameters registered under `version`.
    pub fn for_version(version: u32) -> Result<Self, InksealError> {
        match version {
            1 => Ok(Self::V1),
            other => Err(InksealError::UnsupportedKdfVersion(other)),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn iterations(&self) -> NonZeroU32 {
        self.iterations
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::V1
    }
}

/// Crate configuration, loadable from JSON.
///
/// ```json
/// { "kdf_version": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnclaveConfig {
    /// KDF version applied to newly initialised accounts.
    #[serde(default = "default_kdf_version")]
    pub kdf_version: u32,
}

fn default_kdf_version() -> u32 {
    CURRENT_KDF_VERSION
}

impl Default for EnclaveConfig {
    fn default() -> Self {
        Self {
            kdf_version: CURRENT_KDF_VERSION,
        }
    }
}

impl EnclaveConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, InksealError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| InksealError::InvalidConfig(e.to_string()))?;
        config.kdf()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InksealError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| InksealError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Resolve the configured KDF version against the registry.
    pub fn kdf(&self) -> Result<KdfParams, InksealError> {
        KdfParams::for_version(self.kdf_version)
    }
}
