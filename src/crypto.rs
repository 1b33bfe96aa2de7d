//! Low-level cryptographic operations.
//!
//! This is the only module in the crate that imports `ring`. Every other
//! module reaches the primitives through the functions exposed here.
//!
//! Primitive choices:
//! - **Cipher**: AES-256-GCM (authenticated encryption)
//! - **Nonce**: 96-bit (12 bytes), generated fresh per operation via `SystemRandom`
//! - **KDF**: PBKDF2-HMAC-SHA256
//! - **Digest**: SHA-256

use std::num::NonZeroU32;

use ring::aead::{self, Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::digest;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::InksealError;

/// The AEAD algorithm used throughout inkseal.
const ALGORITHM: &aead::Algorithm = &AES_256_GCM;

/// Size of the nonce in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Size of a derived key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Size of a salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Size of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Fill `buf` from the system's secure random source.
///
/// There is no fallback. If the OS source fails, the caller's operation
/// aborts with `RandomSource`.
pub fn fill_random(buf: &mut [u8]) -> Result<(), InksealError> {
    SystemRandom::new()
        .fill(buf)
        .map_err(|_| InksealError::RandomSource)
}

fn aead_key(key_bytes: &[u8; KEY_LEN]) -> Result<LessSafeKey, InksealError> {
    let unbound =
        UnboundKey::new(ALGORITHM, key_bytes).map_err(|_| InksealError::InvalidEncoding("key"))?;
    Ok(LessSafeKey::new(unbound))
}

/// Encrypt `plaintext` under a freshly generated nonce.
///
/// Returns the nonce and `ciphertext || tag`. The nonce is never cached or
/// counter-derived; each call draws 12 new bytes from `SystemRandom`.
pub fn seal(
    key_bytes: &[u8; KEY_LEN],
    plaintext: &[u8],
) -> Result<([u8; NONCE_LEN], Vec<u8>), InksealError> {
    let mut nonce = [0u8; NONCE_LEN];
    fill_random(&mut nonce)?;
    let ciphertext = seal_with_nonce(key_bytes, nonce, plaintext)?;
    Ok((nonce, ciphertext))
}

fn seal_with_nonce(
    key_bytes: &[u8; KEY_LEN],
    nonce: [u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, InksealError> {
    let key = aead_key(key_bytes)?;

    let mut in_out = Vec::with_capacity(plaintext.len() + TAG_LEN);
    in_out.extend_from_slice(plaintext);

    key.seal_in_place_append_tag(
        Nonce::assume_unique_for_key(nonce),
        Aad::empty(),
        &mut in_out,
    )
    .map_err(|_| InksealError::Encryption)?;

    Ok(in_out)
}

/// Decrypt `ciphertext || tag` produced by `seal`.
///
/// If the key is wrong or the ciphertext has been tampered with, the GCM
/// authentication check fails and this returns `Authentication`. The caller
/// receives no partial plaintext.
pub fn open(
    key_bytes: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, InksealError> {
    if ciphertext.len() < TAG_LEN {
        return Err(InksealError::Format("ciphertext shorter than tag"));
    }

    let key = aead_key(key_bytes)?;
    let mut payload = ciphertext.to_vec();

    let plaintext_len = key
        .open_in_place(Nonce::assume_unique_for_key(*nonce), Aad::empty(), &mut payload)
        .map_err(|_| InksealError::Authentication)?
        .len();

    payload.truncate(plaintext_len);
    Ok(payload)
}

/// Run PBKDF2-HMAC-SHA256 over `secret` and `salt`, filling `out`.
pub fn pbkdf2_sha256(iterations: NonZeroU32, salt: &[u8], secret: &[u8], out: &mut [u8; KEY_LEN]) {
    pbkdf2::derive(pbkdf2::PBKDF2_HMAC_SHA256, iterations, salt, secret, out);
}

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let digest = digest::digest(&digest::SHA256, data);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(digest.as_ref());
    out
}
