//! Password hashing utilities
//!
//! PBKDF2-HMAC-SHA256 with a random 16-byte salt. The stored credential is
//! `base64(salt ‖ derived_key)`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

pub const SALT_LEN: usize = 16;
pub const KEY_LEN: usize = 20;
pub const ITERATIONS: u32 = 10_000;

/// Fixed salt for [`dummy_verify`]
const DUMMY_SALT: [u8; SALT_LEN] = [0x5a; SALT_LEN];
static DUMMY_KEY: Lazy<[u8; KEY_LEN]> = Lazy::new(|| derive("", &DUMMY_SALT));

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("stored password hash is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("stored password hash has unexpected length {0}")]
    Length(usize),
}

fn derive(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut key);
    key
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let key = derive(password, &salt);

    let mut stored = Vec::with_capacity(SALT_LEN + KEY_LEN);
    stored.extend_from_slice(&salt);
    stored.extend_from_slice(&key);
    STANDARD.encode(stored)
}

/// Verify a password against a stored hash.
///
/// The derived key comparison runs in constant time.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let stored = STANDARD.decode(stored_hash)?;
    if stored.len() != SALT_LEN + KEY_LEN {
        return Err(PasswordError::Length(stored.len()));
    }

    let (salt, expected) = stored.split_at(SALT_LEN);
    let actual = derive(password, salt);

    Ok(actual[..].ct_eq(expected).into())
}

/// Spend the same derivation work as [`verify_password`] when there is no
/// stored hash to check, so unknown accounts are not faster to reject.
pub fn dummy_verify(password: &str) -> bool {
    let actual = derive(password, &DUMMY_SALT);
    actual[..].ct_eq(&DUMMY_KEY[..]).into()
}
