//! Password-based key derivation (PBKDF2-HMAC-SHA256).

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::error::{CryptoError, Result};
use crate::types::{EncryptionKey, KEY_SIZE, SALT_SIZE};

/// Iteration count used when nothing else is configured.
pub const DEFAULT_ITERATIONS: u32 = 250_000;

/// Lowest iteration count `derive_key` will accept.
pub const MIN_ITERATIONS: u32 = 100_000;

/// KDF parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// PBKDF2 iteration count.
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Derive a key with these parameters.
    pub fn derive(&self, password: &str, salt: &[u8]) -> Result<EncryptionKey> {
        derive_key(password, salt, self.iterations)
    }
}

/// Derive a 256-bit key from `password` and `salt`.
///
/// Deterministic in all three inputs. The full salt is always used; salts
/// shorter than 16 bytes are rejected rather than padded.
pub fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Result<EncryptionKey> {
    if password.is_empty() {
        return Err(CryptoError::InvalidInput(
            "password cannot be empty".to_string(),
        ));
    }

    if salt.len() < SALT_SIZE {
        return Err(CryptoError::InvalidInput(format!(
            "salt must be at least {} bytes, got {}",
            SALT_SIZE,
            salt.len()
        )));
    }

    if iterations < MIN_ITERATIONS {
        return Err(CryptoError::InvalidInput(format!(
            "iteration count must be at least {}, got {}",
            MIN_ITERATIONS, iterations
        )));
    }

    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    Ok(EncryptionKey::from_bytes(key))
}
