//! Password-based key wrapping.
//!
//! A random data key is encrypted under a key derived from a password with
//! its own fresh salt. Only the password is needed to unwrap it again; a
//! wrong password surfaces as the same `DecryptionFailed` as tampering.

use serde::{Deserialize, Serialize};

use crate::cipher;
use crate::error::{CryptoError, Result};
use crate::kdf::{derive_key, DEFAULT_ITERATIONS};
use crate::types::{EncryptionKey, Iv, Salt};

/// A data key encrypted under a password-derived key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedKey {
    /// Salt for re-deriving the password key.
    pub salt: Salt,

    /// IV used to encrypt the data key.
    pub iv: Iv,

    /// The data key, encrypted (includes authentication tag).
    pub wrapped_key: Vec<u8>,
}

/// Wrap `data_key` under `password`.
pub fn wrap_key(data_key: &EncryptionKey, password: &str) -> Result<WrappedKey> {
    let salt = Salt::random();
    let password_key = derive_key(password, salt.as_bytes(), DEFAULT_ITERATIONS)?;

    let blob = cipher::encrypt(&password_key, data_key.as_bytes())?;

    Ok(WrappedKey {
        salt,
        iv: blob.iv,
        wrapped_key: blob.ciphertext,
    })
}

/// Recover the data key from `wrapped` using `password`.
pub fn unwrap_key(wrapped: &WrappedKey, password: &str) -> Result<EncryptionKey> {
    let password_key = derive_key(password, wrapped.salt.as_bytes(), DEFAULT_ITERATIONS)?;

    let key_bytes = cipher::decrypt(&password_key, &wrapped.wrapped_key, &wrapped.iv)?;

    // An authentic blob of the wrong size is still not a usable key; report it
    // the same way as any other failure.
    EncryptionKey::from_slice(&key_bytes).map_err(|_| CryptoError::DecryptionFailed)
}

impl WrappedKey {
    /// Wrap `data_key` under `password`.
    pub fn wrap(data_key: &EncryptionKey, password: &str) -> Result<Self> {
        wrap_key(data_key, password)
    }

    /// Unwrap with `password`.
    pub fn unwrap_with(&self, password: &str) -> Result<EncryptionKey> {
        unwrap_key(self, password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_unwrap_roundtrip() {
        let data_key = EncryptionKey::generate();
        let wrapped = wrap_key(&data_key, "secret123").unwrap();

        let recovered = unwrap_key(&wrapped, "secret123").unwrap();
        assert_eq!(data_key.as_bytes(), recovered.as_bytes());
    }

    #[test]
    fn test_wrong_password_fails() {
        let data_key = EncryptionKey::generate();
        let wrapped = wrap_key(&data_key, "secret123").unwrap();

        assert_eq!(
            unwrap_key(&wrapped, "wrong").unwrap_err(),
            CryptoError::DecryptionFailed
        );
    }

    #[test]
    fn test_each_wrap_uses_fresh_salt_and_iv() {
        let data_key = EncryptionKey::generate();
        let a = wrap_key(&data_key, "pw").unwrap();
        let b = wrap_key(&data_key, "pw").unwrap();

        assert_ne!(a.salt, b.salt);
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.wrapped_key, b.wrapped_key);
    }

    #[test]
    fn test_tampered_wrap_fails() {
        let data_key = EncryptionKey::generate();
        let mut wrapped = wrap_key(&data_key, "pw").unwrap();
        wrapped.wrapped_key[5] ^= 0x10;

        assert_eq!(
            wrapped.unwrap_with("pw").unwrap_err(),
            CryptoError::DecryptionFailed
        );
    }

    #[test]
    fn test_swapped_salt_fails() {
        let data_key = EncryptionKey::generate();
        let mut wrapped = WrappedKey::wrap(&data_key, "pw").unwrap();
        wrapped.salt = Salt::random();

        assert!(wrapped.unwrap_with("pw").is_err());
    }
}
