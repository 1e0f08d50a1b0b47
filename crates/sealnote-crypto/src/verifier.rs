//! Password verification without storing the password or the session key.
//!
//! One PBKDF2 run produces a master secret. Two BLAKE3 key-derivation
//! contexts split it into the stored verifier and the in-memory session key,
//! so the stored value is never the encryption key and cannot be turned
//! into it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CryptoError, Result};
use crate::kdf::derive_key;
use crate::types::{EncryptionKey, Salt, KEY_SIZE};

const VERIFIER_CONTEXT: &str = "sealnote 2024-06 credential verifier v1";
const SESSION_CONTEXT: &str = "sealnote 2024-06 session encryption v1";

/// The stored login verifier (32 bytes).
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct PasswordHash(pub [u8; KEY_SIZE]);

impl PasswordHash {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a decoded slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidInput(format!(
                "password hash must be {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Constant-time comparison.
    pub fn ct_eq(&self, other: &PasswordHash) -> bool {
        blake3::Hash::from(self.0) == blake3::Hash::from(other.0)
    }
}

impl PartialEq for PasswordHash {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other)
    }
}

impl Eq for PasswordHash {}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordHash({}..)", &hex::encode(self.0)[..8])
    }
}

/// Everything one password derivation yields.
#[derive(Debug)]
pub struct CredentialKeys {
    /// Value persisted with the credential record.
    pub verification: PasswordHash,
    /// Key for note encryption; lives only in the session.
    pub session_key: EncryptionKey,
}

impl CredentialKeys {
    /// Check this derivation against the stored verifier in constant time.
    pub fn matches(&self, stored: &PasswordHash) -> bool {
        self.verification.ct_eq(stored)
    }
}

/// Derive the verifier and session key for `password` under `salt`.
pub fn derive_credential(password: &str, salt: &Salt, iterations: u32) -> Result<CredentialKeys> {
    let master = derive_key(password, salt.as_bytes(), iterations)?;

    Ok(CredentialKeys {
        verification: PasswordHash(*master.derive_subkey(VERIFIER_CONTEXT).as_bytes()),
        session_key: master.derive_subkey(SESSION_CONTEXT),
    })
}

/// Hash a password for storage, generating a salt if none is given.
pub fn hash_password(
    password: &str,
    salt: Option<Salt>,
    iterations: u32,
) -> Result<(PasswordHash, Salt)> {
    let salt = salt.unwrap_or_else(Salt::random);
    let keys = derive_credential(password, &salt, iterations)?;
    Ok((keys.verification, salt))
}

/// Check `password` against a stored hash and salt.
pub fn verify_password(
    password: &str,
    salt: &Salt,
    stored: &PasswordHash,
    iterations: u32,
) -> Result<bool> {
    let keys = derive_credential(password, salt, iterations)?;
    Ok(keys.matches(stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::MIN_ITERATIONS;

    #[test]
    fn test_hash_then_verify() {
        let (hash, salt) = hash_password("hunter22", None, MIN_ITERATIONS).unwrap();

        assert!(verify_password("hunter22", &salt, &hash, MIN_ITERATIONS).unwrap());
        assert!(!verify_password("hunter23", &salt, &hash, MIN_ITERATIONS).unwrap());
    }

    #[test]
    fn test_explicit_salt_is_kept() {
        let salt = Salt::from_bytes([0x07; 16]);
        let (h1, s1) = hash_password("pw", Some(salt), MIN_ITERATIONS).unwrap();
        let (h2, s2) = hash_password("pw", Some(salt), MIN_ITERATIONS).unwrap();

        assert_eq!(s1, salt);
        assert_eq!(s2, salt);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_verifier_is_not_the_encryption_key() {
        let salt = Salt::from_bytes([0x09; 16]);
        let keys = derive_credential("pw", &salt, MIN_ITERATIONS).unwrap();
        let raw = derive_key("pw", salt.as_bytes(), MIN_ITERATIONS).unwrap();

        assert_ne!(keys.verification.as_bytes(), keys.session_key.as_bytes());
        assert_ne!(keys.verification.as_bytes(), raw.as_bytes());
        assert_ne!(keys.session_key.as_bytes(), raw.as_bytes());
    }

    #[test]
    fn test_fresh_salts_differ() {
        let (h1, s1) = hash_password("pw", None, MIN_ITERATIONS).unwrap();
        let (h2, s2) = hash_password("pw", None, MIN_ITERATIONS).unwrap();
        assert_ne!(s1, s2);
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_hash_serializes_and_redacts() {
        let hash = PasswordHash::from_bytes([0xee; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        let back: PasswordHash = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, back);
        assert!(!format!("{:?}", hash).contains(&hex::encode([0xee; 16])));
    }
}
