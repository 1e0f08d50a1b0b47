//! Strong types for key material and ciphertext.
//!
//! Raw byte arrays are wrapped in newtypes so a salt can never be passed
//! where an IV is expected, and secret material never prints itself.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, Result};

/// Size of an AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of a generated KDF salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Size of an AES-GCM IV in bytes (96 bits).
pub const IV_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag appended to ciphertext.
pub const TAG_SIZE: usize = 16;

/// A 256-bit symmetric key for AES-256-GCM.
///
/// Zeroized on drop. `Debug` never shows the bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl EncryptionKey {
    /// Generate a new random key from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, rejecting anything that is not exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidInput(format!(
                "key must be {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    ///
    /// Do not store or log the result.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Derive an independent key for a named purpose.
    ///
    /// Uses BLAKE3 in key-derivation mode, so outputs for different contexts
    /// are unrelated and none of them reveals `self`.
    pub fn derive_subkey(&self, context: &str) -> EncryptionKey {
        EncryptionKey(blake3::derive_key(context, &self.0))
    }
}

impl PartialEq for EncryptionKey {
    /// Constant-time comparison.
    fn eq(&self, other: &Self) -> bool {
        blake3::Hash::from(self.0) == blake3::Hash::from(other.0)
    }
}

impl Eq for EncryptionKey {}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncryptionKey").field(&"[REDACTED]").finish()
    }
}

/// A KDF salt. Not secret, but must be unique per derivation purpose.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salt(pub [u8; SALT_SIZE]);

impl Salt {
    /// Generate a fresh random salt.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a decoded slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; SALT_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidInput(format!(
                "salt must be {} bytes, got {}",
                SALT_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self.to_hex())
    }
}

impl AsRef<[u8]> for Salt {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 96-bit AES-GCM initialization vector.
///
/// Only the cipher module can mint a fresh one; callers can parse an IV
/// back from storage but can never choose the IV used to encrypt.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iv(pub [u8; IV_SIZE]);

impl Iv {
    pub(crate) fn generate() -> Self {
        let mut bytes = [0u8; IV_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; IV_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a decoded slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; IV_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidInput(format!(
                "iv must be {} bytes, got {}",
                IV_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; IV_SIZE] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iv({})", self.to_hex())
    }
}

impl AsRef<[u8]> for Iv {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Output of one AES-GCM encryption.
///
/// Only meaningful together with the exact key that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    /// Ciphertext with the 16-byte tag appended.
    pub ciphertext: Vec<u8>,

    /// The IV used for this encryption.
    pub iv: Iv,
}

impl EncryptedBlob {
    /// Decrypt with the given key.
    pub fn open(&self, key: &EncryptionKey) -> Result<Vec<u8>> {
        crate::cipher::decrypt(key, &self.ciphertext, &self.iv)
    }

    /// Size of the ciphertext including tag.
    pub fn ciphertext_len(&self) -> usize {
        self.ciphertext.len()
    }
}
