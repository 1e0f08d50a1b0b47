//! Error types for SealNote crypto primitives.

use thiserror::Error;

/// Errors that can occur in the cryptographic layer.
///
/// `DecryptionFailed` carries no detail: a wrong key, a wrong password, a
/// flipped bit and a truncated tag all look the same to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Malformed salt, IV, key length, or parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The AEAD refused to encrypt (plaintext too large for GCM).
    #[error("encryption failed")]
    EncryptionFailed,

    /// Tag verification failed.
    #[error("decryption failed")]
    DecryptionFailed,
}

/// Result type for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
