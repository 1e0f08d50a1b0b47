//! Error types for share links.

use sealnote_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while creating or opening a share.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// Malformed encoding, salt, IV, key, or version string.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required URL parameter is missing or empty.
    #[error("incomplete link: missing `{0}` parameter")]
    IncompleteLink(&'static str),

    /// Wrong key, wrong password, or tampered ciphertext.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The envelope expiry has passed.
    #[error("link expired at {expired_at}")]
    LinkExpired { expired_at: i64 },

    /// Major version this build cannot read.
    #[error("unsupported version: {0}")]
    VersionUnsupported(String),

    /// The link is password-protected and no password was given.
    #[error("password required")]
    PasswordRequired,

    /// Encryption refused the input.
    #[error("encryption failed")]
    EncryptionFailed,

    /// Envelope could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<CryptoError> for ShareError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidInput(msg) => ShareError::InvalidInput(msg),
            CryptoError::EncryptionFailed => ShareError::EncryptionFailed,
            CryptoError::DecryptionFailed => ShareError::DecryptionFailed,
        }
    }
}

/// Result type for share operations.
pub type Result<T> = std::result::Result<T, ShareError>;
