//! Error types for the vault.

use sealnote_crypto::CryptoError;
use sealnote_share::ShareError;
use sealnote_store::StoreError;
use thiserror::Error;

/// Shown for every failure that must not reveal which check failed.
pub const GENERIC_DECRYPT_MESSAGE: &str = "failed to decrypt - check password or link integrity";

/// Errors that can occur during vault operations.
///
/// Crypto and share failures are flattened into this enum so callers match
/// on one taxonomy regardless of which layer raised them.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Malformed salt, IV, encoding, or empty required field.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A share URL is missing a required parameter.
    #[error("incomplete link: missing `{0}` parameter")]
    IncompleteLink(&'static str),

    /// Wrong key, wrong password, or tampered data.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The share envelope expiry has passed.
    #[error("link expired at {expired_at}")]
    LinkExpired { expired_at: i64 },

    /// Major version this build cannot read.
    #[error("unsupported version: {0}")]
    VersionUnsupported(String),

    /// A protected share was opened without a password.
    #[error("password required")]
    PasswordRequired,

    /// Encryption refused the input.
    #[error("encryption failed")]
    EncryptionFailed,

    /// A credential already exists for this installation.
    #[error("already registered")]
    AlreadyRegistered,

    /// No credential exists yet.
    #[error("not registered")]
    NotRegistered,

    /// Wrong username or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The session was logged out.
    #[error("session closed")]
    SessionClosed,

    /// Note not found.
    #[error("note not found: {0}")]
    NoteNotFound(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Record or export serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A blocking KDF task did not complete.
    #[error("background task failed: {0}")]
    Background(String),
}

impl VaultError {
    /// Text safe to show an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            VaultError::DecryptionFailed | VaultError::IncompleteLink(_) => {
                GENERIC_DECRYPT_MESSAGE
            }
            VaultError::LinkExpired { .. } => "this link has expired",
            VaultError::PasswordRequired => "this link is password protected",
            VaultError::VersionUnsupported(_) => "this content was created by an incompatible version",
            VaultError::InvalidCredentials => "invalid username or password",
            VaultError::NotRegistered => "no account exists yet",
            VaultError::AlreadyRegistered => "an account already exists",
            VaultError::SessionClosed => "session ended - please log in again",
            VaultError::NoteNotFound(_) => "note not found",
            VaultError::InvalidInput(_) => "invalid input",
            VaultError::EncryptionFailed
            | VaultError::Store(_)
            | VaultError::Serialization(_)
            | VaultError::Background(_) => "an unexpected error occurred",
        }
    }
}

impl From<CryptoError> for VaultError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidInput(msg) => VaultError::InvalidInput(msg),
            CryptoError::EncryptionFailed => VaultError::EncryptionFailed,
            CryptoError::DecryptionFailed => VaultError::DecryptionFailed,
        }
    }
}

impl From<ShareError> for VaultError {
    fn from(e: ShareError) -> Self {
        match e {
            ShareError::InvalidInput(msg) => VaultError::InvalidInput(msg),
            ShareError::IncompleteLink(param) => VaultError::IncompleteLink(param),
            ShareError::DecryptionFailed => VaultError::DecryptionFailed,
            ShareError::LinkExpired { expired_at } => VaultError::LinkExpired { expired_at },
            ShareError::VersionUnsupported(v) => VaultError::VersionUnsupported(v),
            ShareError::PasswordRequired => VaultError::PasswordRequired,
            ShareError::EncryptionFailed => VaultError::EncryptionFailed,
            ShareError::Serialization(msg) => VaultError::Serialization(msg),
        }
    }
}

/// Result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_checks_share_one_message() {
        assert_eq!(
            VaultError::DecryptionFailed.user_message(),
            VaultError::IncompleteLink("i").user_message()
        );
        assert_ne!(
            VaultError::DecryptionFailed.user_message(),
            VaultError::LinkExpired { expired_at: 0 }.user_message()
        );
    }

    #[test]
    fn test_share_errors_flatten() {
        assert!(matches!(
            VaultError::from(ShareError::IncompleteLink("k")),
            VaultError::IncompleteLink("k")
        ));
        assert!(matches!(
            VaultError::from(CryptoError::DecryptionFailed),
            VaultError::DecryptionFailed
        ));
    }
}
