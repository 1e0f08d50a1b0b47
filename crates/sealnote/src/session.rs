//! The logged-in session context.
//!
//! A `Session` is the only holder of the session encryption key. It is
//! created by [`Vault::register`](crate::Vault::register) or
//! [`Vault::login`](crate::Vault::login) and passed by reference to every
//! operation that needs the key. Logging out clears the key; any call that
//! reaches the lock afterwards fails with `SessionClosed`.

use std::fmt;

use tokio::sync::RwLock;

use sealnote_crypto::{cipher, EncryptedBlob, EncryptionKey, Iv};

use crate::error::{Result, VaultError};

/// A logged-in session.
///
/// Not `Clone`: share it behind an `Arc` if several tasks need it.
pub struct Session {
    username: String,
    key: RwLock<Option<EncryptionKey>>,
}

impl Session {
    pub(crate) fn new(username: String, key: EncryptionKey) -> Self {
        Self {
            username,
            key: RwLock::new(Some(key)),
        }
    }

    /// The user this session belongs to.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether the key is still held.
    pub async fn is_open(&self) -> bool {
        self.key.read().await.is_some()
    }

    /// Clear the session key.
    ///
    /// Waits for in-flight encrypt/decrypt calls holding the key to finish.
    /// Returns `false` if the session was already closed.
    pub async fn logout(&self) -> bool {
        let cleared = self.key.write().await.take().is_some();
        if cleared {
            tracing::debug!(username = %self.username, "session closed");
        }
        cleared
    }

    /// Encrypt under the session key with a fresh IV.
    pub async fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedBlob> {
        let guard = self.key.read().await;
        let key = guard.as_ref().ok_or(VaultError::SessionClosed)?;
        Ok(cipher::encrypt(key, plaintext)?)
    }

    /// Decrypt something sealed under the session key.
    pub async fn decrypt(&self, ciphertext: &[u8], iv: &Iv) -> Result<Vec<u8>> {
        let guard = self.key.read().await;
        let key = guard.as_ref().ok_or(VaultError::SessionClosed)?;
        Ok(cipher::decrypt(key, ciphertext, iv)?)
    }

    /// Fail fast if the session is closed.
    pub(crate) async fn ensure_open(&self) -> Result<()> {
        if self.is_open().await {
            Ok(())
        } else {
            Err(VaultError::SessionClosed)
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
