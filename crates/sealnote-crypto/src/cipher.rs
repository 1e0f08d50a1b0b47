//! AES-256-GCM authenticated encryption.
//!
//! Every call to [`encrypt`] draws a fresh 96-bit IV from the OS RNG. There is
//! no API for supplying an IV, so IV reuse under one key cannot be expressed.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};

use crate::error::{CryptoError, Result};
use crate::types::{EncryptedBlob, EncryptionKey, Iv, TAG_SIZE};

/// Encrypt `plaintext` under `key` with a fresh random IV.
pub fn encrypt(key: &EncryptionKey, plaintext: &[u8]) -> Result<EncryptedBlob> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let iv = Iv::generate();

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(iv.as_bytes()), plaintext)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    Ok(EncryptedBlob { ciphertext, iv })
}

/// Decrypt `ciphertext` (tag appended) produced under `key` and `iv`.
///
/// Fails closed with [`CryptoError::DecryptionFailed`] on any tag mismatch,
/// including truncated input. Never returns partial or empty plaintext.
pub fn decrypt(key: &EncryptionKey, ciphertext: &[u8], iv: &Iv) -> Result<Vec<u8>> {
    if ciphertext.len() < TAG_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    cipher
        .decrypt(Nonce::from_slice(iv.as_bytes()), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}

impl EncryptionKey {
    /// Encrypt data with this key.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedBlob> {
        encrypt(self, plaintext)
    }

    /// Decrypt data with this key.
    pub fn decrypt(&self, ciphertext: &[u8], iv: &Iv) -> Result<Vec<u8>> {
        decrypt(self, ciphertext, iv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let key = EncryptionKey::generate();
        let plaintext = b"hello, world!";

        let blob = encrypt(&key, plaintext).unwrap();
        assert_ne!(blob.ciphertext, plaintext);
        assert_eq!(blob.ciphertext_len(), plaintext.len() + TAG_SIZE);

        let decrypted = decrypt(&key, &blob.ciphertext, &blob.iv).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let key = EncryptionKey::generate();
        let blob = key.encrypt(b"").unwrap();
        assert_eq!(blob.ciphertext.len(), TAG_SIZE);
        assert_eq!(blob.open(&key).unwrap(), b"");
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let key = EncryptionKey::generate();
        let a = encrypt(&key, b"same").unwrap();
        let b = encrypt(&key, b"same").unwrap();

        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_decrypt_wrong_key_fails() {
        let key1 = EncryptionKey::generate();
        let key2 = EncryptionKey::generate();

        let blob = encrypt(&key1, b"secret").unwrap();
        assert_eq!(
            decrypt(&key2, &blob.ciphertext, &blob.iv),
            Err(CryptoError::DecryptionFailed)
        );
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = EncryptionKey::generate();
        let mut blob = encrypt(&key, b"secret").unwrap();
        blob.ciphertext[0] ^= 0x01;

        assert_eq!(blob.open(&key), Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn test_tampered_iv_fails() {
        let key = EncryptionKey::generate();
        let mut blob = encrypt(&key, b"secret").unwrap();
        blob.iv.0[11] ^= 0x80;

        assert_eq!(blob.open(&key), Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let key = EncryptionKey::generate();
        let blob = encrypt(&key, b"secret").unwrap();

        assert_eq!(
            decrypt(&key, &blob.ciphertext[..TAG_SIZE - 1], &blob.iv),
            Err(CryptoError::DecryptionFailed)
        );
        assert_eq!(
            decrypt(&key, &[], &blob.iv),
            Err(CryptoError::DecryptionFailed)
        );
    }

    #[test]
    fn test_failure_message_is_generic() {
        let key = EncryptionKey::generate();
        let mut blob = encrypt(&key, b"secret").unwrap();
        blob.ciphertext[2] ^= 0xff;

        let wrong_key = blob.open(&EncryptionKey::generate()).unwrap_err();
        let tampered = blob.open(&key).unwrap_err();
        assert_eq!(wrong_key.to_string(), tampered.to_string());
    }
}
