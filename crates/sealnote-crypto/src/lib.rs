//! # SealNote Crypto
//!
//! Pure client-side primitives for SealNote: password-based key derivation,
//! authenticated encryption, password verification, and key wrapping.
//!
//! This crate contains no I/O, no storage, no networking. Every operation is
//! a bounded computation over byte buffers.
//!
//! ## Key Types
//!
//! - [`EncryptionKey`] - A 256-bit AES-GCM key, zeroized on drop
//! - [`Salt`] - 16 random bytes mixed into the KDF
//! - [`Iv`] - A 96-bit AES-GCM nonce, fresh per encryption
//! - [`EncryptedBlob`] - Ciphertext (tag appended) plus the IV that produced it
//! - [`WrappedKey`] - A data key encrypted under a password-derived key
//! - [`PasswordHash`] - The stored login verifier
//!
//! ## Key Hierarchy
//!
//! ```text
//! password + salt --PBKDF2-HMAC-SHA256--> master
//!     master --BLAKE3 derive_key(verifier ctx)--> PasswordHash (stored)
//!     master --BLAKE3 derive_key(session ctx)---> session EncryptionKey (memory only)
//! ```
//!
//! Shares use a random data key instead, optionally wrapped under a key
//! derived from the share password with its own fresh salt.

pub mod cipher;
pub mod error;
pub mod kdf;
pub mod keywrap;
pub mod types;
pub mod verifier;

pub use cipher::{decrypt, encrypt};
pub use error::{CryptoError, Result};
pub use kdf::{derive_key, KdfParams, DEFAULT_ITERATIONS, MIN_ITERATIONS};
pub use keywrap::{unwrap_key, wrap_key, WrappedKey};
pub use types::{EncryptedBlob, EncryptionKey, Iv, Salt, IV_SIZE, KEY_SIZE, SALT_SIZE, TAG_SIZE};
pub use verifier::{derive_credential, hash_password, verify_password, CredentialKeys, PasswordHash};
