//! # SealNote
//!
//! The unified API for SealNote: a single-user note vault whose note bodies
//! are encrypted client-side, plus self-contained share links.
//!
//! ## Overview
//!
//! - **Credentials**: one per installation. Only a verifier derived from the
//!   password is stored; the session key is derived alongside it and held in
//!   memory by a [`Session`].
//! - **Notes**: bodies sealed with AES-256-GCM under the session key, each
//!   write with a fresh IV.
//! - **Shares**: a note rendered as a URL carrying its own ciphertext and data
//!   key, optionally wrapped under a share password.
//! - **Exports**: every note sealed under an export password, independent of
//!   the session key.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sealnote::{NoteDraft, Vault, VaultConfig};
//! use sealnote::store::SqliteStore;
//!
//! async fn example() {
//!     let store = SqliteStore::open("sealnote.db").unwrap();
//!     let vault = Vault::new(store, VaultConfig::default());
//!
//!     let session = vault.register("ada", "correct horse").await.unwrap();
//!     let note = vault
//!         .create_note(&session, NoteDraft::new("Hello", "fn main() {}", "rust"))
//!         .await
//!         .unwrap();
//!
//!     let url = vault
//!         .share_note(&session, &note.id, Some("share-pw"), None)
//!         .await
//!         .unwrap();
//!     println!("{url}");
//!
//!     session.logout().await;
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `sealnote::crypto` - Key derivation, AEAD, verifier, key wrap
//! - `sealnote::share` - Share envelope and link codec
//! - `sealnote::store` - Blob store abstraction and SQLite

pub mod error;
pub mod export;
pub mod records;
pub mod session;
pub mod vault;

// Re-export component crates
pub use sealnote_crypto as crypto;
pub use sealnote_share as share;
pub use sealnote_store as store;

// Re-export main types for convenience
pub use error::{Result, VaultError, GENERIC_DECRYPT_MESSAGE};
pub use export::{ExportContents, ExportFile, EXPORT_VERSION};
pub use records::{CredentialRecord, EncryptedContent, Note, NoteDraft, NoteRecord, NoteSummary};
pub use session::Session;
pub use vault::{Vault, VaultConfig, DEFAULT_LANGUAGE};

pub use sealnote_share::{SharePayload, Snippet};
