//! # SealNote Store
//!
//! Persistence collaborator for SealNote. The crypto layer only ever hands
//! this crate opaque byte blobs keyed by string, so the store never sees
//! plaintext or key material.
//!
//! ## Key Types
//!
//! - [`BlobStore`] - The async get/set-by-key trait
//! - [`StoreExt`] - JSON helpers on top of any `BlobStore`
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sealnote_store::{BlobStore, SqliteStore};
//!
//! async fn example() {
//!     let store = SqliteStore::open("sealnote.db").unwrap();
//!     store.set("note:1", b"ciphertext".to_vec()).await.unwrap();
//!     let blob = store.get("note:1").await.unwrap();
//!     assert!(blob.is_some());
//! }
//! ```

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{BlobStore, StoreExt};
