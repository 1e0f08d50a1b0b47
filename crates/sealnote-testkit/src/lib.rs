//! # SealNote Testkit
//!
//! Testing utilities for SealNote.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: KDF, AEAD, share link, and export known answers
//!   produced by an independent implementation
//! - **Generators**: Proptest strategies for payloads, drafts, and passwords
//! - **Fixtures**: A ready vault over an in-memory store
//!
//! ## Golden Vectors
//!
//! ```rust
//! use sealnote_testkit::vectors::verify_all_vectors;
//!
//! for (name, matched) in verify_all_vectors() {
//!     assert!(matched, "{name}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use sealnote_testkit::generators::share_payload;
//!
//! proptest! {
//!     #[test]
//!     fn payload_json_roundtrips(payload in share_payload()) {
//!         let json = serde_json::to_string(&payload).unwrap();
//!         prop_assert_eq!(serde_json::from_str::<SharePayload>(&json).unwrap(), payload);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use sealnote_testkit::fixtures::TestFixture;
//!
//! let (fixture, session) = TestFixture::registered().await;
//! let note = fixture.note(&session, "title", "body").await;
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{fast_config, sqlite_vault, TestFixture, TEST_PASSWORD, TEST_USERNAME};
pub use generators::{note_draft, password, share_payload, snippet};
pub use vectors::{kdf_vectors, share_vectors, verify_all_vectors, KdfVector, ShareVector};
