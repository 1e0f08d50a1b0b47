//! # SealNote Share
//!
//! Self-contained share links: the encrypted content, its IV and the key
//! material all travel in the URL fragment, so nothing is ever uploaded.
//!
//! ## Overview
//!
//! - **SharePayload**: what the user shares (title, content, code snippets)
//! - **ShareEnvelope**: versioned, timestamped wrapper placed inside the ciphertext
//! - **ShareLink**: the parsed `v` / `d` / `i` / `k` fragment parameters
//!
//! ## Link Format
//!
//! ```text
//! <origin>/share#v=1&d=<ciphertext>&i=<iv>&k=<key>
//! <origin>/share#v=1&d=<ciphertext>&i=<iv>&k=<salt>:<iv>:<wrapped key>
//! ```
//!
//! Each component is base64url without padding. A single token in `k` is the
//! raw data key (open share); three colon-separated tokens are a data key
//! wrapped under the share password.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use sealnote_share::{create_share, open_share_url, now_millis, SharePayload};
//!
//! let payload = SharePayload::new("t", "c");
//! let link = create_share(&payload, Some("secret123"), Duration::from_secs(3600), now_millis()).unwrap();
//! let url = link.to_url("https://notes.example");
//!
//! let opened = open_share_url(&url, Some("secret123"), now_millis()).unwrap();
//! assert_eq!(opened, payload);
//! ```

pub mod envelope;
pub mod error;
pub mod link;
pub mod payload;
pub mod share;

pub use envelope::{now_millis, DecodedShare, SchemeVersion, ShareEnvelope, CURRENT_VERSION};
pub use error::{Result, ShareError};
pub use link::{KeyMaterial, ShareLink, LINK_VERSION};
pub use payload::{SharePayload, Snippet};
pub use share::{create_share, open_share, open_share_url, DEFAULT_SHARE_TTL};
