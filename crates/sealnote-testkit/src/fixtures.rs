//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::path::Path;

use sealnote::store::{MemoryStore, SqliteStore};
use sealnote::{Note, NoteDraft, Session, Vault, VaultConfig};
use sealnote_crypto::MIN_ITERATIONS;

/// Username registered by [`TestFixture::registered`].
pub const TEST_USERNAME: &str = "ada";

/// Password registered by [`TestFixture::registered`].
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Vault config using the lowest accepted KDF cost.
pub fn fast_config() -> VaultConfig {
    VaultConfig {
        kdf_iterations: MIN_ITERATIONS,
        share_origin: crate::vectors::GOLDEN_ORIGIN.to_string(),
        ..VaultConfig::default()
    }
}

/// A test fixture with a vault over a memory store.
pub struct TestFixture {
    pub vault: Vault<MemoryStore>,
}

impl TestFixture {
    /// An unregistered vault.
    pub fn new() -> Self {
        Self {
            vault: Vault::new(MemoryStore::new(), fast_config()),
        }
    }

    /// A vault with [`TEST_USERNAME`] registered, and its session.
    pub async fn registered() -> (Self, Session) {
        let fixture = Self::new();
        let session = fixture
            .vault
            .register(TEST_USERNAME, TEST_PASSWORD)
            .await
            .expect("register test user");
        (fixture, session)
    }

    /// Log in again as the test user.
    pub async fn login(&self) -> Session {
        self.vault
            .login(TEST_USERNAME, TEST_PASSWORD)
            .await
            .expect("log in test user")
    }

    /// Store a plaintext note.
    pub async fn note(&self, session: &Session, title: &str, content: &str) -> Note {
        self.vault
            .create_note(session, NoteDraft::new(title, content, "plaintext"))
            .await
            .expect("create note")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A vault over a SQLite file at `path`.
pub fn sqlite_vault(path: impl AsRef<Path>) -> Vault<SqliteStore> {
    let store = SqliteStore::open(path).expect("open sqlite store");
    Vault::new(store, fast_config())
}
