//! The Vault: unified API for SealNote.
//!
//! The Vault brings together credentials, encrypted notes, share links, and
//! exports over any [`BlobStore`]. Everything that needs the session key
//! takes a [`Session`] by reference.

use std::sync::Arc;
use std::time::Duration;

use zeroize::Zeroizing;

use sealnote_crypto::{
    derive_credential, CredentialKeys, PasswordHash, Salt, DEFAULT_ITERATIONS,
};
use sealnote_share::{
    create_share, now_millis, open_share, ShareLink, SharePayload, Snippet, DEFAULT_SHARE_TTL,
};
use sealnote_store::{BlobStore, StoreExt};

use crate::error::{Result, VaultError};
use crate::export::{ExportContents, ExportFile};
use crate::records::{
    note_key, CredentialRecord, Note, NoteDraft, NoteRecord, NoteSummary, CREDENTIAL_KEY,
    NOTE_PREFIX,
};
use crate::session::Session;

/// Language recorded for notes imported without one.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Configuration for the Vault.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// PBKDF2 iterations for the login credential.
    ///
    /// The credential record does not carry this value, so it must stay the
    /// same for the lifetime of an installation.
    pub kdf_iterations: u32,
    /// Expiry applied to shares when the caller gives none.
    pub default_share_ttl: Duration,
    /// Origin that share URLs are rendered under.
    pub share_origin: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: DEFAULT_ITERATIONS,
            default_share_ttl: DEFAULT_SHARE_TTL,
            share_origin: "http://localhost:3000".to_string(),
        }
    }
}

/// The main Vault struct.
///
/// Provides a unified API for:
/// - Registering and logging in the single local user
/// - Creating, reading, updating, and deleting encrypted notes
/// - Sharing notes as self-contained links and importing shares
/// - Password-sealed export and import
pub struct Vault<S: BlobStore> {
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: VaultConfig,
}

impl<S: BlobStore> Vault<S> {
    /// Create a new vault over `store`.
    pub fn new(store: S, config: VaultConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Credential Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether a credential exists.
    pub async fn is_registered(&self) -> Result<bool> {
        Ok(self.store.get(CREDENTIAL_KEY).await?.is_some())
    }

    /// Create the installation's only credential and open a session.
    pub async fn register(&self, username: &str, password: &str) -> Result<Session> {
        require_non_empty(username, "username")?;
        require_non_empty(password, "password")?;

        if self.is_registered().await? {
            return Err(VaultError::AlreadyRegistered);
        }

        let salt = Salt::random();
        let keys = self.derive_keys(password, salt).await?;

        let record = CredentialRecord {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: keys.verification.as_bytes().to_vec(),
            salt: salt.as_bytes().to_vec(),
        };
        // A concurrent register may have won while the KDF ran.
        if !self
            .store
            .insert_json_if_absent(CREDENTIAL_KEY, &record)
            .await?
        {
            return Err(VaultError::AlreadyRegistered);
        }

        tracing::debug!(username, "registered");
        Ok(Session::new(username.to_string(), keys.session_key))
    }

    /// Check credentials and open a session.
    ///
    /// A wrong username and a wrong password fail identically, and both pay
    /// for the full derivation.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        require_non_empty(username, "username")?;
        require_non_empty(password, "password")?;

        let record: CredentialRecord = self
            .store
            .get_json(CREDENTIAL_KEY)
            .await?
            .ok_or(VaultError::NotRegistered)?;

        let salt = Salt::from_slice(&record.salt)?;
        let stored = PasswordHash::from_slice(&record.password_hash)?;
        let keys = self.derive_keys(password, salt).await?;

        let password_ok = keys.matches(&stored);
        if !(password_ok && record.username == username) {
            tracing::debug!("login rejected");
            return Err(VaultError::InvalidCredentials);
        }

        tracing::debug!(username, "logged in");
        Ok(Session::new(record.username, keys.session_key))
    }

    /// Run the credential KDF off the async executor.
    async fn derive_keys(&self, password: &str, salt: Salt) -> Result<CredentialKeys> {
        let password = Zeroizing::new(password.to_string());
        let iterations = self.config.kdf_iterations;

        let keys = tokio::task::spawn_blocking(move || {
            derive_credential(&password, &salt, iterations)
        })
        .await
        .map_err(|e| VaultError::Background(e.to_string()))??;
        Ok(keys)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Note Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Encrypt and store a new note.
    pub async fn create_note(&self, session: &Session, draft: NoteDraft) -> Result<Note> {
        let now = now_millis();
        let note = Note {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            language: draft.language,
            created_at: now,
            updated_at: now,
        };
        self.save_note(session, &note).await?;
        Ok(note)
    }

    /// Replace a note's title, body, and language.
    ///
    /// The body is re-encrypted under a fresh IV.
    pub async fn update_note(&self, session: &Session, id: &str, draft: NoteDraft) -> Result<Note> {
        let existing = self.get_record(id).await?;
        let note = Note {
            id: existing.id,
            title: draft.title,
            content: draft.content,
            language: draft.language,
            created_at: existing.created_at,
            updated_at: now_millis().max(existing.updated_at),
        };
        self.save_note(session, &note).await?;
        Ok(note)
    }

    /// Fetch and decrypt a note.
    pub async fn load_note(&self, session: &Session, id: &str) -> Result<Note> {
        let record = self.get_record(id).await?;
        let blob = record.encrypted_content.to_blob()?;
        let plaintext = session.decrypt(&blob.ciphertext, &blob.iv).await?;
        let content = String::from_utf8(plaintext)
            .map_err(|_| VaultError::InvalidInput("note body is not UTF-8".to_string()))?;

        Ok(Note {
            id: record.id,
            title: record.title,
            content,
            language: record.language,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// All notes, most recently updated first. Bodies stay encrypted.
    pub async fn list_notes(&self, session: &Session) -> Result<Vec<NoteSummary>> {
        session.ensure_open().await?;

        let mut summaries = Vec::new();
        for key in self.store.list_keys(NOTE_PREFIX).await? {
            if let Some(record) = self.store.get_json::<NoteRecord>(&key).await? {
                summaries.push(record.summary());
            }
        }
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }

    /// Delete a note.
    pub async fn delete_note(&self, session: &Session, id: &str) -> Result<()> {
        session.ensure_open().await?;

        if !self.store.delete(&note_key(id)).await? {
            return Err(VaultError::NoteNotFound(id.to_string()));
        }
        tracing::debug!(note_id = id, "deleted note");
        Ok(())
    }

    async fn get_record(&self, id: &str) -> Result<NoteRecord> {
        self.store
            .get_json(&note_key(id))
            .await?
            .ok_or_else(|| VaultError::NoteNotFound(id.to_string()))
    }

    async fn save_note(&self, session: &Session, note: &Note) -> Result<()> {
        let record = seal_note(session, note).await?;
        self.write_record(&record).await
    }

    async fn write_record(&self, record: &NoteRecord) -> Result<()> {
        self.store.set_json(&note_key(&record.id), record).await?;
        tracing::debug!(note_id = %record.id, "saved note");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Share Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Render a stored note as a share URL.
    ///
    /// The link carries its own data key, so the session key never leaves
    /// the vault. `ttl` falls back to the configured default.
    pub async fn share_note(
        &self,
        session: &Session,
        id: &str,
        password: Option<&str>,
        ttl: Option<Duration>,
    ) -> Result<String> {
        let note = self.load_note(session, id).await?;
        let payload = SharePayload {
            title: note.title,
            content: note.content.clone(),
            snippets: vec![Snippet {
                id: note.id,
                code: note.content,
                language: note.language,
            }],
        };

        let ttl = ttl.unwrap_or(self.config.default_share_ttl);
        let password = password.map(|p| Zeroizing::new(p.to_string()));
        let link = tokio::task::spawn_blocking(move || {
            create_share(&payload, password.as_deref().map(String::as_str), ttl, now_millis())
        })
        .await
        .map_err(|e| VaultError::Background(e.to_string()))??;

        tracing::debug!(
            note_id = id,
            protected = link.is_password_protected(),
            "created share link"
        );
        Ok(link.to_url(&self.config.share_origin))
    }

    /// Open a share URL and store its content as a new note.
    pub async fn import_share(
        &self,
        session: &Session,
        url: &str,
        password: Option<&str>,
    ) -> Result<Note> {
        session.ensure_open().await?;

        let link = ShareLink::parse(url)?;
        let password = password.map(|p| Zeroizing::new(p.to_string()));
        let payload = tokio::task::spawn_blocking(move || {
            open_share(&link, password.as_deref().map(String::as_str), now_millis())
        })
        .await
        .map_err(|e| VaultError::Background(e.to_string()))??;

        let language = payload
            .snippets
            .first()
            .map(|s| s.language.clone())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        self.create_note(session, NoteDraft::new(payload.title, payload.content, language))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Decrypt every note and seal them under `export_password`.
    pub async fn export_notes(&self, session: &Session, export_password: &str) -> Result<ExportFile> {
        require_non_empty(export_password, "export password")?;

        let mut notes = Vec::new();
        for summary in self.list_notes(session).await? {
            notes.push(self.load_note(session, &summary.id).await?);
        }
        let count = notes.len();
        let contents = ExportContents {
            exported_at: now_millis(),
            notes,
        };

        let password = Zeroizing::new(export_password.to_string());
        let file = tokio::task::spawn_blocking(move || ExportFile::seal(&contents, &password))
            .await
            .map_err(|e| VaultError::Background(e.to_string()))??;

        tracing::debug!(count, "exported notes");
        Ok(file)
    }

    /// Decrypt an export and store its notes under the session key.
    ///
    /// Notes keep their ids and timestamps; an existing note with the same id
    /// is overwritten. Returns the number of notes imported.
    ///
    /// Every note is encrypted before any is written, so a wrong password or
    /// a closed session writes nothing. A store error partway through the
    /// writes can still leave the notes before it in place.
    pub async fn import_export(
        &self,
        session: &Session,
        file: &ExportFile,
        export_password: &str,
    ) -> Result<usize> {
        session.ensure_open().await?;
        require_non_empty(export_password, "export password")?;

        let file = file.clone();
        let password = Zeroizing::new(export_password.to_string());
        let contents = tokio::task::spawn_blocking(move || file.open(&password))
            .await
            .map_err(|e| VaultError::Background(e.to_string()))??;

        // Seal everything before the first write so a closed session
        // leaves the vault untouched.
        let mut records = Vec::with_capacity(contents.notes.len());
        for note in &contents.notes {
            records.push(seal_note(session, note).await?);
        }
        for record in &records {
            self.write_record(record).await?;
        }

        tracing::debug!(count = records.len(), "imported export");
        Ok(records.len())
    }
}

/// Encrypt a note's body under the session key.
async fn seal_note(session: &Session, note: &Note) -> Result<NoteRecord> {
    let blob = session.encrypt(note.content.as_bytes()).await?;
    Ok(NoteRecord {
        id: note.id.clone(),
        title: note.title.clone(),
        encrypted_content: blob.into(),
        language: note.language.clone(),
        created_at: note.created_at,
        updated_at: note.updated_at,
    })
}

fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(VaultError::InvalidInput(format!("{what} cannot be empty")));
    }
    Ok(())
}
