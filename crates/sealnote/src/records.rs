//! Records handed to the blob store, and the decrypted note view.
//!
//! Binary fields are stored as standard base64 strings so records stay
//! readable JSON.

use serde::{Deserialize, Serialize};

use sealnote_crypto::{EncryptedBlob, Iv};

use crate::error::Result;

/// Store key for the single credential.
pub const CREDENTIAL_KEY: &str = "credential";

/// Store key prefix for notes.
pub const NOTE_PREFIX: &str = "note:";

/// Store key for the note with `id`.
pub fn note_key(id: &str) -> String {
    format!("{NOTE_PREFIX}{id}")
}

/// The persisted login verifier. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: String,
    pub username: String,
    #[serde(with = "b64")]
    pub password_hash: Vec<u8>,
    #[serde(with = "b64")]
    pub salt: Vec<u8>,
}

/// Ciphertext and IV of a note body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedContent {
    #[serde(with = "b64")]
    pub data: Vec<u8>,
    #[serde(with = "b64")]
    pub iv: Vec<u8>,
}

impl From<EncryptedBlob> for EncryptedContent {
    fn from(blob: EncryptedBlob) -> Self {
        Self {
            data: blob.ciphertext,
            iv: blob.iv.as_bytes().to_vec(),
        }
    }
}

impl EncryptedContent {
    /// Parse back into a blob, validating the IV length.
    pub fn to_blob(&self) -> Result<EncryptedBlob> {
        Ok(EncryptedBlob {
            ciphertext: self.data.clone(),
            iv: Iv::from_slice(&self.iv)?,
        })
    }
}

/// A persisted note. Only the body is encrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: String,
    pub title: String,
    pub encrypted_content: EncryptedContent,
    pub language: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl NoteRecord {
    /// Listing view without the body.
    pub fn summary(&self) -> NoteSummary {
        NoteSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            language: self.language.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields a caller supplies when writing a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub language: String,
}

impl NoteDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            language: language.into(),
        }
    }
}

/// A decrypted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub language: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A note without its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: String,
    pub title: String,
    pub language: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Serde adapter for standard base64 byte fields.
pub(crate) mod b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_record_wire_shape() {
        let record = NoteRecord {
            id: "n1".to_string(),
            title: "Title".to_string(),
            encrypted_content: EncryptedContent {
                data: vec![0xde, 0xad, 0xbe, 0xef],
                iv: vec![0; 12],
            },
            language: "rust".to_string(),
            created_at: 1,
            updated_at: 2,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["encryptedContent"]["data"], "3q2+7w==");
        assert_eq!(value["encryptedContent"]["iv"], "AAAAAAAAAAAAAAAA");
        assert_eq!(value["createdAt"], 1);
        assert_eq!(value["updatedAt"], 2);

        let back: NoteRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_credential_record_wire_shape() {
        let json = r#"{"id":"c","username":"ada","passwordHash":"AQI=","salt":"AwQ="}"#;
        let record: CredentialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.password_hash, vec![1, 2]);
        assert_eq!(record.salt, vec![3, 4]);
    }

    #[test]
    fn test_bad_base64_rejected() {
        let json = r#"{"id":"c","username":"ada","passwordHash":"***","salt":"AwQ="}"#;
        assert!(serde_json::from_str::<CredentialRecord>(json).is_err());
    }

    #[test]
    fn test_short_iv_is_invalid_input() {
        let content = EncryptedContent {
            data: vec![1],
            iv: vec![0; 4],
        };
        assert!(matches!(
            content.to_blob(),
            Err(crate::VaultError::InvalidInput(_))
        ));
    }
}
