//! Password-sealed note exports.
//!
//! An export is self-contained: its key comes from the export password and
//! the salt stored in the file, never from the session key, so it can be
//! imported into any vault.

use serde::{Deserialize, Serialize};

use sealnote_crypto::{cipher, derive_key, Iv, Salt, DEFAULT_ITERATIONS};
use sealnote_share::SchemeVersion;

use crate::error::{Result, VaultError};
use crate::records::{b64, Note};

/// Export format version this build writes.
pub const EXPORT_VERSION: SchemeVersion = SchemeVersion { major: 1, minor: 0 };

/// The exported file, as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    #[serde(with = "b64")]
    pub encrypted_data: Vec<u8>,
    #[serde(with = "b64")]
    pub iv: Vec<u8>,
    #[serde(with = "b64")]
    pub salt: Vec<u8>,
    pub version: String,
}

/// What an export decrypts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportContents {
    pub exported_at: i64,
    pub notes: Vec<Note>,
}

impl ExportFile {
    /// Encrypt `contents` under a key derived from `password` and a fresh salt.
    ///
    /// Runs the full KDF; call from a blocking context.
    pub fn seal(contents: &ExportContents, password: &str) -> Result<Self> {
        let salt = Salt::random();
        let key = derive_key(password, salt.as_bytes(), DEFAULT_ITERATIONS)?;
        let plaintext =
            serde_json::to_vec(contents).map_err(|e| VaultError::Serialization(e.to_string()))?;
        let blob = cipher::encrypt(&key, &plaintext)?;

        Ok(Self {
            encrypted_data: blob.ciphertext,
            iv: blob.iv.as_bytes().to_vec(),
            salt: salt.as_bytes().to_vec(),
            version: EXPORT_VERSION.to_string(),
        })
    }

    /// Check the version, then decrypt with `password`.
    ///
    /// Runs the full KDF; call from a blocking context.
    pub fn open(&self, password: &str) -> Result<ExportContents> {
        self.version
            .parse::<SchemeVersion>()?
            .check_compatible(EXPORT_VERSION, "export")?;

        let iv = Iv::from_slice(&self.iv)?;
        let key = derive_key(password, &self.salt, DEFAULT_ITERATIONS)?;
        let plaintext = cipher::decrypt(&key, &self.encrypted_data, &iv)?;

        serde_json::from_slice(&plaintext)
            .map_err(|_| VaultError::InvalidInput("unrecognized export content".to_string()))
    }

    /// Serialize to the on-disk JSON form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| VaultError::Serialization(e.to_string()))
    }

    /// Parse the on-disk JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| VaultError::InvalidInput(e.to_string()))
    }
}
