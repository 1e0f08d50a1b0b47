//! Creating and opening shares.

use std::time::Duration;

use sealnote_crypto::{cipher, keywrap, EncryptionKey};

use crate::envelope::{DecodedShare, ShareEnvelope};
use crate::error::{Result, ShareError};
use crate::link::{KeyMaterial, ShareLink, LINK_VERSION};
use crate::payload::SharePayload;

/// How long a share stays readable unless told otherwise.
pub const DEFAULT_SHARE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Encrypt `payload` into a self-contained link.
///
/// A fresh data key encrypts the envelope. With a password the data key is
/// wrapped under it; without one the raw data key goes into the link. An
/// empty password is treated as no password.
pub fn create_share(
    payload: &SharePayload,
    password: Option<&str>,
    ttl: Duration,
    now: i64,
) -> Result<ShareLink> {
    let envelope = ShareEnvelope::new(payload.clone(), now, ttl);
    let data_key = EncryptionKey::generate();
    let blob = cipher::encrypt(&data_key, &envelope.to_bytes()?)?;

    let key = match password.filter(|p| !p.is_empty()) {
        Some(password) => KeyMaterial::Protected(keywrap::wrap_key(&data_key, password)?),
        None => KeyMaterial::Open(data_key),
    };

    Ok(ShareLink {
        version: LINK_VERSION,
        data: blob.ciphertext,
        iv: blob.iv,
        key,
    })
}

/// Decrypt a parsed link and validate its envelope.
///
/// A password given for an open link is ignored.
pub fn open_share(link: &ShareLink, password: Option<&str>, now: i64) -> Result<SharePayload> {
    let unwrapped;
    let data_key = match &link.key {
        KeyMaterial::Open(key) => key,
        KeyMaterial::Protected(wrapped) => {
            let password = password
                .filter(|p| !p.is_empty())
                .ok_or(ShareError::PasswordRequired)?;
            unwrapped = keywrap::unwrap_key(wrapped, password)?;
            &unwrapped
        }
    };

    let plaintext = cipher::decrypt(data_key, &link.data, &link.iv)?;
    DecodedShare::from_bytes(&plaintext)?.into_payload(now)
}

/// Parse `url` and open it.
pub fn open_share_url(url: &str, password: Option<&str>, now: i64) -> Result<SharePayload> {
    let link = ShareLink::parse(url)?;
    open_share(&link, password, now)
}
