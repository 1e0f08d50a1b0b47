//! Share link codec.
//!
//! A link is a flat set of named fragment parameters. Parsing checks that
//! every required parameter is present before anything is decoded, and tells
//! open links from password-protected ones by the shape of `k` alone.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use sealnote_crypto::{EncryptionKey, Iv, Salt, WrappedKey};

use crate::error::{Result, ShareError};

/// Link protocol version this build reads and writes.
pub const LINK_VERSION: u32 = 1;

const PARAM_VERSION: &str = "v";
const PARAM_DATA: &str = "d";
const PARAM_IV: &str = "i";
const PARAM_KEY: &str = "k";

const REQUIRED_PARAMS: [&str; 4] = [PARAM_VERSION, PARAM_DATA, PARAM_IV, PARAM_KEY];

/// How the data key travels in the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// The raw data key. Anyone with the link can read it.
    Open(EncryptionKey),
    /// The data key wrapped under the share password.
    Protected(WrappedKey),
}

/// A parsed share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Link protocol version.
    pub version: u32,

    /// Encrypted envelope (tag appended).
    pub data: Vec<u8>,

    /// IV for the envelope.
    pub iv: Iv,

    /// Data key, open or wrapped.
    pub key: KeyMaterial,
}

impl ShareLink {
    /// Whether opening this link needs a password.
    pub fn is_password_protected(&self) -> bool {
        matches!(self.key, KeyMaterial::Protected(_))
    }

    /// Render the fragment parameters (`v=..&d=..&i=..&k=..`).
    pub fn to_fragment(&self) -> String {
        let key = match &self.key {
            KeyMaterial::Open(key) => b64_encode(key.as_bytes()),
            KeyMaterial::Protected(wrapped) => format!(
                "{}:{}:{}",
                b64_encode(wrapped.salt.as_bytes()),
                b64_encode(wrapped.iv.as_bytes()),
                b64_encode(&wrapped.wrapped_key)
            ),
        };

        format!(
            "{PARAM_VERSION}={}&{PARAM_DATA}={}&{PARAM_IV}={}&{PARAM_KEY}={}",
            self.version,
            b64_encode(&self.data),
            b64_encode(self.iv.as_bytes()),
            key
        )
    }

    /// Render a full share URL under `origin`.
    pub fn to_url(&self, origin: &str) -> String {
        format!("{}/share#{}", origin.trim_end_matches('/'), self.to_fragment())
    }

    /// Parse a full URL or a bare fragment.
    pub fn parse(input: &str) -> Result<Self> {
        let fragment = match input.split_once('#') {
            Some((_, fragment)) => fragment,
            None => input,
        };

        let params = FragmentParams::parse(fragment);
        for name in REQUIRED_PARAMS {
            if params.get(name).is_none() {
                return Err(ShareError::IncompleteLink(name));
            }
        }

        let raw_version = params.require(PARAM_VERSION)?;
        let version: u32 = raw_version.parse().map_err(|_| {
            ShareError::InvalidInput(format!("malformed link version: {raw_version:?}"))
        })?;
        if version != LINK_VERSION {
            return Err(ShareError::VersionUnsupported(raw_version.to_string()));
        }

        let data = b64_decode(params.require(PARAM_DATA)?, PARAM_DATA)?;
        let iv = Iv::from_slice(&b64_decode(params.require(PARAM_IV)?, PARAM_IV)?)?;
        let key = parse_key_material(params.require(PARAM_KEY)?)?;

        Ok(Self {
            version,
            data,
            iv,
            key,
        })
    }
}

impl std::str::FromStr for ShareLink {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// `k` is one opaque token (open) or `salt:iv:wrapped` (protected).
fn parse_key_material(raw: &str) -> Result<KeyMaterial> {
    let parts: Vec<&str> = raw.split(':').collect();
    match parts.as_slice() {
        [key] => {
            let bytes = b64_decode(key, PARAM_KEY)?;
            Ok(KeyMaterial::Open(EncryptionKey::from_slice(&bytes)?))
        }
        [salt, iv, wrapped] => Ok(KeyMaterial::Protected(WrappedKey {
            salt: Salt::from_slice(&b64_decode(salt, "k.salt")?)?,
            iv: Iv::from_slice(&b64_decode(iv, "k.iv")?)?,
            wrapped_key: b64_decode(wrapped, "k.wrapped")?,
        })),
        _ => Err(ShareError::InvalidInput(format!(
            "key parameter has {} components, expected 1 or 3",
            parts.len()
        ))),
    }
}

/// Name/value pairs from a fragment; the first occurrence of a name wins.
struct FragmentParams<'a>(Vec<(&'a str, &'a str)>);

impl<'a> FragmentParams<'a> {
    fn parse(fragment: &'a str) -> Self {
        Self(
            fragment
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .collect(),
        )
    }

    /// A parameter's value, treating an empty value as absent.
    fn get(&self, name: &str) -> Option<&'a str> {
        self.0
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
            .filter(|v| !v.is_empty())
    }

    fn require(&self, name: &'static str) -> Result<&'a str> {
        self.get(name).ok_or(ShareError::IncompleteLink(name))
    }
}

fn b64_encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

fn b64_decode(s: &str, what: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(s)
        .map_err(|e| ShareError::InvalidInput(format!("{what}: base64 decode: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_link() -> ShareLink {
        ShareLink {
            version: LINK_VERSION,
            data: vec![1, 2, 3, 4, 5],
            iv: Iv::from_bytes([7; 12]),
            key: KeyMaterial::Open(EncryptionKey::from_bytes([9; 32])),
        }
    }

    fn protected_link() -> ShareLink {
        ShareLink {
            key: KeyMaterial::Protected(WrappedKey {
                salt: Salt::from_bytes([3; 16]),
                iv: Iv::from_bytes([4; 12]),
                wrapped_key: vec![5; 48],
            }),
            ..open_link()
        }
    }

    #[test]
    fn test_url_shape() {
        let url = open_link().to_url("https://notes.example/");
        assert!(url.starts_with("https://notes.example/share#v=1&d="));
        assert!(url.contains("&i="));
        assert!(url.contains("&k="));
    }

    #[test]
    fn test_open_link_roundtrip() {
        let link = open_link();
        let parsed = ShareLink::parse(&link.to_url("https://x")).unwrap();
        assert_eq!(parsed, link);
        assert!(!parsed.is_password_protected());
    }

    #[test]
    fn test_protected_link_roundtrip() {
        let link = protected_link();
        let fragment = link.to_fragment();
        let k = fragment.split("k=").nth(1).unwrap();
        assert_eq!(k.split(':').count(), 3);

        let parsed: ShareLink = fragment.parse().unwrap();
        assert_eq!(parsed, link);
        assert!(parsed.is_password_protected());
    }

    #[test]
    fn test_each_missing_param_is_incomplete() {
        let fragment = open_link().to_fragment();
        for name in REQUIRED_PARAMS {
            let stripped: Vec<&str> = fragment
                .split('&')
                .filter(|p| !p.starts_with(&format!("{name}=")))
                .collect();
            let err = ShareLink::parse(&stripped.join("&")).unwrap_err();
            assert_eq!(err, ShareError::IncompleteLink(name));
        }
    }

    #[test]
    fn test_empty_param_is_incomplete() {
        let err = ShareLink::parse("https://x/share#v=1&d=AAAA&i=&k=AAAA").unwrap_err();
        assert_eq!(err, ShareError::IncompleteLink("i"));
    }

    #[test]
    fn test_missing_fragment_is_incomplete() {
        assert_eq!(
            ShareLink::parse("https://x/share").unwrap_err(),
            ShareError::IncompleteLink("v")
        );
    }

    #[test]
    fn test_incomplete_wins_over_bad_values() {
        // `i` is missing; the garbage in `d` must not be reported first.
        let err = ShareLink::parse("#v=9&d=!!!&k=???").unwrap_err();
        assert_eq!(err, ShareError::IncompleteLink("i"));
    }

    #[test]
    fn test_unknown_link_version() {
        let fragment = open_link().to_fragment().replacen("v=1", "v=2", 1);
        assert_eq!(
            ShareLink::parse(&fragment).unwrap_err(),
            ShareError::VersionUnsupported("2".to_string())
        );

        let fragment = open_link().to_fragment().replacen("v=1", "v=abc", 1);
        assert!(matches!(
            ShareLink::parse(&fragment),
            Err(ShareError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_two_component_key_rejected() {
        let fragment = format!("v=1&d=AQID&i={}&k=AAAA:BBBB", b64_encode(&[0; 12]));
        assert!(matches!(
            ShareLink::parse(&fragment),
            Err(ShareError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bad_encoding_rejected() {
        let fragment = format!("v=1&d=AQID&i={}&k=not*base64", b64_encode(&[0; 12]));
        assert!(matches!(
            ShareLink::parse(&fragment),
            Err(ShareError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_wrong_iv_length_rejected() {
        let fragment = format!(
            "v=1&d=AQID&i={}&k={}",
            b64_encode(&[0; 16]),
            b64_encode(&[0; 32])
        );
        assert!(matches!(
            ShareLink::parse(&fragment),
            Err(ShareError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_extra_params_ignored() {
        let fragment = format!("{}&utm=1", open_link().to_fragment());
        assert_eq!(ShareLink::parse(&fragment).unwrap(), open_link());
    }
}
