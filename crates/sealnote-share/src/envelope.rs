//! Share envelope: version and expiry metadata around a payload.
//!
//! The envelope is serialized to JSON and encrypted as a whole, so its
//! timestamps are authenticated along with the content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, ShareError};
use crate::payload::SharePayload;

/// Envelope scheme this build writes.
pub const CURRENT_VERSION: SchemeVersion = SchemeVersion { major: 1, minor: 0 };

/// A `major.minor` envelope scheme version.
///
/// Readers accept any minor revision of their major version (with a
/// warning) and reject every other major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemeVersion {
    pub major: u16,
    pub minor: u16,
}

impl fmt::Display for SchemeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for SchemeVersion {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ShareError::InvalidInput(format!("malformed version: {s:?}"));

        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl SchemeVersion {
    /// Apply the compatibility policy against the version this build writes.
    ///
    /// A different major is refused. A different minor is read with a
    /// warning naming `what`.
    pub fn check_compatible(&self, current: SchemeVersion, what: &str) -> Result<()> {
        if self.major != current.major {
            return Err(ShareError::VersionUnsupported(self.to_string()));
        }
        if self.minor != current.minor {
            tracing::warn!("{what} version {self} differs from {current}; reading anyway");
        }
        Ok(())
    }
}

/// The wrapper encrypted into every share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareEnvelope {
    /// Scheme version as `major.minor`.
    pub version: String,

    /// Creation time (Unix milliseconds).
    pub created_at: i64,

    /// Expiry time (Unix milliseconds).
    pub expires_at: i64,

    /// The shared content.
    pub payload: SharePayload,
}

impl ShareEnvelope {
    /// Wrap `payload`, expiring `ttl` after `created_at`.
    pub fn new(payload: SharePayload, created_at: i64, ttl: Duration) -> Self {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        Self {
            version: CURRENT_VERSION.to_string(),
            created_at,
            expires_at: created_at.saturating_add(ttl_ms),
            payload,
        }
    }

    /// Serialize to JSON bytes for encryption.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ShareError::Serialization(e.to_string()))
    }

    /// Whether the envelope has expired at `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }

    /// Check version compatibility, then expiry.
    pub fn validate(&self, now: i64) -> Result<()> {
        self.version
            .parse::<SchemeVersion>()?
            .check_compatible(CURRENT_VERSION, "share envelope")?;

        if self.is_expired(now) {
            return Err(ShareError::LinkExpired {
                expired_at: self.expires_at,
            });
        }
        Ok(())
    }

    /// Validate and return the payload.
    pub fn open(self, now: i64) -> Result<SharePayload> {
        self.validate(now)?;
        Ok(self.payload)
    }
}

/// Decrypted share content, resolved once into a known shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DecodedShare {
    /// A versioned envelope.
    Current(ShareEnvelope),
    /// A bare payload written before envelopes existed. Never expires.
    LegacyPlain(SharePayload),
}

impl DecodedShare {
    /// Parse decrypted JSON.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|_| ShareError::InvalidInput("unrecognized share content".to_string()))
    }

    /// Apply version and expiry checks and yield the payload.
    pub fn into_payload(self, now: i64) -> Result<SharePayload> {
        match self {
            DecodedShare::Current(envelope) => envelope.open(now),
            DecodedShare::LegacyPlain(payload) => {
                tracing::warn!("opening legacy share without envelope; no expiry enforced");
                Ok(payload)
            }
        }
    }
}

/// Current time in Unix milliseconds.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
