//! Golden test vectors for cross-implementation verification.
//!
//! Every value here was produced by an independent PBKDF2-HMAC-SHA256 and
//! AES-256-GCM implementation. Share links use data key `0x11 * 32` and
//! envelope IV `0x22 * 12` throughout.

use sealnote_crypto::{decrypt, derive_key, EncryptionKey, Iv};
use sealnote_share::{open_share_url, ShareError, SharePayload, Snippet};

/// Origin every golden share URL is rendered under.
pub const GOLDEN_ORIGIN: &str = "https://sealnote.example";

/// Password protecting [`PROTECTED_LINK`].
pub const SHARE_PASSWORD: &str = "secret123";

/// Password sealing [`EXPORT_JSON`].
pub const EXPORT_PASSWORD: &str = "export-pw";

/// A point in time before every golden envelope expires (2023-11-14).
pub const GOLDEN_NOW: i64 = 1_700_000_000_000;

/// A PBKDF2-HMAC-SHA256 known answer.
#[derive(Debug, Clone)]
pub struct KdfVector {
    pub name: &'static str,
    pub password: &'static str,
    pub salt: [u8; 16],
    pub iterations: u32,
    /// Expected 32-byte key (hex).
    pub expected_key: &'static str,
}

/// All KDF vectors.
pub fn kdf_vectors() -> Vec<KdfVector> {
    let mut counting = [0u8; 16];
    for (i, b) in counting.iter_mut().enumerate() {
        *b = i as u8;
    }

    vec![
        KdfVector {
            name: "default iterations, counting salt",
            password: "correct horse battery staple",
            salt: counting,
            iterations: 250_000,
            expected_key: "e43e5d24b33433413db544858f3e702c4fa589a6090bf01985ed1d0b436b6540",
        },
        KdfVector {
            name: "minimum iterations",
            password: "secret123",
            salt: [0x5a; 16],
            iterations: 100_000,
            expected_key: "7956a2944e972451b4c12c0656615325b2ea90498e793f7f298f213960a36928",
        },
        KdfVector {
            name: "share password key",
            password: SHARE_PASSWORD,
            salt: [0x33; 16],
            iterations: 250_000,
            expected_key: "39a60d4f5567921afedd56f201839e1ab1ee09d9e1d426a5530e76d416f1e581",
        },
    ]
}

/// AES-256-GCM known answer: key `00..1f`, IV `00..0b`, plaintext `sealnote`.
pub const AEAD_CIPHERTEXT_HEX: &str = "3467b777ab8ab67edd02835172488bd3421e372399978323";

/// Key and IV for [`AEAD_CIPHERTEXT_HEX`].
pub fn aead_key_iv() -> (EncryptionKey, Iv) {
    let mut key = [0u8; 32];
    for (i, b) in key.iter_mut().enumerate() {
        *b = i as u8;
    }
    let mut iv = [0u8; 12];
    for (i, b) in iv.iter_mut().enumerate() {
        *b = i as u8;
    }
    (EncryptionKey::from_bytes(key), Iv::from_bytes(iv))
}

/// Open link to a current envelope expiring in 2100.
pub const OPEN_LINK: &str = "https://sealnote.example/share#v=1&d=bNVxLLK89jCLHeQeeYjZ9zOxrpAP4NguNg5-yjPQUjN1T5syY5jJ7n5owQ-DIDlcwbftI-FQQMqFRNjN1l_Xgki8LAh9pyFzkg1Z8HPLxHfHycpKb4v5aXtmvsZax2_2pGMwcRcj7iAovtc1HD7zSQw7xoUjQa5N814TXTPVT6Nm8YTdoyNbQj5sILaWKws-MidribqfXGpivUxhEG8WITkcOmk_x1rqkAZIan-I7A2XP87farSCbVO9rAjOtxIBlnGbyFs&i=IiIiIiIiIiIiIiIi&k=ERERERERERERERERERERERERERERERERERERERERERE";

/// The same envelope with the data key wrapped under [`SHARE_PASSWORD`].
pub const PROTECTED_LINK: &str = "https://sealnote.example/share#v=1&d=bNVxLLK89jCLHeQeeYjZ9zOxrpAP4NguNg5-yjPQUjN1T5syY5jJ7n5owQ-DIDlcwbftI-FQQMqFRNjN1l_Xgki8LAh9pyFzkg1Z8HPLxHfHycpKb4v5aXtmvsZax2_2pGMwcRcj7iAovtc1HD7zSQw7xoUjQa5N814TXTPVT6Nm8YTdoyNbQj5sILaWKws-MidribqfXGpivUxhEG8WITkcOmk_x1rqkAZIan-I7A2XP87farSCbVO9rAjOtxIBlnGbyFs&i=IiIiIiIiIiIiIiIi&k=MzMzMzMzMzMzMzMzMzMzMw:RERERERERERERERE:iobp_XjAfonYmpVGPpdKDY4liyFS_8wUVqlDsu-LxM28UfkAuu29pLEei30zPwPn";

/// A bare payload with no envelope.
pub const LEGACY_LINK: &str = "https://sealnote.example/share#v=1&d=bNVzILSj-n3fHbJZL8eKrD2_74EF79guPDso0iuHF2woX8lnNceLu249g1uDNCZF1qG8H3gr9az1ZGSnbrRIzroiW8I&i=IiIiIiIiIiIiIiIi&k=ERERERERERERERERERERERERERERERERERERERERERE";

/// An envelope that expired at 1_600_000_060_000.
pub const EXPIRED_LINK: &str = "https://sealnote.example/share#v=1&d=bNVxLLK89jCLHeQeeYjZ9zOxrpAP4NguNg5-yjPQUzN1T5syY5jJ7n5owQ-DIDlcwbftI-FQQM-CRNrJ0lvfhEi8LAh9pyFzkg1Z8HPLxHfHycpKb4v5aXt184YcwW66_CQ9alttqS1-sM9kGjLvVQZtmYVqdJpA_ie9RQsxKy_0DILB4Yqwxvo&i=IiIiIiIiIiIiIiIi&k=ERERERERERERERERERERERERERERERERERERERERERE";

/// Expiry of [`EXPIRED_LINK`].
pub const EXPIRED_AT: i64 = 1_600_000_060_000;

/// An envelope claiming scheme version `2.0`.
pub const MAJOR_TWO_LINK: &str = "https://sealnote.example/share#v=1&d=bNVxLLK89jCLHeQeeojZ9zOxrpAP4NguNg5-yjPQUjN1T5syY5jJ7n5owQ-DIDlcwbftI-FQQMqFRNjN1l_Xgki8LAh9pyFzkg1Z8HPLxHfHycpKb4v5aXtmvsZax2_2pGMwcRcj7iAovtc1HD7zSQw7xoUjQa5N814TXTPVT6Nm8YTdoyNbQj5sILaWKws-MidribqfXGpivUxhEG8WITkcOmk_x1rqkAZIan-I7A2XP87fatBJTnOoVje4Ud9M9bBbgpw&i=IiIiIiIiIiIiIiIi&k=ERERERERERERERERERERERERERERERERERERERERERE";

/// An export holding one rust note, sealed under [`EXPORT_PASSWORD`].
pub const EXPORT_JSON: &str = r#"{"encryptedData": "6xRmErYTFBTJk0T26l/AhKz+VPB57UOfFr2vdJUYDJHhzzj3fJs6isebEnSBnS+RwuXt0EHKQ6LAwabYA55g8KKCXFBLmxNCGNbXeRRuxY7NgvU63RlN2dmwH3AaJHwNg2wpxvfcFBeJ9PjZz5UVVSGj8OqGBZOrzHov65uaYyDs8yc3HTCaPh2P52vOF22aox6yPrzyssVnZ++Ib80D7JfoFuZRgRdv+w88whrZrvINQFVj4C/eO6A=", "iv": "ZmZmZmZmZmZmZmZm", "salt": "VVVVVVVVVVVVVVVVVVVVVQ==", "version": "1.0"}"#;

/// The payload inside [`OPEN_LINK`] and [`PROTECTED_LINK`].
pub fn golden_payload() -> SharePayload {
    SharePayload {
        title: "golden".to_string(),
        content: "hello".to_string(),
        snippets: vec![Snippet {
            id: "s1".to_string(),
            code: "fn main() {}".to_string(),
            language: "rust".to_string(),
        }],
    }
}

/// How a golden share link must open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Opens(SharePayload),
    Fails(ShareError),
}

/// A golden share link with its password and expected outcome.
#[derive(Debug, Clone)]
pub struct ShareVector {
    pub name: &'static str,
    pub url: &'static str,
    pub password: Option<&'static str>,
    pub expected: ShareOutcome,
}

/// All share link vectors, evaluated at [`GOLDEN_NOW`].
pub fn share_vectors() -> Vec<ShareVector> {
    vec![
        ShareVector {
            name: "open link",
            url: OPEN_LINK,
            password: None,
            expected: ShareOutcome::Opens(golden_payload()),
        },
        ShareVector {
            name: "protected link, right password",
            url: PROTECTED_LINK,
            password: Some(SHARE_PASSWORD),
            expected: ShareOutcome::Opens(golden_payload()),
        },
        ShareVector {
            name: "protected link, wrong password",
            url: PROTECTED_LINK,
            password: Some("wrong"),
            expected: ShareOutcome::Fails(ShareError::DecryptionFailed),
        },
        ShareVector {
            name: "protected link, no password",
            url: PROTECTED_LINK,
            password: None,
            expected: ShareOutcome::Fails(ShareError::PasswordRequired),
        },
        ShareVector {
            name: "legacy payload",
            url: LEGACY_LINK,
            password: None,
            expected: ShareOutcome::Opens(SharePayload::new("legacy", "from before envelopes")),
        },
        ShareVector {
            name: "expired envelope",
            url: EXPIRED_LINK,
            password: None,
            expected: ShareOutcome::Fails(ShareError::LinkExpired {
                expired_at: EXPIRED_AT,
            }),
        },
        ShareVector {
            name: "incompatible major version",
            url: MAJOR_TWO_LINK,
            password: None,
            expected: ShareOutcome::Fails(ShareError::VersionUnsupported("2.0".to_string())),
        },
    ]
}

/// Verify every vector, returning `(name, matched)` pairs.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    let mut results = Vec::new();

    for v in kdf_vectors() {
        let matches = derive_key(v.password, &v.salt, v.iterations)
            .map(|key| hex::encode(key.as_bytes()) == v.expected_key)
            .unwrap_or(false);
        results.push((v.name.to_string(), matches));
    }

    let (key, iv) = aead_key_iv();
    let matches = hex::decode(AEAD_CIPHERTEXT_HEX)
        .ok()
        .and_then(|ct| decrypt(&key, &ct, &iv).ok())
        .map(|pt| pt == b"sealnote")
        .unwrap_or(false);
    results.push(("aead known answer".to_string(), matches));

    for v in share_vectors() {
        let outcome = match open_share_url(v.url, v.password, GOLDEN_NOW) {
            Ok(payload) => ShareOutcome::Opens(payload),
            Err(e) => ShareOutcome::Fails(e),
        };
        results.push((v.name.to_string(), outcome == v.expected));
    }

    results
}
