//! End-to-end share scenarios through the URL form.

use std::time::Duration;

use proptest::prelude::*;

use sealnote_crypto::{cipher, keywrap, EncryptionKey};
use sealnote_share::{
    create_share, now_millis, open_share_url, KeyMaterial, ShareEnvelope, ShareError, ShareLink,
    SharePayload, LINK_VERSION,
};

const ORIGIN: &str = "https://notes.example";
const WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);

fn simple_payload() -> SharePayload {
    SharePayload {
        title: "t".to_string(),
        content: "c".to_string(),
        snippets: vec![],
    }
}

#[test]
fn open_share_recovers_payload() {
    let now = now_millis();
    let url = create_share(&simple_payload(), None, WEEK, now)
        .unwrap()
        .to_url(ORIGIN);

    let opened = open_share_url(&url, None, now).unwrap();
    assert_eq!(opened, simple_payload());
    assert_eq!(
        serde_json::to_vec(&opened).unwrap(),
        serde_json::to_vec(&simple_payload()).unwrap()
    );
}

#[test]
fn password_share_accepts_only_the_password() {
    let now = now_millis();
    let url = create_share(&simple_payload(), Some("secret123"), WEEK, now)
        .unwrap()
        .to_url(ORIGIN);

    assert_eq!(
        open_share_url(&url, Some("secret123"), now).unwrap(),
        simple_payload()
    );
    assert_eq!(
        open_share_url(&url, Some("wrong"), now),
        Err(ShareError::DecryptionFailed)
    );
}

#[test]
fn expired_envelope_reports_expiry_not_decryption() {
    let now = now_millis();
    let envelope = ShareEnvelope {
        expires_at: now - 1,
        ..ShareEnvelope::new(simple_payload(), now - 10_000, WEEK)
    };

    let data_key = EncryptionKey::generate();
    let blob = cipher::encrypt(&data_key, &envelope.to_bytes().unwrap()).unwrap();
    let link = ShareLink {
        version: LINK_VERSION,
        data: blob.ciphertext,
        iv: blob.iv,
        key: KeyMaterial::Protected(keywrap::wrap_key(&data_key, "secret123").unwrap()),
    };

    assert_eq!(
        open_share_url(&link.to_url(ORIGIN), Some("secret123"), now),
        Err(ShareError::LinkExpired { expired_at: now - 1 })
    );
}

#[test]
fn missing_iv_fails_before_any_crypto() {
    let now = now_millis();
    let url = create_share(&simple_payload(), Some("secret123"), WEEK, now)
        .unwrap()
        .to_url(ORIGIN);

    let without_iv: Vec<&str> = url
        .split('&')
        .filter(|part| !part.starts_with("i="))
        .collect();
    let broken = without_iv.join("&");

    // No password given: if anything were decrypted we would see
    // PasswordRequired or DecryptionFailed instead.
    assert_eq!(
        open_share_url(&broken, None, now),
        Err(ShareError::IncompleteLink("i"))
    );
}

#[test]
fn password_protection_is_visible_without_decrypting() {
    let now = now_millis();
    let open = create_share(&simple_payload(), None, WEEK, now).unwrap();
    let locked = create_share(&simple_payload(), Some("pw"), WEEK, now).unwrap();

    assert!(!ShareLink::parse(&open.to_url(ORIGIN)).unwrap().is_password_protected());
    assert!(ShareLink::parse(&locked.to_url(ORIGIN)).unwrap().is_password_protected());
}

#[test]
fn tampered_url_data_fails_closed() {
    let now = now_millis();
    let mut link = create_share(&simple_payload(), None, WEEK, now).unwrap();
    link.data[0] ^= 0x01;

    assert_eq!(
        open_share_url(&link.to_url(ORIGIN), None, now),
        Err(ShareError::DecryptionFailed)
    );
}

fn arb_payload() -> impl Strategy<Value = SharePayload> {
    (
        ".{0,40}",
        ".{0,200}",
        prop::collection::vec(("[a-z0-9]{1,8}", ".{0,80}", "[a-z]{1,10}"), 0..4),
    )
        .prop_map(|(title, content, snippets)| {
            snippets.into_iter().fold(SharePayload::new(title, content), |p, (id, code, lang)| {
                p.with_snippet(id, code, lang)
            })
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn open_links_roundtrip_any_payload(payload in arb_payload()) {
        let now = 1_700_000_000_000;
        let url = create_share(&payload, None, WEEK, now).unwrap().to_url(ORIGIN);
        prop_assert_eq!(open_share_url(&url, None, now).unwrap(), payload);
    }

    #[test]
    fn arbitrary_fragments_never_panic(fragment in "[a-z=&:A-Z0-9_#-]{0,120}") {
        let _ = ShareLink::parse(&fragment);
    }
}
