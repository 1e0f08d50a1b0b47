//! Proptest generators for property-based testing.

use proptest::prelude::*;

use sealnote::NoteDraft;
use sealnote_share::{SharePayload, Snippet};

/// A non-empty password, including non-ASCII characters.
pub fn password() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 !@#$%^&*()_+\\-=:;'\"<>,.?/éü中]{1,24}"
}

/// Arbitrary note text, including empty.
pub fn text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max_len).prop_map(|c| c.into_iter().collect())
}

/// A snippet language tag.
pub fn language() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("plaintext".to_string()),
        Just("rust".to_string()),
        Just("javascript".to_string()),
        Just("python".to_string()),
        "[a-z]{1,12}",
    ]
}

/// A code snippet.
pub fn snippet() -> impl Strategy<Value = Snippet> {
    ("[a-z0-9-]{1,16}", text(200), language()).prop_map(|(id, code, language)| Snippet {
        id,
        code,
        language,
    })
}

/// A share payload with up to four snippets.
pub fn share_payload() -> impl Strategy<Value = SharePayload> {
    (text(40), text(400), prop::collection::vec(snippet(), 0..4)).prop_map(
        |(title, content, snippets)| SharePayload {
            title,
            content,
            snippets,
        },
    )
}

/// A note draft.
pub fn note_draft() -> impl Strategy<Value = NoteDraft> {
    (text(40), text(400), language())
        .prop_map(|(title, content, language)| NoteDraft::new(title, content, language))
}

/// Plaintext bytes of specified max length.
pub fn plaintext(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealnote_crypto::{decrypt, encrypt, EncryptionKey};

    proptest! {
        #[test]
        fn passwords_are_never_empty(pw in password()) {
            prop_assert!(!pw.is_empty());
        }

        #[test]
        fn payload_json_roundtrips(payload in share_payload()) {
            let json = serde_json::to_string(&payload).unwrap();
            let back: SharePayload = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, payload);
        }

        #[test]
        fn generated_plaintext_roundtrips(data in plaintext(512)) {
            let key = EncryptionKey::generate();
            let blob = encrypt(&key, &data).unwrap();
            prop_assert_eq!(decrypt(&key, &blob.ciphertext, &blob.iv).unwrap(), data);
        }
    }
}
