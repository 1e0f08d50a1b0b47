//! Golden shares and exports consumed through the vault API.

use sealnote::{ExportFile, VaultError};
use sealnote_testkit::vectors::{
    EXPIRED_LINK, EXPORT_JSON, EXPORT_PASSWORD, OPEN_LINK, PROTECTED_LINK, SHARE_PASSWORD,
};
use sealnote_testkit::{sqlite_vault, TestFixture, TEST_PASSWORD, TEST_USERNAME};

#[tokio::test]
async fn golden_open_link_imports_as_note() {
    let (fixture, session) = TestFixture::registered().await;

    let note = fixture
        .vault
        .import_share(&session, OPEN_LINK, None)
        .await
        .unwrap();
    assert_eq!(note.title, "golden");
    assert_eq!(note.content, "hello");
    assert_eq!(note.language, "rust");

    let loaded = fixture.vault.load_note(&session, &note.id).await.unwrap();
    assert_eq!(loaded, note);
}

#[tokio::test]
async fn golden_protected_link_needs_its_password() {
    let (fixture, session) = TestFixture::registered().await;

    let err = fixture
        .vault
        .import_share(&session, PROTECTED_LINK, Some("wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::DecryptionFailed));
    assert_eq!(err.user_message(), sealnote::GENERIC_DECRYPT_MESSAGE);

    let note = fixture
        .vault
        .import_share(&session, PROTECTED_LINK, Some(SHARE_PASSWORD))
        .await
        .unwrap();
    assert_eq!(note.title, "golden");
}

#[tokio::test]
async fn golden_expired_link_is_not_imported() {
    let (fixture, session) = TestFixture::registered().await;

    let err = fixture
        .vault
        .import_share(&session, EXPIRED_LINK, None)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::LinkExpired { .. }));
    assert!(fixture.vault.list_notes(&session).await.unwrap().is_empty());
}

#[tokio::test]
async fn golden_export_imports_into_any_vault() {
    let (fixture, session) = TestFixture::registered().await;
    let file = ExportFile::from_json(EXPORT_JSON).unwrap();

    let count = fixture
        .vault
        .import_export(&session, &file, EXPORT_PASSWORD)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let note = fixture.vault.load_note(&session, "n1").await.unwrap();
    assert_eq!(note.title, "Exported");
    assert_eq!(note.content, "println!(\"hi\");");
    assert_eq!(note.language, "rust");
    assert_eq!(note.created_at, 1_690_000_000_000);
    assert_eq!(note.updated_at, 1_695_000_000_000);
}

#[tokio::test]
async fn golden_export_rejects_wrong_password() {
    let (fixture, session) = TestFixture::registered().await;
    let file = ExportFile::from_json(EXPORT_JSON).unwrap();

    let err = fixture
        .vault
        .import_export(&session, &file, "not-it")
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::DecryptionFailed));
}

#[tokio::test]
async fn golden_export_persists_in_sqlite_vault() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.db");
    let file = ExportFile::from_json(EXPORT_JSON).unwrap();

    {
        let vault = sqlite_vault(&path);
        let session = vault.register(TEST_USERNAME, TEST_PASSWORD).await.unwrap();
        vault
            .import_export(&session, &file, EXPORT_PASSWORD)
            .await
            .unwrap();
    }

    let vault = sqlite_vault(&path);
    let session = vault.login(TEST_USERNAME, TEST_PASSWORD).await.unwrap();
    let note = vault.load_note(&session, "n1").await.unwrap();
    assert_eq!(note.title, "Exported");
    assert_eq!(note.content, "println!(\"hi\");");
    assert_eq!(note.updated_at, 1_695_000_000_000);
}
