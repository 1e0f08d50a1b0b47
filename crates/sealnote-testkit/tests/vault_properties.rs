//! Property tests driving the vault with generated notes.

use proptest::prelude::*;

use sealnote_testkit::{note_draft, TestFixture};

proptest! {
    // Every case registers a fresh vault and pays for one KDF run.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn created_notes_load_back_unchanged(drafts in prop::collection::vec(note_draft(), 1..6)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let (fixture, session) = TestFixture::registered().await;

            for draft in &drafts {
                let note = fixture.vault.create_note(&session, draft.clone()).await.unwrap();
                let loaded = fixture.vault.load_note(&session, &note.id).await.unwrap();
                assert_eq!(loaded.title, draft.title);
                assert_eq!(loaded.content, draft.content);
                assert_eq!(loaded.language, draft.language);
                assert_eq!(loaded, note);
            }
            assert_eq!(fixture.vault.list_notes(&session).await.unwrap().len(), drafts.len());
        });
    }
}
