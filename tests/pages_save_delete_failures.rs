use supadmind::api::FixtureBackend;
use supadmind::notify::{Notifier, Severity};
use supadmind::pages::ProgramsPage;

async fn opened_page(backend: &FixtureBackend) -> ProgramsPage {
    let mut page = ProgramsPage::new();
    let mut notifier = Notifier::new();
    page.open(backend, &mut notifier).await;
    assert!(notifier.pending().is_empty());
    page
}

#[tokio::test]
async fn successful_update_replaces_exactly_one_entry() {
    let backend = FixtureBackend::new();
    let mut page = opened_page(&backend).await;
    let mut notifier = Notifier::new();
    let before = page.items.clone();

    assert!(page.begin_edit("2"));
    page.draft.name = "Management".to_string();
    assert!(page.submit(&backend, &mut notifier).await);

    assert!(!page.dialog_open);
    assert_eq!(page.items.len(), before.len());
    for (after, prior) in page.items.iter().zip(&before) {
        if prior.id == "2" {
            assert_eq!(after.name, "Management");
            assert_eq!(after.acronym, prior.acronym);
            assert_eq!(after.created_at, prior.created_at);
        } else {
            assert_eq!(after, prior);
        }
    }
}

#[tokio::test]
async fn failed_update_leaves_list_untouched_and_dialog_open() {
    let backend = FixtureBackend::new();
    let mut page = opened_page(&backend).await;
    let mut notifier = Notifier::new();
    let before = page.items.clone();

    assert!(page.begin_edit("2"));
    page.draft.name = "Renamed".to_string();
    backend.fail_next("programs.update");
    assert!(!page.submit(&backend, &mut notifier).await);

    assert!(page.dialog_open);
    assert_eq!(page.items, before);
    let notices = notifier.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
}

#[tokio::test]
async fn failed_create_does_not_append() {
    let backend = FixtureBackend::new();
    let mut page = opened_page(&backend).await;
    let mut notifier = Notifier::new();
    let before = page.items.clone();

    page.begin_create();
    page.draft.name = "Droit".to_string();
    page.draft.acronym = "DRT".to_string();
    page.draft.program_type_id = "1".to_string();
    backend.fail_next("programs.create");
    assert!(!page.submit(&backend, &mut notifier).await);

    assert!(page.dialog_open);
    assert_eq!(page.items, before);
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_backend() {
    let backend = FixtureBackend::new();
    let mut page = opened_page(&backend).await;
    let mut notifier = Notifier::new();
    let before = page.items.clone();

    page.begin_create();
    page.draft.acronym = "DRT".to_string();
    // Name left empty: rejected locally. The injected fault must still be
    // armed afterwards, proving no create call was made.
    backend.fail_next("programs.create");
    assert!(!page.submit(&backend, &mut notifier).await);
    assert_eq!(page.items, before);
    assert!(page.dialog_open);

    page.draft.name = "Droit".to_string();
    page.draft.program_type_id = "1".to_string();
    assert!(!page.submit(&backend, &mut notifier).await, "armed fault fires now");
    assert!(page.submit(&backend, &mut notifier).await);
    assert_eq!(page.items.len(), before.len() + 1);
}

#[tokio::test]
async fn failed_delete_leaves_the_list_byte_identical() {
    let backend = FixtureBackend::new();
    let mut page = opened_page(&backend).await;
    let mut notifier = Notifier::new();
    let before = page.items.clone();

    page.table.stage_delete("2");
    backend.fail_next("programs.delete");
    assert!(page.confirm_delete(&backend, &mut notifier).await.is_none());
    assert_eq!(page.items, before);
    let notices = notifier.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
}

#[tokio::test]
async fn confirm_without_staged_id_is_a_no_op() {
    let backend = FixtureBackend::new();
    let mut page = opened_page(&backend).await;
    let mut notifier = Notifier::new();
    let before = page.items.clone();

    page.table.stage_delete("2");
    page.table.cancel_delete();
    assert!(page.confirm_delete(&backend, &mut notifier).await.is_none());
    assert_eq!(page.items, before);
    assert!(notifier.pending().is_empty());
}

#[tokio::test]
async fn confirmed_delete_removes_only_the_staged_entry() {
    let backend = FixtureBackend::new();
    let mut page = opened_page(&backend).await;
    let mut notifier = Notifier::new();
    let before = page.items.clone();

    page.table.stage_delete("2");
    assert_eq!(
        page.confirm_delete(&backend, &mut notifier).await.as_deref(),
        Some("2")
    );
    assert_eq!(page.items.len(), before.len() - 1);
    for prior in before.iter().filter(|p| p.id != "2") {
        assert!(page.items.contains(prior));
    }
}
