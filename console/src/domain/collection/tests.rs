//! Tests for the collection store.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserDirectory;
use rstest::rstest;

fn user(id: u64, first: &str, email: &str) -> UserRecord {
    let id = UserId::new(id).expect("positive id");
    UserRecord::new(id, first, "Tester", email, format!("https://reqres.in/img/faces/{id}-image.jpg"))
}

fn id(raw: u64) -> UserId {
    UserId::new(raw).expect("positive id")
}

fn page(raw: u32) -> PageNumber {
    PageNumber::new(raw).expect("positive page")
}

fn two_users() -> DirectoryPage {
    DirectoryPage {
        records: vec![user(1, "Bob", "bob@x.com"), user(2, "Amy", "amy@x.com")],
        total_pages: 2,
    }
}

fn make_store(directory: MockUserDirectory) -> CollectionStore<MockUserDirectory> {
    CollectionStore::new(Arc::new(directory))
}

async fn loaded_store(mut directory: MockUserDirectory) -> CollectionStore<MockUserDirectory> {
    directory
        .expect_list_page()
        .withf(|p| p.get() == 1)
        .times(1)
        .return_once(|_| Ok(two_users()));
    let store = make_store(directory);
    let outcome = store.load_page(page(1)).await.expect("initial load");
    assert_eq!(outcome, PageLoad::Applied);
    store
}

#[tokio::test]
async fn load_page_replaces_state_and_bumps_revision() {
    let store = loaded_store(MockUserDirectory::new()).await;

    let state = store.snapshot();
    assert_eq!(state.current_page(), page(1));
    assert_eq!(state.total_pages(), 2);
    assert_eq!(state.records().len(), 2);
    assert_eq!(state.revision(), 1);
    assert_eq!(state.records()[0].first_name(), "Bob", "server order is kept");
}

#[rstest]
#[case::same_page(1)]
#[case::other_page(2)]
#[tokio::test]
async fn failed_load_keeps_previous_page(#[case] failing_page: u32) {
    let mut directory = MockUserDirectory::new();
    let mut calls = 0_u32;
    directory.expect_list_page().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Ok(two_users())
        } else {
            Err(UserDirectoryError::network("connection reset"))
        }
    });
    let store = make_store(directory);
    store.load_page(page(1)).await.expect("initial load");
    let before = store.snapshot();

    let err = store
        .load_page(page(failing_page))
        .await
        .expect_err("reload fails");

    assert_eq!(err.code(), ErrorCode::Network);
    let after = store.snapshot();
    assert_eq!(after.current_page(), page(1));
    assert_eq!(after.records(), before.records());
    assert_eq!(after, before);
}

#[tokio::test]
async fn page_past_reported_total_leaves_state_untouched() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list_page()
        .withf(|p| p.get() == 5)
        .times(1)
        .return_once(|_| {
            Ok(DirectoryPage {
                records: Vec::new(),
                total_pages: 2,
            })
        });
    let store = loaded_store(directory).await;
    let before = store.snapshot();

    let outcome = store.load_page(page(5)).await.expect("load succeeds");

    assert_eq!(outcome, PageLoad::OutOfRange);
    let after = store.snapshot();
    assert_eq!(after, before);
    assert!(after.current_page().get() <= after.total_pages());
}

#[rstest]
#[case(UserDirectoryError::network("down"), ErrorCode::Network)]
#[case(UserDirectoryError::server(500_u16, "boom"), ErrorCode::Server)]
#[case(UserDirectoryError::decode("missing field `data`"), ErrorCode::Server)]
#[case(UserDirectoryError::not_found(9_u64), ErrorCode::NotFound)]
#[tokio::test]
async fn directory_errors_map_to_domain_codes(
    #[case] failure: UserDirectoryError,
    #[case] expected: ErrorCode,
) {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_fetch_one()
        .times(1)
        .return_once(move |_| Err(failure));
    let store = make_store(directory);

    let err = store.get_or_fetch(id(9)).await.expect_err("fetch fails");
    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn empty_directory_reports_one_page() {
    let mut directory = MockUserDirectory::new();
    directory.expect_list_page().times(1).return_once(|_| {
        Ok(DirectoryPage {
            records: Vec::new(),
            total_pages: 0,
        })
    });
    let store = make_store(directory);

    store.load_page(page(1)).await.expect("load succeeds");

    assert_eq!(store.snapshot().total_pages(), 1);
    assert_eq!(store.next_page().await.expect("bounded"), PageLoad::OutOfRange);
}

#[tokio::test]
async fn navigation_stays_within_bounds() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list_page()
        .withf(|p| p.get() == 2)
        .times(1)
        .return_once(|_| {
            Ok(DirectoryPage {
                records: vec![user(7, "Mia", "mia@x.com")],
                total_pages: 2,
            })
        });
    let store = loaded_store(directory).await;

    assert_eq!(store.previous_page().await.expect("bounded"), PageLoad::OutOfRange);
    assert_eq!(store.next_page().await.expect("loads"), PageLoad::Applied);
    assert_eq!(store.snapshot().current_page(), page(2));
    assert_eq!(store.next_page().await.expect("bounded"), PageLoad::OutOfRange);
}

#[tokio::test]
async fn get_or_fetch_prefers_local_record() {
    let mut directory = MockUserDirectory::new();
    directory.expect_fetch_one().never();
    let store = loaded_store(directory).await;

    let found = store.get_or_fetch(id(2)).await.expect("local hit");
    assert_eq!(found.first_name(), "Amy");
}

#[tokio::test]
async fn get_or_fetch_does_not_cache_remote_record() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_fetch_one()
        .withf(|id| id.get() == 12)
        .times(1)
        .return_once(|_| Ok(user(12, "Rachel", "rachel@x.com")));
    let store = loaded_store(directory).await;
    let revision = store.snapshot().revision();

    let found = store.get_or_fetch(id(12)).await.expect("remote hit");

    assert_eq!(found.id(), id(12));
    assert!(store.snapshot().find(id(12)).is_none());
    assert_eq!(store.snapshot().revision(), revision);
}

#[tokio::test]
async fn apply_update_merges_only_patched_fields() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_update()
        .withf(|id, patch| {
            id.get() == 2 && patch.email().is_some_and(|email| email.to_string() == "new@x.com")
        })
        .times(1)
        .return_once(|_, _| Ok(()));
    let store = loaded_store(directory).await;
    let patch = UserPatch::builder().email("new@x.com").build().expect("valid patch");

    let merged = store.apply_update(id(2), &patch).await.expect("update succeeds");

    let merged = merged.expect("record is local");
    assert_eq!(merged.email(), "new@x.com");
    assert_eq!(merged.first_name(), "Amy");
    let state = store.snapshot();
    assert_eq!(state.records().len(), 2);
    assert_eq!(state.find(id(1)), Some(&user(1, "Bob", "bob@x.com")));
    assert_eq!(state.find(id(2)).map(UserRecord::email), Some("new@x.com"));
    assert_eq!(state.revision(), 2);
}

#[tokio::test]
async fn apply_update_for_remote_only_record_leaves_state() {
    let mut directory = MockUserDirectory::new();
    directory.expect_update().times(1).return_once(|_, _| Ok(()));
    let store = loaded_store(directory).await;
    let before = store.snapshot();
    let patch = UserPatch::builder().first_name("Zed").build().expect("valid patch");

    let merged = store.apply_update(id(40), &patch).await.expect("update succeeds");

    assert!(merged.is_none());
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn failed_update_leaves_state() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_update()
        .times(1)
        .return_once(|_, _| Err(UserDirectoryError::server(503_u16, "unavailable")));
    let store = loaded_store(directory).await;
    let before = store.snapshot();
    let patch = UserPatch::builder().first_name("Zed").build().expect("valid patch");

    let err = store.apply_update(id(1), &patch).await.expect_err("update fails");

    assert_eq!(err.code(), ErrorCode::Server);
    assert!(err.is_retryable());
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn apply_delete_removes_local_record_and_keeps_total_pages() {
    let mut directory = MockUserDirectory::new();
    directory.expect_delete().times(1).return_once(|_| Ok(()));
    directory
        .expect_fetch_one()
        .withf(|id| id.get() == 1)
        .times(1)
        .return_once(|_| Err(UserDirectoryError::not_found(1_u64)));
    let store = loaded_store(directory).await;

    store.apply_delete(id(1)).await.expect("delete succeeds");

    let state = store.snapshot();
    assert_eq!(state.records().len(), 1);
    assert!(state.find(id(1)).is_none());
    assert_eq!(state.total_pages(), 2);

    let err = store.get_or_fetch(id(1)).await.expect_err("record is gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn failed_delete_keeps_record() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_delete()
        .times(1)
        .return_once(|_| Err(UserDirectoryError::network("timed out")));
    let store = loaded_store(directory).await;

    let err = store.apply_delete(id(1)).await.expect_err("delete fails");

    assert_eq!(err.code(), ErrorCode::Network);
    assert!(store.snapshot().find(id(1)).is_some());
}
