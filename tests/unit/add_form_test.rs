//! Unit tests for the add-bookmark form: validation, write-through, and the
//! local "bookmark added" signal.

use std::sync::Arc;
use std::time::Duration;

use linkvault::auth::Session;
use linkvault::database::Database;
use linkvault::signal;
use linkvault::store::{BookmarkStore, FeedSubscription, OwnerScopedStore, SqliteStore};
use linkvault::types::bookmark::{Bookmark, NewBookmark};
use linkvault::types::errors::{FormError, StoreError, ValidationError};
use linkvault::views::add_form::AddBookmarkForm;
use rstest::rstest;
use tokio::time::timeout;

fn scoped_store() -> OwnerScopedStore {
    let db = Database::open_in_memory().expect("failed to open in-memory database");
    let store = Arc::new(SqliteStore::new(Arc::new(db)));
    OwnerScopedStore::new(
        store,
        &Session {
            user_id: "u1".to_string(),
            email: "u1@example.com".to_string(),
        },
    )
}

fn form_with(store: OwnerScopedStore) -> (AddBookmarkForm, signal::AddedListener) {
    let (notifier, listener) = signal::added_channel();
    (AddBookmarkForm::new(store, notifier), listener)
}

#[rstest]
#[case("", "https://example.com", ValidationError::EmptyTitle)]
#[case("   ", "https://example.com", ValidationError::EmptyTitle)]
#[case("Title", "", ValidationError::InvalidUrl(String::new()))]
#[case("Title", "not a url", ValidationError::InvalidUrl("not a url".to_string()))]
#[case("Title", "/relative/path", ValidationError::InvalidUrl("/relative/path".to_string()))]
fn test_validation_rejects_bad_input(
    #[case] title: &str,
    #[case] url: &str,
    #[case] expected: ValidationError,
) {
    let (mut form, _listener) = form_with(scoped_store());
    form.set_title(title);
    form.set_url(url);
    assert_eq!(form.validate(), Err(expected));
}

#[rstest]
#[case("  Rust  ", "  https://www.rust-lang.org  ", "Rust", "https://www.rust-lang.org")]
#[case("Docs", "https://example.com/docs?q=1", "Docs", "https://example.com/docs?q=1")]
fn test_validation_trims_fields(
    #[case] title: &str,
    #[case] url: &str,
    #[case] expected_title: &str,
    #[case] expected_url: &str,
) {
    let (mut form, _listener) = form_with(scoped_store());
    form.set_title(title);
    form.set_url(url);
    assert_eq!(
        form.validate(),
        Ok((expected_title.to_string(), expected_url.to_string()))
    );
}

#[tokio::test]
async fn test_submit_inserts_clears_and_signals_exactly_once() {
    let (mut form, mut listener) = form_with(scoped_store());
    form.set_title("  Rust  ");
    form.set_url("https://www.rust-lang.org");

    let bookmark = form.submit().expect("valid submit should succeed");
    assert_eq!(bookmark.title, "Rust");
    assert_eq!(bookmark.owner_id, "u1");
    assert!(!bookmark.id.is_empty());

    // Fields cleared, no lingering error.
    assert_eq!(form.title(), "");
    assert_eq!(form.url(), "");
    assert!(form.error().is_none());

    // Exactly one signal.
    timeout(Duration::from_secs(1), listener.recv())
        .await
        .expect("the added signal should fire")
        .expect("notifier still alive");
    assert!(
        timeout(Duration::from_millis(100), listener.recv())
            .await
            .is_err(),
        "only one signal per successful submit"
    );
}

#[tokio::test]
async fn test_submit_validation_failure_keeps_fields_and_stays_silent() {
    let (mut form, mut listener) = form_with(scoped_store());
    form.set_title("Broken");
    form.set_url("not a url");

    let err = form.submit().expect_err("invalid URL must not submit");
    assert!(matches!(err, FormError::Validation(_)));

    // Fields kept for correction; error is user-visible; no signal fired.
    assert_eq!(form.title(), "Broken");
    assert_eq!(form.url(), "not a url");
    assert!(form.error().is_some());
    assert!(
        timeout(Duration::from_millis(100), listener.recv())
            .await
            .is_err(),
        "no signal on a failed submit"
    );
}

/// Store whose writes always fail, for surfacing store errors on the form.
struct BrokenStore;

impl BookmarkStore for BrokenStore {
    fn insert(&self, _record: &NewBookmark) -> Result<Bookmark, StoreError> {
        Err(StoreError::Database("connection reset".to_string()))
    }
    fn list(&self, _owner_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        Ok(Vec::new())
    }
    fn delete_by_id(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Database("connection reset".to_string()))
    }
    fn subscribe(&self, owner_id: &str) -> FeedSubscription {
        let (feed, _) = tokio::sync::broadcast::channel(1);
        FeedSubscription::new(owner_id, feed.subscribe())
    }
}

#[tokio::test]
async fn test_submit_store_failure_becomes_form_error() {
    let scoped = OwnerScopedStore::new(
        Arc::new(BrokenStore),
        &Session {
            user_id: "u1".to_string(),
            email: "u1@example.com".to_string(),
        },
    );
    let (mut form, mut listener) = form_with(scoped);
    form.set_title("Fine");
    form.set_url("https://example.com");

    let err = form.submit().expect_err("store failure must surface");
    assert!(matches!(err, FormError::Store(StoreError::Database(_))));
    assert_eq!(form.title(), "Fine", "fields are kept on failure");
    assert!(form.error().is_some());
    assert!(
        timeout(Duration::from_millis(100), listener.recv())
            .await
            .is_err(),
        "no signal when the write-through fails"
    );
}
