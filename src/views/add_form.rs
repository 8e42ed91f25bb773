//! Add-bookmark form state.
//!
//! Validates input, writes through the owner-scoped store, and fires the
//! local "bookmark added" signal exactly once per successful submit. The
//! form never updates the list view itself — the synchronizer re-fetches on
//! the signal, so the server-assigned `id` and `created_at` stay
//! authoritative.

use url::Url;

use crate::signal::AddedNotifier;
use crate::store::OwnerScopedStore;
use crate::types::bookmark::Bookmark;
use crate::types::errors::{FormError, ValidationError};

/// State behind the add-bookmark form.
pub struct AddBookmarkForm {
    store: OwnerScopedStore,
    notifier: AddedNotifier,
    title: String,
    url: String,
    error: Option<String>,
}

impl AddBookmarkForm {
    /// Creates a form writing through the given scoped store. The notifier
    /// is the sending half of the channel the synchronizer listens on.
    pub fn new(store: OwnerScopedStore, notifier: AddedNotifier) -> Self {
        Self {
            store,
            notifier,
            title: String::new(),
            url: String::new(),
            error: None,
        }
    }

    /// Replaces the notifier. Used when the listening half is recreated,
    /// e.g. when the bookmarks view is mounted again after an unmount.
    pub fn set_notifier(&mut self, notifier: AddedNotifier) {
        self.notifier = notifier;
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current user-visible error, if the last submit failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the current fields, returning the trimmed title and URL.
    ///
    /// The title must be non-empty after trimming and the URL must parse as
    /// an absolute URL. Validation failures never reach the store.
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let url = self.url.trim();
        if Url::parse(url).is_err() {
            return Err(ValidationError::InvalidUrl(url.to_string()));
        }
        Ok((title.to_string(), url.to_string()))
    }

    /// Submits the form: validate, insert, clear fields, fire the signal.
    ///
    /// On failure the fields are kept, the error becomes visible on the
    /// form, and the signal does not fire.
    pub fn submit(&mut self) -> Result<Bookmark, FormError> {
        self.error = None;

        let result = self
            .validate()
            .map_err(FormError::from)
            .and_then(|(title, url)| self.store.insert(&title, &url).map_err(FormError::from));

        match result {
            Ok(bookmark) => {
                self.title.clear();
                self.url.clear();
                self.notifier.notify();
                Ok(bookmark)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
