//! App Core for LinkVault.
//!
//! Central struct wiring the database, store, and auth gate, and mounting
//! the bookmarks view for an authenticated session.

use std::sync::Arc;

use crate::auth::{AuthGate, Session, SessionProvider};
use crate::managers::list_synchronizer::ListSynchronizer;
use crate::signal::{self, AddedListener};
use crate::store::{OwnerScopedStore, SqliteStore};
use crate::types::bookmark::Bookmark;
use crate::types::errors::{AuthError, SyncError};
use crate::views::add_form::AddBookmarkForm;
use crate::views::bookmark_row::BookmarkRow;

/// Central application struct.
pub struct App {
    pub db: Arc<crate::database::Database>,
    pub store: Arc<SqliteStore>,
    pub auth: AuthGate,
}

impl App {
    /// Creates a new App over a database file.
    pub fn new(
        db_path: &str,
        provider: Box<dyn SessionProvider>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(crate::database::Database::open(db_path)?);
        Ok(Self::with_db(db, provider))
    }

    /// Creates a new App over an in-memory database (tests, demo).
    pub fn in_memory(
        provider: Box<dyn SessionProvider>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(crate::database::Database::open_in_memory()?);
        Ok(Self::with_db(db, provider))
    }

    fn with_db(db: Arc<crate::database::Database>, provider: Box<dyn SessionProvider>) -> Self {
        let store = Arc::new(SqliteStore::new(db.clone()));
        Self {
            db,
            store,
            auth: AuthGate::new(provider),
        }
    }

    /// Resolves the session and builds the bookmarks view for it.
    ///
    /// # Errors
    /// `AuthError::NotSignedIn` when no session is present — the caller
    /// redirects to sign-in.
    pub fn open_bookmarks_view(&self) -> Result<BookmarksView, AuthError> {
        let session = self.auth.resolve()?;
        let scoped = OwnerScopedStore::new(self.store.clone(), &session);
        let (notifier, listener) = signal::added_channel();
        let synchronizer = ListSynchronizer::new(self.store.clone(), &session.user_id);
        let form = AddBookmarkForm::new(scoped.clone(), notifier);

        Ok(BookmarksView {
            session,
            synchronizer,
            form,
            scoped,
            added: Some(listener),
        })
    }
}

/// The mounted bookmarks page: synchronizer, form, and row factory for one
/// authenticated session.
pub struct BookmarksView {
    pub session: Session,
    pub synchronizer: ListSynchronizer,
    pub form: AddBookmarkForm,
    scoped: OwnerScopedStore,
    added: Option<AddedListener>,
}

impl BookmarksView {
    /// Starts the synchronizer, handing it the local-signal listener.
    ///
    /// Mounting again after [`unmount`](Self::unmount) is supported: the
    /// previous listener was dropped with the driver, so a fresh channel is
    /// created and the form's notifier re-wired to it.
    ///
    /// # Errors
    /// `SyncError::AlreadyStarted` while already mounted.
    pub fn mount(&mut self) -> Result<(), SyncError> {
        if self.synchronizer.is_running() {
            return Err(SyncError::AlreadyStarted);
        }
        let added = match self.added.take() {
            Some(listener) => listener,
            None => {
                let (notifier, listener) = signal::added_channel();
                self.form.set_notifier(notifier);
                listener
            }
        };
        self.synchronizer.start(added)
    }

    /// Tears the view down, releasing the feed subscription and listener.
    pub fn unmount(&mut self) {
        self.synchronizer.stop();
    }

    /// Builds the row state for one listed bookmark.
    pub fn row(&self, bookmark: Bookmark) -> BookmarkRow {
        BookmarkRow::new(bookmark, self.scoped.clone())
    }
}
